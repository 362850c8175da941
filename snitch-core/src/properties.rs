use crate::error::BadPropertyFileError;
use crate::property_table::{PropertyKey, PropertyTable};
use crate::report;

/// Validated topology declaration of the local node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackDcProperties {
    dc: String,
    rack: String,
    prefer_local: bool,
    dc_suffix: String,
}

impl RackDcProperties {
    pub fn new(dc: String, rack: String) -> Self {
        RackDcProperties {
            dc,
            rack,
            prefer_local: false,
            dc_suffix: String::new(),
        }
    }

    pub fn with_prefer_local(mut self, prefer_local: bool) -> Self {
        self.prefer_local = prefer_local;
        self
    }

    pub fn with_dc_suffix(mut self, dc_suffix: String) -> Self {
        self.dc_suffix = dc_suffix;
        self
    }

    /// Effective datacenter name, i.e. the declared one with the suffix appended.
    pub fn datacenter(&self) -> String {
        format!("{}{}", self.dc, self.dc_suffix)
    }

    /// Datacenter as declared in the file, without the suffix.
    #[inline]
    pub fn declared_datacenter(&self) -> &str {
        &self.dc
    }

    #[inline]
    pub fn rack(&self) -> &str {
        &self.rack
    }

    #[inline]
    pub fn prefer_local(&self) -> bool {
        self.prefer_local
    }

    #[inline]
    pub fn dc_suffix(&self) -> &str {
        &self.dc_suffix
    }
}

impl TryFrom<&PropertyTable> for RackDcProperties {
    type Error = BadPropertyFileError;

    fn try_from(table: &PropertyTable) -> Result<Self, Self::Error> {
        let (dc, rack) = match (table.get(PropertyKey::Dc), table.get(PropertyKey::Rack)) {
            (Some(dc), Some(rack)) => (dc, rack),
            _ => return Err(report::incomplete_file(table.path())),
        };

        let prefer_local = table
            .get(PropertyKey::PreferLocal)
            .map(|value| {
                parse_bool(value).ok_or_else(|| {
                    report::invalid_value(table.path(), PropertyKey::PreferLocal, value)
                })
            })
            .transpose()?
            .unwrap_or(false);

        let dc_suffix = table.get(PropertyKey::DcSuffix).unwrap_or_default();

        Ok(RackDcProperties::new(dc.into(), rack.into())
            .with_prefer_local(prefer_local)
            .with_dc_suffix(dc_suffix.into()))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

use derive_more::Display;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Keys supported in a rack/dc property file.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Display)]
pub enum PropertyKey {
    /// Datacenter of the local node. Obligatory.
    #[display("dc")]
    Dc,
    /// Rack of the local node. Obligatory.
    #[display("rack")]
    Rack,
    /// Prefer the private address when talking to nodes in the same datacenter.
    #[display("prefer_local")]
    PreferLocal,
    /// Appended to the declared datacenter name.
    #[display("dc_suffix")]
    DcSuffix,
}

impl PropertyKey {
    pub const ALL: [PropertyKey; 4] = [
        PropertyKey::Dc,
        PropertyKey::Rack,
        PropertyKey::PreferLocal,
        PropertyKey::DcSuffix,
    ];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::Dc => "dc",
            PropertyKey::Rack => "rack",
            PropertyKey::PreferLocal => "prefer_local",
            PropertyKey::DcSuffix => "dc_suffix",
        }
    }

    /// Is the key required to be present in every property file.
    #[inline]
    pub fn is_obligatory(self) -> bool {
        matches!(self, PropertyKey::Dc | PropertyKey::Rack)
    }
}

impl FromStr for PropertyKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unsupported property key: {s}"))
    }
}

/// Values read from a single property file, keyed by the supported property keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTable {
    path: PathBuf,
    values: BTreeMap<PropertyKey, String>,
    unrecognized_keys: Vec<String>,
}

impl PropertyTable {
    pub(crate) fn new(path: PathBuf) -> Self {
        PropertyTable {
            path,
            values: Default::default(),
            unrecognized_keys: Default::default(),
        }
    }

    /// Path of the file the table was read from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn get(&self, key: PropertyKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, key: PropertyKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Iterates over declared values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys outside of the supported set which were skipped instead of rejected.
    #[inline]
    pub fn unrecognized_keys(&self) -> &[String] {
        &self.unrecognized_keys
    }

    pub(crate) fn insert(&mut self, key: PropertyKey, value: String) {
        self.values.insert(key, value);
    }

    pub(crate) fn push_unrecognized(&mut self, key: String) {
        self.unrecognized_keys.push(key);
    }

    pub(crate) fn has_unrecognized(&self, key: &str) -> bool {
        self.unrecognized_keys.iter().any(|known| known == key)
    }
}

#[cfg(test)]
mod tests {
    use crate::property_table::PropertyKey;

    #[test]
    fn should_parse_supported_keys() {
        for key in PropertyKey::ALL {
            assert_eq!(key.as_str().parse::<PropertyKey>().unwrap(), key);
            assert_eq!(key.to_string(), key.as_str());
        }

        assert!("DC".parse::<PropertyKey>().is_err());
        assert!("datacenter".parse::<PropertyKey>().is_err());
    }

    #[test]
    fn should_mark_dc_and_rack_obligatory() {
        assert!(PropertyKey::Dc.is_obligatory());
        assert!(PropertyKey::Rack.is_obligatory());
        assert!(!PropertyKey::PreferLocal.is_obligatory());
        assert!(!PropertyKey::DcSuffix.is_obligatory());
    }
}

use derive_more::{Constructor, Display};

/// Datacenter reported for endpoints with no known topology.
pub const DEFAULT_DC: &str = "UNKNOWN_DC";
/// Rack reported for endpoints with no known topology.
pub const DEFAULT_RACK: &str = "UNKNOWN_RACK";

/// Placement of a single endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Constructor)]
pub struct EndpointDcRack {
    pub dc: String,
    pub rack: String,
}

impl Default for EndpointDcRack {
    fn default() -> Self {
        EndpointDcRack::new(DEFAULT_DC.into(), DEFAULT_RACK.into())
    }
}

impl EndpointDcRack {
    /// Returns the value of given attribute.
    #[inline]
    pub fn get(&self, attribute: TopologyAttribute) -> &str {
        match attribute {
            TopologyAttribute::Datacenter => &self.dc,
            TopologyAttribute::Rack => &self.rack,
        }
    }
}

/// Selects which part of the topology is being resolved.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Display)]
pub enum TopologyAttribute {
    Datacenter,
    Rack,
}

impl TopologyAttribute {
    /// Value used when nothing is known about an endpoint.
    #[inline]
    pub fn default_value(self) -> &'static str {
        match self {
            TopologyAttribute::Datacenter => DEFAULT_DC,
            TopologyAttribute::Rack => DEFAULT_RACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::topology::{EndpointDcRack, TopologyAttribute, DEFAULT_DC, DEFAULT_RACK};

    #[test]
    fn should_default_to_unknown() {
        let dc_rack = EndpointDcRack::default();
        assert_eq!(dc_rack.get(TopologyAttribute::Datacenter), DEFAULT_DC);
        assert_eq!(dc_rack.get(TopologyAttribute::Rack), DEFAULT_RACK);
        assert_eq!(TopologyAttribute::Datacenter.default_value(), "UNKNOWN_DC");
        assert_eq!(TopologyAttribute::Rack.default_value(), "UNKNOWN_RACK");
    }

    #[test]
    fn should_select_attribute() {
        let dc_rack = EndpointDcRack::new("dc1".into(), "r1".into());
        assert_eq!(dc_rack.get(TopologyAttribute::Datacenter), "dc1");
        assert_eq!(dc_rack.get(TopologyAttribute::Rack), "r1");
    }
}

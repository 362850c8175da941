//! Live membership state, as seen through the gossip subsystem.

use derive_more::{Constructor, Display};
use fxhash::FxHashMap;
#[cfg(test)]
use mockall::automock;
use std::net::IpAddr;

use crate::topology::TopologyAttribute;

/// Application states a node advertises about itself.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Display)]
pub enum ApplicationState {
    Status,
    Load,
    SchemaVersion,
    Dc,
    Rack,
    ReleaseVersion,
    RpcAddress,
    HostId,
}

impl From<TopologyAttribute> for ApplicationState {
    fn from(attribute: TopologyAttribute) -> Self {
        match attribute {
            TopologyAttribute::Datacenter => ApplicationState::Dc,
            TopologyAttribute::Rack => ApplicationState::Rack,
        }
    }
}

/// A single application state value along with the version it was published with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Constructor)]
pub struct VersionedValue {
    pub value: String,
    pub version: u64,
}

/// Current state of a peer, as known by membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointState {
    application_states: FxHashMap<ApplicationState, VersionedValue>,
}

impl EndpointState {
    pub fn new(application_states: FxHashMap<ApplicationState, VersionedValue>) -> Self {
        EndpointState { application_states }
    }

    #[inline]
    pub fn application_state(&self, key: ApplicationState) -> Option<&VersionedValue> {
        self.application_states.get(&key)
    }

    /// Adds or replaces a state, keeping the newer version.
    pub fn add_application_state(&mut self, key: ApplicationState, value: VersionedValue) {
        match self.application_states.get(&key) {
            Some(current) if current.version > value.version => {}
            _ => {
                self.application_states.insert(key, value);
            }
        }
    }

    /// Builder-style variant of [`Self::add_application_state`].
    pub fn with_application_state(mut self, key: ApplicationState, value: VersionedValue) -> Self {
        self.add_application_state(key, value);
        self
    }
}

/// Source of live per-peer state. Expected to be an in-memory structure, so lookups do not block.
#[cfg_attr(test, automock)]
pub trait MembershipProvider {
    /// Returns the current state of given endpoint, if membership knows about it.
    fn endpoint_state(&self, endpoint: IpAddr) -> Option<EndpointState>;
}

/// Provides the address other nodes use to reach the local node.
#[cfg_attr(test, automock)]
pub trait BroadcastAddressProvider {
    fn broadcast_address(&self) -> IpAddr;
}

impl BroadcastAddressProvider for IpAddr {
    #[inline]
    fn broadcast_address(&self) -> IpAddr {
        *self
    }
}

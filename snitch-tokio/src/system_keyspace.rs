//! Persisted topology of previously seen endpoints.

use fxhash::FxHashMap;
use std::net::IpAddr;

use crate::error::Result;
use crate::topology::EndpointDcRack;
use crate::BoxFuture;

/// Snapshot of persisted endpoint topology.
pub type SavedEndpoints = FxHashMap<IpAddr, EndpointDcRack>;

/// Durable, node-local record of endpoint to dc/rack associations.
pub trait SavedTopologyStore {
    /// Loads the whole snapshot of saved endpoints.
    fn load_dc_rack_info(&self) -> BoxFuture<Result<SavedEndpoints>>;
}

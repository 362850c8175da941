use fxhash::FxHashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use snitch_tokio::gossip::{ApplicationState, EndpointState, MembershipProvider, VersionedValue};
use snitch_tokio::system_keyspace::{SavedEndpoints, SavedTopologyStore};
use snitch_tokio::topology::EndpointDcRack;
use snitch_tokio::{BoxFuture, Result};

pub const LOCAL: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
pub const LIVE_PEER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
pub const SAVED_PEER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3));
#[allow(dead_code)]
pub const STRANGER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 4));

/// Membership with a fixed view of the cluster.
#[derive(Default)]
pub struct StaticMembership {
    states: FxHashMap<IpAddr, EndpointState>,
}

impl StaticMembership {
    pub fn with_peer(mut self, endpoint: IpAddr, dc: &str, rack: &str) -> Self {
        let state = EndpointState::default()
            .with_application_state(ApplicationState::Dc, VersionedValue::new(dc.into(), 1))
            .with_application_state(ApplicationState::Rack, VersionedValue::new(rack.into(), 1));
        self.states.insert(endpoint, state);
        self
    }
}

impl MembershipProvider for StaticMembership {
    fn endpoint_state(&self, endpoint: IpAddr) -> Option<EndpointState> {
        self.states.get(&endpoint).cloned()
    }
}

/// Persisted store which counts snapshot loads.
#[derive(Default)]
pub struct StaticStore {
    saved_endpoints: SavedEndpoints,
    loads: AtomicUsize,
}

impl StaticStore {
    pub fn with_peer(mut self, endpoint: IpAddr, dc: &str, rack: &str) -> Self {
        self.saved_endpoints
            .insert(endpoint, EndpointDcRack::new(dc.into(), rack.into()));
        self
    }

    #[allow(dead_code)]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl SavedTopologyStore for StaticStore {
    fn load_dc_rack_info(&self) -> BoxFuture<Result<SavedEndpoints>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Box::pin(async move { Ok(self.saved_endpoints.clone()) })
    }
}

/// A property file in the temp dir, removed on drop.
pub struct TempPropertyFile {
    path: PathBuf,
}

impl TempPropertyFile {
    pub fn new(contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "cassandra-rackdc-{}.properties",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, contents).expect("write property file");
        TempPropertyFile { path }
    }

    /// A path which is guaranteed not to exist.
    #[allow(dead_code)]
    pub fn missing() -> PathBuf {
        std::env::temp_dir().join(format!("missing-{}.properties", uuid::Uuid::new_v4()))
    }

    #[allow(dead_code)]
    pub fn rewrite(&self, contents: &str) {
        std::fs::write(&self.path, contents).expect("rewrite property file");
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TempPropertyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

use arc_swap::ArcSwap;
use derivative::Derivative;
use futures::future::Shared;
use futures::FutureExt;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::*;

use crate::error::Result;
use crate::gossip::{BroadcastAddressProvider, MembershipProvider};
use crate::properties::RackDcProperties;
use crate::system_keyspace::{SavedEndpoints, SavedTopologyStore};
use crate::topology::{TopologyAttribute, DEFAULT_DC, DEFAULT_RACK};
use crate::BoxFuture;

type SavedEndpointsLoad = Shared<BoxFuture<'static, Result<Arc<SavedEndpoints>>>>;

// Persisted topology together with the load attempt which is currently filling it. Invalidation
// swaps the whole slot, so a late attempt can only publish into a slot nobody looks at anymore.
#[derive(Default)]
struct SavedEndpointsSlot {
    loaded: OnceCell<Arc<SavedEndpoints>>,
    in_flight: Mutex<Option<SavedEndpointsLoad>>,
}

impl SavedEndpointsSlot {
    fn in_flight(&self) -> MutexGuard<'_, Option<SavedEndpointsLoad>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Topology of the local node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverState {
    pub my_dc: String,
    pub my_rack: String,
    pub prefer_local: bool,
}

impl Default for ResolverState {
    fn default() -> Self {
        ResolverState {
            my_dc: DEFAULT_DC.into(),
            my_rack: DEFAULT_RACK.into(),
            prefer_local: false,
        }
    }
}

impl From<&RackDcProperties> for ResolverState {
    fn from(properties: &RackDcProperties) -> Self {
        ResolverState {
            my_dc: properties.datacenter(),
            my_rack: properties.rack().into(),
            prefer_local: properties.prefer_local(),
        }
    }
}

/// Resolves endpoint topology using, in order: knowledge about the local node, live membership
/// state, persisted topology of previously seen endpoints and finally static defaults.
///
/// Persisted topology is loaded lazily, once, on the first lookup which needs it. Concurrent
/// lookups wait for the same load, and all of them see its failure if it fails. A failed load is
/// retried on the next lookup.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct EndpointInfoResolver {
    #[derivative(Debug = "ignore")]
    membership: Arc<dyn MembershipProvider + Send + Sync>,
    #[derivative(Debug = "ignore")]
    saved_topology_store: Arc<dyn SavedTopologyStore + Send + Sync>,
    #[derivative(Debug = "ignore")]
    broadcast_address_provider: Arc<dyn BroadcastAddressProvider + Send + Sync>,
    state: ArcSwap<ResolverState>,
    #[derivative(Debug = "ignore")]
    saved_endpoints: ArcSwap<SavedEndpointsSlot>,
}

impl EndpointInfoResolver {
    pub fn new(
        membership: Arc<dyn MembershipProvider + Send + Sync>,
        saved_topology_store: Arc<dyn SavedTopologyStore + Send + Sync>,
        broadcast_address_provider: Arc<dyn BroadcastAddressProvider + Send + Sync>,
    ) -> Self {
        EndpointInfoResolver {
            membership,
            saved_topology_store,
            broadcast_address_provider,
            state: Default::default(),
            saved_endpoints: Default::default(),
        }
    }

    /// Returns the value of given attribute for given endpoint. Never fails.
    pub async fn resolve(&self, endpoint: IpAddr, attribute: TopologyAttribute) -> String {
        if endpoint == self.broadcast_address_provider.broadcast_address() {
            let state = self.state.load();
            return match attribute {
                TopologyAttribute::Datacenter => state.my_dc.clone(),
                TopologyAttribute::Rack => state.my_rack.clone(),
            };
        }

        self.endpoint_info(endpoint, attribute).await
    }

    #[inline]
    pub async fn datacenter(&self, endpoint: IpAddr) -> String {
        self.resolve(endpoint, TopologyAttribute::Datacenter).await
    }

    #[inline]
    pub async fn rack(&self, endpoint: IpAddr) -> String {
        self.resolve(endpoint, TopologyAttribute::Rack).await
    }

    /// Snapshot of local node topology.
    #[inline]
    pub fn state(&self) -> Arc<ResolverState> {
        self.state.load_full()
    }

    #[inline]
    pub fn prefer_local(&self) -> bool {
        self.state.load().prefer_local
    }

    pub fn set_my_datacenter(&self, datacenter: String) {
        self.state.rcu(|state| ResolverState {
            my_dc: datacenter.clone(),
            ..ResolverState::clone(state)
        });
    }

    pub fn set_my_rack(&self, rack: String) {
        self.state.rcu(|state| ResolverState {
            my_rack: rack.clone(),
            ..ResolverState::clone(state)
        });
    }

    pub fn set_prefer_local(&self, prefer_local: bool) {
        self.state.rcu(|state| ResolverState {
            prefer_local,
            ..ResolverState::clone(state)
        });
    }

    /// Replaces local node topology with the one declared in properties.
    pub fn apply_properties(&self, properties: &RackDcProperties) {
        self.state.store(Arc::new(properties.into()));
    }

    /// Drops persisted topology, so the next lookup which needs it loads a fresh snapshot.
    pub fn invalidate_saved_endpoints(&self) {
        self.saved_endpoints.store(Default::default());
    }

    #[inline]
    pub fn is_saved_endpoints_loaded(&self) -> bool {
        self.saved_endpoints.load().loaded.initialized()
    }

    async fn endpoint_info(&self, endpoint: IpAddr, attribute: TopologyAttribute) -> String {
        // first, look in live membership state...
        let live_value = self.membership.endpoint_state(endpoint).and_then(|state| {
            state
                .application_state(attribute.into())
                .map(|value| value.value.clone())
        });

        if let Some(value) = live_value {
            return value;
        }

        // ...if not found - look in persisted topology...
        let saved_endpoints = self.saved_endpoints().await;

        match saved_endpoints {
            Ok(saved_endpoints) => {
                if let Some(dc_rack) = saved_endpoints.get(&endpoint) {
                    return dc_rack.get(attribute).to_string();
                }
            }
            Err(error) => {
                warn!(%error, %endpoint, "Error loading saved endpoint topology.");
            }
        }

        // ...if still not found - return a default value
        attribute.default_value().to_string()
    }

    async fn saved_endpoints(&self) -> Result<Arc<SavedEndpoints>> {
        let slot = self.saved_endpoints.load_full();
        if let Some(saved_endpoints) = slot.loaded.get() {
            return Ok(saved_endpoints.clone());
        }

        let load = {
            let mut in_flight = slot.in_flight();

            // the previous attempt might have succeeded while we were waiting for the lock
            if let Some(saved_endpoints) = slot.loaded.get() {
                return Ok(saved_endpoints.clone());
            }

            in_flight
                .get_or_insert_with(|| self.start_saved_endpoints_load())
                .clone()
        };

        let result = load.await;

        {
            let mut in_flight = slot.in_flight();
            if let Ok(saved_endpoints) = &result {
                let _ = slot.loaded.set(saved_endpoints.clone());
            }

            // whoever comes after a finished attempt starts a new one
            if in_flight
                .as_ref()
                .is_some_and(|current| current.peek().is_some())
            {
                *in_flight = None;
            }
        }

        result
    }

    fn start_saved_endpoints_load(&self) -> SavedEndpointsLoad {
        debug!("Loading saved endpoint topology.");

        let saved_topology_store = self.saved_topology_store.clone();
        async move {
            saved_topology_store
                .load_dc_rack_info()
                .await
                .map(Arc::new)
        }
        .boxed()
        .shared()
    }
}

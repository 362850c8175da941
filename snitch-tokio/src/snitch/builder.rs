use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::conf::default_property_file_path;
use crate::gossip::{BroadcastAddressProvider, MembershipProvider};
use crate::parser::{PropertyFileParser, UnknownKeyPolicy};
use crate::snitch::endpoint_info::EndpointInfoResolver;
use crate::snitch::property_file::PropertyFileSnitch;
use crate::snitch::property_file_loader::PropertyFileLoader;
use crate::system_keyspace::SavedTopologyStore;

/// How often the property file is checked for changes by default.
pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(60);

/// Builder structure that helps to configure a [`PropertyFileSnitch`].
pub struct PropertyFileSnitchBuilder {
    membership: Arc<dyn MembershipProvider + Send + Sync>,
    saved_topology_store: Arc<dyn SavedTopologyStore + Send + Sync>,
    broadcast_address_provider: Arc<dyn BroadcastAddressProvider + Send + Sync>,
    property_file: Option<PathBuf>,
    unknown_key_policy: UnknownKeyPolicy,
    reload_interval: Option<Duration>,
}

impl PropertyFileSnitchBuilder {
    pub fn new(
        membership: Arc<dyn MembershipProvider + Send + Sync>,
        saved_topology_store: Arc<dyn SavedTopologyStore + Send + Sync>,
        broadcast_address_provider: Arc<dyn BroadcastAddressProvider + Send + Sync>,
    ) -> Self {
        PropertyFileSnitchBuilder {
            membership,
            saved_topology_store,
            broadcast_address_provider,
            property_file: None,
            unknown_key_policy: Default::default(),
            reload_interval: Some(DEFAULT_RELOAD_INTERVAL),
        }
    }

    /// Sets the property file location. Defaults to `cassandra-rackdc.properties` in the node
    /// configuration directory.
    pub fn with_property_file(mut self, property_file: impl Into<PathBuf>) -> Self {
        self.property_file = Some(property_file.into());
        self
    }

    /// Sets the policy for unrecognized property keys. Rejects them by default.
    pub fn with_unknown_key_policy(mut self, unknown_key_policy: UnknownKeyPolicy) -> Self {
        self.unknown_key_policy = unknown_key_policy;
        self
    }

    /// Sets how often the property file is checked for changes. `None` or a zero interval disables
    /// checking.
    pub fn with_reload_interval(mut self, reload_interval: Option<Duration>) -> Self {
        self.reload_interval = reload_interval;
        self
    }

    /// Finalizes building process
    pub fn build(self) -> PropertyFileSnitch {
        let property_file = self
            .property_file
            .unwrap_or_else(default_property_file_path);

        let parser =
            PropertyFileParser::new(property_file).with_unknown_key_policy(self.unknown_key_policy);

        PropertyFileSnitch::new(
            EndpointInfoResolver::new(
                self.membership,
                self.saved_topology_store,
                self.broadcast_address_provider,
            ),
            PropertyFileLoader::new(parser),
            self.reload_interval,
        )
    }
}

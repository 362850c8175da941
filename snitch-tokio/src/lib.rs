//! **snitch-tokio** resolves the datacenter and rack of cluster nodes.
//!
//! ## Getting started
//!
//! A node declares its own topology in a `cassandra-rackdc.properties` file. Topology of other
//! nodes comes from live membership state, then from the persisted store of previously seen
//! nodes, and finally falls back to `UNKNOWN_DC`/`UNKNOWN_RACK`.
//!
//! ```no_run
//! use snitch_tokio::snitch::PropertyFileSnitchBuilder;
//! # use snitch_tokio::gossip::{EndpointState, MembershipProvider};
//! # use snitch_tokio::system_keyspace::{SavedEndpoints, SavedTopologyStore};
//! # use snitch_tokio::BoxFuture;
//! use std::net::{IpAddr, Ipv4Addr};
//! use std::sync::Arc;
//!
//! # struct Gossiper;
//! # impl MembershipProvider for Gossiper {
//! #     fn endpoint_state(&self, _endpoint: IpAddr) -> Option<EndpointState> { None }
//! # }
//! # struct SystemKeyspace;
//! # impl SavedTopologyStore for SystemKeyspace {
//! #     fn load_dc_rack_info(&self) -> BoxFuture<snitch_tokio::Result<SavedEndpoints>> {
//! #         Box::pin(async { Ok(SavedEndpoints::default()) })
//! #     }
//! # }
//! #[tokio::main]
//! async fn main() {
//!     let broadcast_address = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
//!     let snitch = PropertyFileSnitchBuilder::new(
//!         Arc::new(Gossiper),
//!         Arc::new(SystemKeyspace),
//!         Arc::new(broadcast_address),
//!     )
//!     .with_property_file("/etc/node/cassandra-rackdc.properties")
//!     .build();
//!
//!     snitch.start().await.expect("Invalid topology declaration");
//!
//!     let dc = snitch.datacenter(broadcast_address).await;
//!     println!("Running in {dc}");
//! }
//! ```

pub mod gossip;
pub mod lifecycle;
pub mod snitch;
pub mod system_keyspace;

pub use snitch_core::conf;
pub use snitch_core::error;
pub use snitch_core::parser;
pub use snitch_core::properties;
pub use snitch_core::property_table;
pub use snitch_core::topology;

pub type Error = error::Error;
pub type Result<T> = error::Result<T>;

/// An owned dynamically typed [`Future`](std::future::Future) for use in cases where you can't
/// statically type your result or need to add some indirection.
pub type BoxFuture<'a, T> = futures::future::BoxFuture<'a, T>;

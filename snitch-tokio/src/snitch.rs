//! Snitches map cluster endpoints to their datacenter and rack.

mod builder;
mod endpoint_info;
mod property_file;
mod property_file_loader;
mod simple;

pub use self::builder::{PropertyFileSnitchBuilder, DEFAULT_RELOAD_INTERVAL};
pub use self::endpoint_info::{EndpointInfoResolver, ResolverState};
pub use self::property_file::PropertyFileSnitch;
pub use self::property_file_loader::PropertyFileLoader;
pub use self::simple::SimpleSnitch;

use std::net::IpAddr;

use crate::error::Result;
use crate::BoxFuture;

/// Topology strategy. Implementations are expected to answer queries without failing, falling back
/// to defaults when nothing is known about an endpoint. Setters are meant for configuration time.
pub trait Snitch: Send + Sync {
    /// Human readable name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns the datacenter given endpoint is in.
    fn datacenter(&self, endpoint: IpAddr) -> BoxFuture<String>;

    /// Returns the rack given endpoint is in.
    fn rack(&self, endpoint: IpAddr) -> BoxFuture<String>;

    fn set_my_datacenter(&self, datacenter: String);

    fn set_my_rack(&self, rack: String);

    fn set_prefer_local(&self, prefer_local: bool);

    /// Should the private address be used for nodes in the local datacenter.
    fn prefer_local(&self) -> bool;

    /// Loads configuration and starts background I/O. Configuration errors are fatal.
    fn start(&self) -> BoxFuture<Result<()>>;

    /// Stops background I/O.
    fn stop(&self) -> BoxFuture<()>;
}

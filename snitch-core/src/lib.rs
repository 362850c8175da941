//! Building blocks for resolving the datacenter and rack of cluster nodes.
//! Used by snitch-tokio, but has no runtime dependencies of its own.

pub mod conf;
pub mod error;
pub mod parser;
pub mod properties;
pub mod property_table;
pub mod report;
pub mod topology;

pub type Error = error::Error;
pub type Result<T> = error::Result<T>;

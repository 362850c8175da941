//! Location of node configuration.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Default name of the rack/dc property file.
pub const SNITCH_PROPERTIES_FILENAME: &str = "cassandra-rackdc.properties";

/// Overrides the configuration directory.
pub const CONF_DIR_ENV: &str = "CASSANDRA_CONF";
/// Installation root; configuration is expected in its `conf` subdirectory.
pub const HOME_DIR_ENV: &str = "CASSANDRA_HOME";

const CONF_SUBDIR: &str = "conf";

/// Returns the node configuration directory: `$CASSANDRA_CONF`, then `$CASSANDRA_HOME/conf`,
/// then `conf` relative to the working directory.
pub fn conf_dir() -> PathBuf {
    resolve_conf_dir(env::var_os(CONF_DIR_ENV), env::var_os(HOME_DIR_ENV))
}

/// Default location of the rack/dc property file within [`conf_dir`].
pub fn default_property_file_path() -> PathBuf {
    conf_dir().join(SNITCH_PROPERTIES_FILENAME)
}

fn resolve_conf_dir(conf_dir: Option<OsString>, home_dir: Option<OsString>) -> PathBuf {
    match (conf_dir, home_dir) {
        (Some(conf_dir), _) if !conf_dir.is_empty() => conf_dir.into(),
        (_, Some(home_dir)) if !home_dir.is_empty() => PathBuf::from(home_dir).join(CONF_SUBDIR),
        _ => PathBuf::from(CONF_SUBDIR),
    }
}

use derive_more::Display;
use std::io;
use std::path::PathBuf;
use std::result;
use thiserror::Error as ThisError;

use crate::property_table::PropertyKey;

pub type Result<T> = result::Result<T, Error>;

/// Snitch error type. Configuration errors are fatal and must stop node startup, while collaborator
/// errors are only reported and never leak out of topology queries.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The rack/dc property file is invalid.
    #[error(transparent)]
    BadPropertyFile(#[from] BadPropertyFileError),
    /// The property file could not be read.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// General error
    #[error("General error: {0}")]
    General(String),
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::General(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Error {
        Error::General(err.to_string())
    }
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Error::BadPropertyFile(error) => Error::BadPropertyFile(error.clone()),
            Error::Io { path, source } => Error::Io {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
            Error::General(error) => Error::General(error.clone()),
        }
    }
}

/// A property file was rejected. Carries the file path and the rule which was violated.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("Bad property file {}: {violation}", .path.display())]
pub struct BadPropertyFileError {
    pub path: PathBuf,
    pub violation: PropertyViolation,
}

/// Rules a rack/dc property file can violate.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PropertyViolation {
    /// The same key is declared more than once.
    #[display("double \"{key}\" declaration")]
    DoubleDeclaration { key: String },
    /// A line is not a `key=value` pair.
    #[display("bad format: {line}")]
    BadFormat { line: String },
    /// A key outside of the supported set.
    #[display("unrecognized property \"{key}\"")]
    UnrecognizedKey { key: String },
    /// Obligatory `dc` or `rack` is missing.
    #[display("incomplete file, some obligatory fields are missing")]
    IncompleteFile,
    /// A known key has a value which cannot be interpreted.
    #[display("invalid value \"{value}\" for \"{key}\"")]
    InvalidValue { key: PropertyKey, value: String },
}

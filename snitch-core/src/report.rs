//! Reporting of property file violations. Every rejection is logged together with the file path
//! and the offending detail before being handed back to the caller.

use std::path::Path;
use tracing::*;

use crate::error::{BadPropertyFileError, PropertyViolation};
use crate::property_table::PropertyKey;

pub fn double_declaration(path: &Path, key: &str) -> BadPropertyFileError {
    error!(path = %path.display(), key, "Double property declaration.");
    reject(
        path,
        PropertyViolation::DoubleDeclaration {
            key: key.to_string(),
        },
    )
}

pub fn bad_format(path: &Path, line: &str) -> BadPropertyFileError {
    error!(path = %path.display(), line, "Bad format in properties file.");
    reject(
        path,
        PropertyViolation::BadFormat {
            line: line.to_string(),
        },
    )
}

pub fn unrecognized_key(path: &Path, key: &str) -> BadPropertyFileError {
    error!(path = %path.display(), key, "Unrecognized property in properties file.");
    reject(
        path,
        PropertyViolation::UnrecognizedKey {
            key: key.to_string(),
        },
    )
}

pub fn incomplete_file(path: &Path) -> BadPropertyFileError {
    error!(
        path = %path.display(),
        "Property file is incomplete. Some obligatory fields are missing."
    );
    reject(path, PropertyViolation::IncompleteFile)
}

pub fn invalid_value(path: &Path, key: PropertyKey, value: &str) -> BadPropertyFileError {
    error!(path = %path.display(), %key, value, "Invalid property value.");
    reject(
        path,
        PropertyViolation::InvalidValue {
            key,
            value: value.to_string(),
        },
    )
}

#[inline]
fn reject(path: &Path, violation: PropertyViolation) -> BadPropertyFileError {
    BadPropertyFileError {
        path: path.to_path_buf(),
        violation,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::PropertyViolation;
    use crate::property_table::PropertyKey;
    use crate::report::{bad_format, double_declaration, invalid_value};

    #[test]
    fn should_carry_path_and_detail() {
        let path = Path::new("/etc/node/cassandra-rackdc.properties");

        let error = double_declaration(path, "dc");
        assert_eq!(error.path, path);
        assert_eq!(
            error.violation,
            PropertyViolation::DoubleDeclaration { key: "dc".into() }
        );

        let error = bad_format(path, "rack r1");
        assert_eq!(
            error.to_string(),
            "Bad property file /etc/node/cassandra-rackdc.properties: bad format: rack r1"
        );
    }

    #[test]
    fn should_name_key_of_invalid_value() {
        let error = invalid_value(Path::new("rackdc"), PropertyKey::PreferLocal, "yes");
        assert_eq!(
            error.to_string(),
            "Bad property file rackdc: invalid value \"yes\" for \"prefer_local\""
        );
    }
}

//! Rack/dc property file grammar.
//!
//! The file is line oriented. Every line is trimmed, empty lines and lines starting with `#` are
//! skipped, and everything else must be a single `key=value` pair with a non-empty key and value.
//! Only [`PropertyKey`]s are accepted and each key may be declared once. `dc` and `rack` are
//! obligatory. Any violation rejects the whole file.

use itertools::Itertools;
use std::path::PathBuf;
use tracing::*;

use crate::error::BadPropertyFileError;
use crate::properties::RackDcProperties;
use crate::property_table::{PropertyKey, PropertyTable};
use crate::report;

const COMMENT_PREFIX: char = '#';
const KEY_VALUE_SEPARATOR: char = '=';

/// What to do with keys outside of the supported set.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum UnknownKeyPolicy {
    /// Reject the whole file.
    #[default]
    Reject,
    /// Log a warning and skip the line. Skipped keys are available in
    /// [`PropertyTable::unrecognized_keys`].
    Warn,
}

/// Parses property file contents into a validated [`PropertyTable`].
#[derive(Debug, Clone)]
pub struct PropertyFileParser {
    path: PathBuf,
    unknown_key_policy: UnknownKeyPolicy,
}

impl PropertyFileParser {
    /// Creates a parser for contents of given file. The path is used for diagnostics only.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PropertyFileParser {
            path: path.into(),
            unknown_key_policy: Default::default(),
        }
    }

    /// Sets the policy for keys outside of the supported set.
    pub fn with_unknown_key_policy(mut self, unknown_key_policy: UnknownKeyPolicy) -> Self {
        self.unknown_key_policy = unknown_key_policy;
        self
    }

    #[inline]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    #[inline]
    pub fn unknown_key_policy(&self) -> UnknownKeyPolicy {
        self.unknown_key_policy
    }

    pub fn parse(&self, contents: &str) -> Result<PropertyTable, BadPropertyFileError> {
        let mut table = PropertyTable::new(self.path.clone());

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            self.parse_line(line, &mut table)?;
        }

        if PropertyKey::ALL
            .iter()
            .filter(|key| key.is_obligatory())
            .any(|key| !table.contains(*key))
        {
            return Err(report::incomplete_file(&self.path));
        }

        Ok(table)
    }

    /// Parses the contents and validates values of the parsed keys.
    pub fn parse_properties(
        &self,
        contents: &str,
    ) -> Result<RackDcProperties, BadPropertyFileError> {
        let table = self.parse(contents)?;
        RackDcProperties::try_from(&table)
    }

    fn parse_line(
        &self,
        line: &str,
        table: &mut PropertyTable,
    ) -> Result<(), BadPropertyFileError> {
        let (key, value) = line
            .split(KEY_VALUE_SEPARATOR)
            .map(str::trim)
            .collect_tuple::<(&str, &str)>()
            .ok_or_else(|| report::bad_format(&self.path, line))?;

        if key.is_empty() || value.is_empty() {
            return Err(report::bad_format(&self.path, line));
        }

        match key.parse::<PropertyKey>() {
            Ok(key) => {
                if table.contains(key) {
                    return Err(report::double_declaration(&self.path, key.as_str()));
                }

                table.insert(key, value.to_string());
            }
            Err(_) => match self.unknown_key_policy {
                UnknownKeyPolicy::Reject => {
                    return Err(report::unrecognized_key(&self.path, key));
                }
                UnknownKeyPolicy::Warn => {
                    if table.has_unrecognized(key) {
                        return Err(report::double_declaration(&self.path, key));
                    }

                    warn!(path = %self.path.display(), key, "Ignoring unrecognized property.");
                    table.push_unrecognized(key.to_string());
                }
            },
        }

        Ok(())
    }
}

use arc_swap::ArcSwapOption;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::*;

use crate::error::{Error, Result};
use crate::parser::PropertyFileParser;
use crate::properties::RackDcProperties;

/// Reads and validates the rack/dc property file. Contents of the last successfully loaded file
/// are retained to detect changes, and the last declaration read by [`Self::load`] is retained as
/// the one in effect.
#[derive(Debug)]
pub struct PropertyFileLoader {
    parser: PropertyFileParser,
    contents: ArcSwapOption<String>,
    properties: ArcSwapOption<RackDcProperties>,
}

impl PropertyFileLoader {
    pub fn new(parser: PropertyFileParser) -> Self {
        PropertyFileLoader {
            parser,
            contents: Default::default(),
            properties: Default::default(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        self.parser.path()
    }

    /// Contents of the last successfully loaded file.
    #[inline]
    pub fn contents(&self) -> Option<Arc<String>> {
        self.contents.load_full()
    }

    /// Declaration read by the last successful [`Self::load`].
    #[inline]
    pub fn properties(&self) -> Option<Arc<RackDcProperties>> {
        self.properties.load_full()
    }

    /// Reads, parses and validates the file.
    pub async fn load(&self) -> Result<RackDcProperties> {
        let contents = self.read().await?;
        let properties = self.parse_and_retain(contents)?;
        self.properties.store(Some(Arc::new(properties.clone())));
        Ok(properties)
    }

    /// Same as [`Self::load`], but returns `None` if file contents did not change since the last
    /// successful load.
    pub async fn load_if_changed(&self) -> Result<Option<RackDcProperties>> {
        let contents = self.read().await?;

        if let Some(previous) = self.contents.load().as_deref() {
            if *previous == contents {
                return Ok(None);
            }
        }

        debug!(path = %self.path().display(), "Property file changed.");
        self.parse_and_retain(contents).map(Some)
    }

    fn parse_and_retain(&self, contents: String) -> Result<RackDcProperties> {
        let properties = self.parser.parse_properties(&contents)?;
        self.contents.store(Some(Arc::new(contents)));
        Ok(properties)
    }

    async fn read(&self) -> Result<String> {
        fs::read_to_string(self.path()).await.map_err(|source| {
            error!(path = %self.path().display(), %source, "Error reading property file.");
            Error::Io {
                path: self.path().to_path_buf(),
                source,
            }
        })
    }
}

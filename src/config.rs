//! Viewer configuration, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::archive::DEFAULT_MAX_ARCHIVE_BYTES;
use crate::builder::directory::DEFAULT_MAX_CONCURRENT_LISTINGS;
use crate::error::{TreeError, TreeResult};
use crate::logging::LoggingConfig;
use crate::render::LabelStyle;

/// Entries requested per page from the local directory reader
pub const DEFAULT_PAGE_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Archives declaring more bytes than this are rejected undecoded
    pub max_archive_bytes: u64,
    /// Start every new tree with all directories closed
    pub collapsed_by_default: bool,
    pub label_style: LabelStyle,
    pub page_size: usize,
    /// Directory listings open at once while building from a live directory
    pub max_concurrent_listings: usize,
    pub logging: LoggingConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            collapsed_by_default: false,
            label_style: LabelStyle::Plain,
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_listings: DEFAULT_MAX_CONCURRENT_LISTINGS,
            logging: LoggingConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml(text: &str) -> TreeResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| TreeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> TreeResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| TreeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> TreeResult<()> {
        if self.page_size == 0 {
            return Err(TreeError::Config("page_size must be at least 1".into()));
        }
        if self.max_concurrent_listings == 0 {
            return Err(TreeError::Config(
                "max_concurrent_listings must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

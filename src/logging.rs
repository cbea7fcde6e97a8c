//! Logging System
//!
//! Structured logging through `tracing`. The subscriber writes to stderr so
//! rendered trees on stdout stay clean for piping.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{TreeError, TreeResult};

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "DROPTREE_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Text
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter from `DROPTREE_LOG` when set, else from the configured level.
    fn filter(&self) -> TreeResult<EnvFilter> {
        match EnvFilter::try_from_env(LOG_ENV) {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| TreeError::Config(format!("invalid log level {:?}: {e}", self.level))),
        }
    }
}

/// Install the global subscriber. Calling it twice is an error.
pub fn init(config: &LoggingConfig) -> TreeResult<()> {
    if !config.enabled {
        return Ok(());
    }
    let filter = config.filter()?;
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| TreeError::Config(format!("failed to initialize logging: {e}")))
}

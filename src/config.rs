//! Declarative logger configuration
//!
//! A [`LoggerConfig`] describes a common setup (minimum level, base fields, a
//! stderr handler) and can be loaded from JSON:
//!
//! ```
//! use chainlog::config::LoggerConfig;
//! use chainlog::LoggerBuilder;
//!
//! let config = LoggerConfig::from_json_str(r#"{
//!     "min_level": "info",
//!     "fields": {"service": "billing"},
//!     "console": {"colors": false, "format": "json"}
//! }"#).unwrap();
//!
//! let logger = LoggerBuilder::from_config(&config).unwrap().build();
//! assert_eq!(logger.interceptor_count(), 1);
//! assert_eq!(logger.handler_count(), 1);
//! ```

use crate::core::{Fields, LogLevel, LoggerBuilder, LoggerError, Result, TimestampFormat};
use crate::handlers::{DevHandler, JsonHandler};
use crate::interceptors::LevelFilter;
use serde::{Deserialize, Serialize};

/// Output format of the configured console handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colorized text lines ([`DevHandler`])
    #[default]
    Text,

    /// One JSON object per line ([`JsonHandler`])
    Json,
}

/// Console (stderr) handler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub colors: bool,
    pub format: OutputFormat,
    /// Only used by the JSON format
    pub timestamp: TimestampFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            colors: true,
            format: OutputFormat::Text,
            timestamp: TimestampFormat::default(),
        }
    }
}

/// Logger settings loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Events below this level are stopped by a [`LevelFilter`]
    pub min_level: Option<LogLevel>,
    /// Base fields attached to every event
    pub fields: Fields,
    /// Stderr handler, if any
    pub console: Option<ConsoleConfig>,
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.keys().any(|key| key.is_empty()) {
            return Err(LoggerError::config("fields", "field names must not be empty"));
        }

        if let Some(console) = &self.console {
            console.timestamp.validate()?;
        }

        Ok(())
    }
}

impl LoggerBuilder {
    /// Create a builder from a configuration
    ///
    /// Installs a [`LevelFilter`] when `min_level` is set, the base fields, and
    /// a stderr handler when `console` is set.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = LoggerBuilder::new().add_fields(config.fields.clone());

        if let Some(min_level) = config.min_level {
            builder = builder.add_interceptor(LevelFilter::new(min_level));
        }

        if let Some(console) = &config.console {
            builder = match console.format {
                OutputFormat::Text => {
                    builder.add_handler(DevHandler::stderr().with_colors(console.colors))
                }
                OutputFormat::Json => builder.add_handler(
                    JsonHandler::stderr().with_timestamp_format(console.timestamp.clone()),
                ),
            };
        }

        Ok(builder)
    }
}

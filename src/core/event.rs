//! Event structure

use super::clock;
use super::field::{format_fields, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One leveled, timestamped log record.
///
/// Events are built by [`Logger`](super::Logger) at dispatch time and handed to
/// interceptors and handlers by shared reference, one after another. No
/// interceptor or handler may assume exclusive access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub fields: Fields,
}

impl Event {
    /// Build an event stamped with the process clock
    pub fn new(level: LogLevel, message: impl Into<String>, fields: Fields) -> Self {
        Self::at(clock::now(), level, message, fields)
    }

    pub fn at(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        fields: Fields,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp,
            fields,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp={} level={} message={} fields={}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level,
            self.message,
            format_fields(&self.fields)
        )
    }
}

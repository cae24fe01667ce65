//! JSON handler for structured logging

use crate::core::{Event, Handler, Result, TimestampFormat};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes each event as a single-line JSON object (JSONL format)
///
/// ```text
/// {"timestamp":"2025-01-08T10:30:45.123+00:00","level":"info","message":"ready","fields":{"port":8080}}
/// ```
pub struct JsonHandler {
    writer: Mutex<Box<dyn Write + Send>>,
    timestamp_format: TimestampFormat,
}

impl JsonHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Append to a file, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self::new(BufWriter::new(file)))
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn to_json(&self, event: &Event) -> Result<String> {
        let fields: serde_json::Map<String, serde_json::Value> = event
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();

        let object = serde_json::json!({
            "timestamp": self.timestamp_format.to_json_value(&event.timestamp),
            "level": event.level.name(),
            "message": event.message,
            "fields": fields,
        });

        Ok(serde_json::to_string(&object)?)
    }
}

impl Handler for JsonHandler {
    fn handle(&self, event: &Event) -> Result<()> {
        let json = self.to_json(event)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

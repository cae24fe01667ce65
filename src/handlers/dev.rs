//! Human-readable, colorized handler for development consoles

use crate::core::field::sorted;
use crate::core::{clock, Event, Handler, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Writes one line per event:
///
/// ```text
///   INFO[0003] server listening           port=8080
/// ```
///
/// The bracketed counter is whole seconds elapsed since the handler was
/// created, measured with the process clock. The level label and field keys
/// are colored by level unless colors are disabled. Writes are serialized, so
/// the sink does not need to be thread safe.
pub struct DevHandler {
    writer: Mutex<Box<dyn Write + Send>>,
    start: DateTime<Utc>,
    use_colors: bool,
}

impl DevHandler {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            start: clock::now(),
            use_colors: true,
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Escape line breaks and tabs so one event stays on one line
    fn sanitize(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn format_line(&self, event: &Event) -> String {
        let color = event.level.color();
        let elapsed = (clock::now() - self.start).num_seconds().max(0);

        let label = format!("{:>6}", event.level.label());
        let label = if self.use_colors {
            label.color(color).to_string()
        } else {
            label
        };

        let mut line = format!(
            "{}[{:04}] {:<25}",
            label,
            elapsed,
            Self::sanitize(&event.message)
        );

        for (key, value) in sorted(&event.fields) {
            let key = if self.use_colors {
                key.as_str().color(color).to_string()
            } else {
                key.clone()
            };
            line.push_str(&format!(" {}={}", key, Self::sanitize(&value.to_string())));
        }

        line
    }
}

impl Handler for DevHandler {
    fn handle(&self, event: &Event) -> Result<()> {
        let line = self.format_line(event);
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "dev"
    }
}

//! In-memory handler that records every event it receives

use crate::core::{Event, Handler, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Records events in memory.
///
/// Clones share the same buffer: hand one clone to the builder and keep
/// another to inspect what was logged.
///
/// # Example
///
/// ```
/// use chainlog::prelude::*;
///
/// let memory = MemoryHandler::new();
/// let logger = Logger::builder().add_handler(memory.clone()).build();
///
/// logger.info(None, "hello");
/// assert_eq!(memory.events()[0].message, "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHandler {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn last(&self) -> Option<Event> {
        self.events.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Remove and return every recorded event
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl Handler for MemoryHandler {
    fn handle(&self, event: &Event) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

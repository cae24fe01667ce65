//! Handler trait for event output destinations

use super::{error::Result, event::Event};
use std::fmt;

/// A sink receiving every event that passes the interceptor chain.
///
/// Handlers produce side effects only. An `Err` is reported by the logger and
/// never stops the remaining handlers.
pub trait Handler: Send + Sync {
    fn handle(&self, event: &Event) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "handler"
    }
}

/// Adapts a plain function or closure into a [`Handler`].
pub struct HandlerFn<F>(F);

impl<F> HandlerFn<F>
where
    F: Fn(&Event) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Event) + Send + Sync,
{
    fn handle(&self, event: &Event) -> Result<()> {
        (self.0)(event);
        Ok(())
    }

    fn name(&self) -> &str {
        "fn"
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerFn")
    }
}

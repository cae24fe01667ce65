//! Interceptor trait for gating events before handlers run

use super::event::Event;
use std::fmt;

/// A gate evaluated before any handler sees an event.
///
/// Returning `true` stops the event: no later interceptor and no handler runs.
/// Returning `false` lets the event continue down the chain.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, event: &Event) -> bool;
}

/// Adapts a plain function or closure into an [`Interceptor`].
///
/// # Example
///
/// ```
/// use chainlog::prelude::*;
///
/// let drop_health_checks = InterceptorFn::new(|event: &Event| event.message == "health check");
/// let logger = Logger::builder().add_interceptor(drop_health_checks).build();
/// logger.info(None, "health check");
/// ```
pub struct InterceptorFn<F>(F);

impl<F> InterceptorFn<F>
where
    F: Fn(&Event) -> bool + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Interceptor for InterceptorFn<F>
where
    F: Fn(&Event) -> bool + Send + Sync,
{
    fn intercept(&self, event: &Event) -> bool {
        (self.0)(event)
    }
}

impl<F> fmt::Debug for InterceptorFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InterceptorFn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use parking_lot::Mutex;

    #[test]
    fn test_interceptor_fn_forwards_event() {
        let seen = Mutex::new(Vec::new());
        let interceptor = InterceptorFn::new(|event: &Event| {
            seen.lock().push((event.level, event.message.clone()));
            true
        });

        let stop = interceptor.intercept(&Event::new(LogLevel::Debug, "test", Fields::new()));

        assert!(stop);
        assert_eq!(*seen.lock(), vec![(LogLevel::Debug, "test".to_string())]);
    }

    #[test]
    fn test_interceptor_fn_as_trait_object() {
        let interceptors: Vec<Box<dyn Interceptor>> = vec![
            Box::new(InterceptorFn::new(|_: &Event| false)),
            Box::new(InterceptorFn::new(|e: &Event| e.level == LogLevel::Debug)),
        ];
        let event = Event::new(LogLevel::Debug, "x", Fields::new());

        let decisions: Vec<bool> = interceptors.iter().map(|i| i.intercept(&event)).collect();
        assert_eq!(decisions, vec![false, true]);
    }
}

//! Logger metrics for observability
//!
//! Counters describing what the dispatch pipeline did: how many events were
//! dispatched, how many an interceptor stopped, and how many interceptor or
//! handler calls failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use chainlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_short_circuited();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.short_circuited(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Events that entered dispatch
    dispatched: AtomicU64,

    /// Events stopped by an interceptor
    short_circuited: AtomicU64,

    /// Successful handler invocations
    handled: AtomicU64,

    /// Handler invocations that returned an error or panicked
    handler_failures: AtomicU64,

    /// Interceptor invocations that panicked
    interceptor_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            short_circuited: AtomicU64::new(0),
            handled: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
            interceptor_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn short_circuited(&self) -> u64 {
        self.short_circuited.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn interceptor_failures(&self) -> u64 {
        self.interceptor_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_short_circuited(&self) -> u64 {
        self.short_circuited.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handled(&self) -> u64 {
        self.handled.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_interceptor_failure(&self) -> u64 {
        self.interceptor_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of dispatched events stopped by an interceptor, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn short_circuit_rate(&self) -> f64 {
        let dispatched = self.dispatched() as f64;
        if dispatched == 0.0 {
            0.0
        } else {
            (self.short_circuited() as f64 / dispatched) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.short_circuited.store(0, Ordering::Relaxed);
        self.handled.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
        self.interceptor_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            short_circuited: AtomicU64::new(self.short_circuited()),
            handled: AtomicU64::new(self.handled()),
            handler_failures: AtomicU64::new(self.handler_failures()),
            interceptor_failures: AtomicU64::new(self.interceptor_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.short_circuited(), 0);
        assert_eq!(metrics.handled(), 0);
        assert_eq!(metrics.handler_failures(), 0);
        assert_eq!(metrics.interceptor_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_handler_failure(), 0);
        assert_eq!(metrics.record_handler_failure(), 1);
        assert_eq!(metrics.handler_failures(), 2);
    }

    #[test]
    fn test_short_circuit_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.short_circuit_rate(), 0.0);

        for _ in 0..8 {
            metrics.record_dispatched();
        }
        for _ in 0..2 {
            metrics.record_short_circuited();
        }

        let rate = metrics.short_circuit_rate();
        assert!((24.9..=25.1).contains(&rate), "Short-circuit rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();
        metrics.record_handled();
        metrics.record_interceptor_failure();

        metrics.reset();

        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.handled(), 0);
        assert_eq!(metrics.interceptor_failures(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();

        let snapshot = metrics.clone();
        metrics.record_dispatched();

        assert_eq!(metrics.dispatched(), 2);
        assert_eq!(snapshot.dispatched(), 1);
    }
}

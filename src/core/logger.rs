//! Main logger implementation

use super::{
    clock,
    error::{LoggerError, Result},
    event::Event,
    field::{merge, FieldValue, Fields},
    handler::{Handler, HandlerFn},
    interceptor::{Interceptor, InterceptorFn},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// An immutable dispatch pipeline: interceptors, handlers and base fields.
///
/// Built once by [`LoggerBuilder`]. Derive a differently configured logger with
/// [`Logger::to_builder`] instead of mutating this one.
///
/// Each dispatch is one critical section: merging fields, running the
/// interceptor chain and fanning out to handlers happen under a per-logger
/// lock, so handler output for two events never interleaves. Share a logger
/// between threads with `Arc<Logger>`.
///
/// The lock is not reentrant: an interceptor or handler must not log through
/// the logger that is dispatching to it.
pub struct Logger {
    interceptors: Vec<Arc<dyn Interceptor>>,
    handlers: Vec<Arc<dyn Handler>>,
    fields: Fields,
    dispatch_lock: Mutex<()>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use chainlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .add_interceptor(LevelFilter::new(LogLevel::Info))
    ///     .add_handler(DevHandler::stderr())
    ///     .add_field("service", "billing")
    ///     .build();
    ///
    /// logger.info(None, "service started");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Copy this logger's configuration into a new builder.
    ///
    /// The builder shares the interceptor and handler instances but owns its
    /// own lists and fields, so changing it never affects `self`.
    #[must_use]
    pub fn to_builder(&self) -> LoggerBuilder {
        LoggerBuilder::from_logger(self)
    }

    /// A new logger identical to this one plus one default field
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.to_builder().add_field(key, value).build()
    }

    /// Base fields applied to every event
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch counters for this logger
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn debug<'a>(&self, fields: impl Into<Option<&'a Fields>>, message: impl Into<String>) {
        self.dispatch(LogLevel::Debug, message.into(), fields.into());
    }

    #[inline]
    pub fn info<'a>(&self, fields: impl Into<Option<&'a Fields>>, message: impl Into<String>) {
        self.dispatch(LogLevel::Info, message.into(), fields.into());
    }

    #[inline]
    pub fn warn<'a>(&self, fields: impl Into<Option<&'a Fields>>, message: impl Into<String>) {
        self.dispatch(LogLevel::Warn, message.into(), fields.into());
    }

    /// Log an error at [`LogLevel::Error`] using its rendered message
    #[inline]
    pub fn error<'a, E>(&self, fields: impl Into<Option<&'a Fields>>, err: &E)
    where
        E: fmt::Display + ?Sized,
    {
        self.dispatch(LogLevel::Error, err.to_string(), fields.into());
    }

    /// Log an error, flush every handler, then abort the process.
    ///
    /// The event is fully dispatched before the process terminates. This is a
    /// hard abort: it cannot be caught and no destructors run. Reserve it for
    /// conditions the program cannot recover from.
    pub fn fatal<'a, E>(&self, fields: impl Into<Option<&'a Fields>>, err: &E) -> !
    where
        E: fmt::Display + ?Sized,
    {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.dispatch(LogLevel::Error, err.to_string(), fields.into());
            self.flush()
        }));

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Failed to flush before fatal abort: {}", e);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Panic while logging fatal event: {}. Aborting anyway.",
                    panic_message(panic_info.as_ref())
                );
            }
        }

        std::process::abort()
    }

    /// Flush every handler.
    ///
    /// All handlers are flushed even if one fails or panics; the first failure
    /// is returned.
    pub fn flush(&self) -> Result<()> {
        let _guard = self.dispatch_lock.lock();
        let mut first_error = None;

        for handler in &self.handlers {
            let result = match catch_unwind(AssertUnwindSafe(|| handler.flush())) {
                Ok(result) => result,
                Err(panic_info) => Err(LoggerError::other(format!(
                    "handler '{}' panicked during flush: {}",
                    handler.name(),
                    panic_message(panic_info.as_ref())
                ))),
            };

            if let Err(e) = result {
                eprintln!("[LOGGER ERROR] Handler '{}' flush failed: {}", handler.name(), e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn dispatch(&self, level: LogLevel, message: String, call_fields: Option<&Fields>) {
        let _guard = self.dispatch_lock.lock();
        self.metrics.record_dispatched();

        let fields = merge(&self.fields, call_fields);
        let event = Event::at(clock::now(), level, message, fields);

        if self.intercepted(&event) {
            self.metrics.record_short_circuited();
            return;
        }

        self.fan_out(&event);
    }

    /// Run the interceptor chain in order; `true` if one of them stopped the event.
    ///
    /// A panicking interceptor is reported and treated as if it returned `false`.
    fn intercepted(&self, event: &Event) -> bool {
        for (idx, interceptor) in self.interceptors.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| interceptor.intercept(event))) {
                Ok(true) => return true,
                Ok(false) => {}
                Err(panic_info) => {
                    self.metrics.record_interceptor_failure();
                    eprintln!(
                        "[LOGGER CRITICAL] Interceptor #{} panicked: {}. \
                         Continuing with the rest of the chain.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
        false
    }

    /// Hand the event to every handler in registration order, isolating failures
    fn fan_out(&self, event: &Event) {
        for (idx, handler) in self.handlers.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| handler.handle(event))) {
                Ok(Ok(())) => {
                    self.metrics.record_handled();
                }
                Ok(Err(e)) => {
                    self.metrics.record_handler_failure();
                    eprintln!(
                        "[LOGGER ERROR] Handler '{}' (#{}) failed: {}",
                        handler.name(),
                        idx,
                        e
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_handler_failure();
                    eprintln!(
                        "[LOGGER CRITICAL] Handler '{}' (#{}) panicked: {}. \
                         Other handlers continue to function.",
                        handler.name(),
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

impl Default for Logger {
    /// A logger with no interceptors, no handlers and no fields
    fn default() -> Self {
        LoggerBuilder::new().build()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("interceptors", &self.interceptors.len())
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .field("fields", &self.fields)
            .finish()
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// `build` takes `&self` and copies the builder's state, so a builder can keep
/// being extended after it produced a logger without affecting that logger.
///
/// # Example
/// ```
/// use chainlog::prelude::*;
///
/// let base = Logger::builder()
///     .add_handler(DevHandler::stderr())
///     .add_field("service", "api");
///
/// let api = base.build();
/// let worker = base.add_field("role", "worker").build();
///
/// assert_eq!(api.fields().len(), 1);
/// assert_eq!(worker.fields().len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct LoggerBuilder {
    interceptors: Vec<Arc<dyn Interceptor>>,
    handlers: Vec<Arc<dyn Handler>>,
    fields: Fields,
}

impl LoggerBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder pre-populated with copies of a logger's configuration
    pub fn from_logger(logger: &Logger) -> Self {
        Self {
            interceptors: logger.interceptors.clone(),
            handlers: logger.handlers.clone(),
            fields: logger.fields.clone(),
        }
    }

    /// Append an interceptor; interceptors run in the order they are added
    #[must_use = "builder methods return a new value"]
    pub fn add_interceptor<I: Interceptor + 'static>(self, interceptor: I) -> Self {
        self.add_shared_interceptor(Arc::new(interceptor))
    }

    /// Append an interceptor instance that is also used elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn add_shared_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Append a closure as an interceptor
    #[must_use = "builder methods return a new value"]
    pub fn add_interceptor_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        self.add_interceptor(InterceptorFn::new(f))
    }

    /// Append a handler; handlers run in the order they are added
    #[must_use = "builder methods return a new value"]
    pub fn add_handler<H: Handler + 'static>(self, handler: H) -> Self {
        self.add_shared_handler(Arc::new(handler))
    }

    /// Append a handler instance that is also used elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn add_shared_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Append a closure as a handler
    #[must_use = "builder methods return a new value"]
    pub fn add_handler_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.add_handler(HandlerFn::new(f))
    }

    /// Set a base field, replacing any previous value for `key`
    #[must_use = "builder methods return a new value"]
    pub fn add_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set several base fields at once
    #[must_use = "builder methods return a new value"]
    pub fn add_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        self.fields.extend(fields);
        self
    }

    /// Build a Logger from a snapshot of the current configuration
    pub fn build(&self) -> Logger {
        Logger {
            interceptors: self.interceptors.clone(),
            handlers: self.handlers.clone(),
            fields: self.fields.clone(),
            dispatch_lock: Mutex::new(()),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("interceptors", &self.interceptors.len())
            .field("handlers", &self.handlers.len())
            .field("fields", &self.fields)
            .finish()
    }
}

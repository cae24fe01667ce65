//! Core logger types and traits

pub mod clock;
pub mod error;
pub mod event;
pub mod field;
pub mod handler;
pub mod interceptor;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use clock::ClockGuard;
pub use error::{LoggerError, Result};
pub use event::Event;
pub use field::{merge, FieldValue, Fields};
pub use handler::{Handler, HandlerFn};
pub use interceptor::{Interceptor, InterceptorFn};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;

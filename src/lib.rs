//! # chainlog
//!
//! A structured, leveled logging facade. Events carry a level, a message and
//! key/value fields; a [`Logger`] merges its base fields into each event, runs
//! it through a chain of short-circuiting interceptors and fans it out to
//! handlers, synchronously and one event at a time.
//!
//! ## Features
//!
//! - **Interceptors**: ordered gates; the first one returning `true` stops the event
//! - **Handlers**: ordered sinks; a failing handler never stops the others
//! - **Base fields**: per-logger defaults, overridden by call-site fields
//! - **Thread Safe**: dispatch is one critical section per logger
//!
//! ```
//! use chainlog::prelude::*;
//! use chainlog::fields;
//!
//! let memory = MemoryHandler::new();
//! let logger = Logger::builder()
//!     .add_interceptor(LevelFilter::new(LogLevel::Info))
//!     .add_handler(memory.clone())
//!     .add_field("service", "x")
//!     .build();
//!
//! logger.debug(None, "filtered out");
//! logger.warn(&fields! { "service" => "y" }, "msg");
//!
//! let events = memory.events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].fields["service"], FieldValue::from("y"));
//! ```

pub mod config;
pub mod core;
pub mod handlers;
pub mod interceptors;
pub mod macros;

pub mod prelude {
    pub use crate::config::{ConsoleConfig, LoggerConfig, OutputFormat};
    pub use crate::core::{
        Event, FieldValue, Fields, Handler, HandlerFn, Interceptor, InterceptorFn, LogLevel,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat,
    };
    pub use crate::handlers::{ChannelHandler, DevHandler, JsonHandler, MemoryHandler};
    pub use crate::interceptors::LevelFilter;
}

pub use crate::config::{ConsoleConfig, LoggerConfig, OutputFormat};
pub use crate::core::{
    Event, FieldValue, Fields, Handler, HandlerFn, Interceptor, InterceptorFn, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat,
};
pub use crate::handlers::{ChannelHandler, DevHandler, JsonHandler, MemoryHandler};
pub use crate::interceptors::LevelFilter;

//! Logging macros for ergonomic message formatting and field maps.
//!
//! The leveled macros format their message with `format!` before dispatch.
//! Call-site fields go before the message, separated by `;`. Fields are
//! structured metadata only, never format arguments.
//!
//! # Examples
//!
//! ```
//! use chainlog::prelude::*;
//! use chainlog::{fields, info, warn};
//!
//! let logger = Logger::builder().add_handler(MemoryHandler::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With call-site fields
//! let request = fields! { "request_id" => "r-42", "attempt" => 3 };
//! warn!(logger, &request; "Retrying request after {}ms", 250);
//! ```

/// Build a [`Fields`](crate::Fields) map.
///
/// # Examples
///
/// ```
/// use chainlog::{fields, FieldValue};
///
/// let f = fields! { "user" => "ada", "admin" => true, "logins" => 42 };
/// assert_eq!(f["admin"], FieldValue::Bool(true));
/// assert!(fields! {}.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::FieldValue::from($value));
        )+
        fields
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use chainlog::prelude::*;
/// # let logger = Logger::default();
/// use chainlog::{debug, fields};
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// debug!(logger, &fields! { "cache" => "hit" }; "Lookup took {}us", 12);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.debug($fields, ::std::format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::option::Option::None, ::std::format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use chainlog::prelude::*;
/// # let logger = Logger::default();
/// use chainlog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.info($fields, ::std::format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::option::Option::None, ::std::format!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use chainlog::prelude::*;
/// # let logger = Logger::default();
/// use chainlog::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $fields:expr; $($arg:tt)+) => {
        $logger.warn($fields, ::std::format!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::option::Option::None, ::std::format!($($arg)+))
    };
}

/// Log an error value, or a formatted message, at error level.
///
/// # Examples
///
/// ```
/// # use chainlog::prelude::*;
/// # let logger = Logger::default();
/// use chainlog::error;
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json missing");
/// error!(logger, err);
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $fields:expr; $fmt:literal, $($arg:tt)+) => {
        $logger.error($fields, &::std::format!($fmt, $($arg)+))
    };
    ($logger:expr, $fields:expr; $err:expr) => {
        $logger.error($fields, &$err)
    };
    ($logger:expr, $fmt:literal, $($arg:tt)+) => {
        $logger.error(::std::option::Option::None, &::std::format!($fmt, $($arg)+))
    };
    ($logger:expr, $err:expr) => {
        $logger.error(::std::option::Option::None, &$err)
    };
}

/// Log an error value at error level, then abort the process.
///
/// See [`Logger::fatal`](crate::Logger::fatal).
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $fields:expr; $fmt:literal, $($arg:tt)+) => {
        $logger.fatal($fields, &::std::format!($fmt, $($arg)+))
    };
    ($logger:expr, $fields:expr; $err:expr) => {
        $logger.fatal($fields, &$err)
    };
    ($logger:expr, $fmt:literal, $($arg:tt)+) => {
        $logger.fatal(::std::option::Option::None, &::std::format!($fmt, $($arg)+))
    };
    ($logger:expr, $err:expr) => {
        $logger.fatal(::std::option::Option::None, &$err)
    };
}

//! Interceptor implementations

pub mod level_filter;

pub use level_filter::LevelFilter;

pub use crate::core::{Interceptor, InterceptorFn};

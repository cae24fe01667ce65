//! Handler implementations

pub mod channel;
pub mod dev;
pub mod json;
pub mod memory;

pub use channel::ChannelHandler;
pub use dev::DevHandler;
pub use json::JsonHandler;
pub use memory::MemoryHandler;

pub use crate::core::{Handler, HandlerFn};

//! Appender implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use memory::MemoryAppender;

pub use crate::core::appender::into_write_fn;
pub use crate::core::Appender;

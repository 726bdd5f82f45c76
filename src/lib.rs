//! # funclog
//!
//! A structured-logging facade with a function-backed sink that renders
//! key-value pairs to text or JSON and hands each line to a callback.
//!
//! ## Features
//!
//! - **Structural rendering**: any `serde::Serialize` value is logged with the
//!   same output `serde_json` would produce; serde attributes control field
//!   names, skipping and flattening
//! - **Total**: malformed pairs, failing `Serialize` impls and cyclic data
//!   produce placeholder tokens, never panics
//! - **Caller attribution**: `file:line` of the true call site, with call-depth
//!   offsets for logging helpers
//! - **Verbosity levels**: `v(n)` gates info lines; error lines always pass
//!
//! ## Example
//!
//! ```
//! use funclog::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Request {
//!     method: &'static str,
//!     #[serde(skip_serializing_if = "funclog::is_zero")]
//!     retries: u32,
//! }
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .output_format(OutputFormat::Json)
//!     .appender(memory.clone())
//!     .build()
//!     .with_name("http");
//!
//! logger.info("served", &kv!["req", Request { method: "GET", retries: 0 }, "status", 200]);
//! assert_eq!(
//!     memory.lines()[0],
//!     r#"{"logger":"http","level":0,"msg":"served","req":{"method":"GET"},"status":200}"#
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

#[doc(hidden)]
pub mod __private {
    pub use crate::core::value::{CaptureHooked, CaptureItem, CaptureSerialized};
}

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, DiscardSink, Formatter, FuncSink, Hooked, LogSink, Loggable, Logger,
        LoggerBuilder, LoggerError, MessageClass, Options, OutputFormat, Result, TimestampFormat,
        Value,
    };
    pub use crate::kv;
}

pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use crate::core::{
    flatten, into_write_fn, is_zero, loggable, pretty, render, resolve, try_capture, Appender,
    CallSite, Caller, DiscardSink, Formatter, FuncSink, Hooked, LogSink, Loggable, Logger,
    LoggerBuilder, LoggerError, MessageClass, Options, OutputFormat, Result, TimestampFormat,
    Value, Verbosity, WriteFn, MAX_DEPTH, NO_VALUE,
};

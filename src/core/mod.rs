//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod capture;
pub mod error;
pub mod formatter;
pub mod kv;
pub mod logger;
pub mod options;
pub mod output_format;
pub mod render;
pub mod sink;
pub mod timestamp;
pub mod value;
pub mod verbosity;

pub use appender::{into_write_fn, Appender};
pub use caller::{resolve, CallSite, Caller};
pub use capture::{try_capture, MAX_DEPTH};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use kv::{flatten, NO_VALUE};
pub use logger::{Logger, LoggerBuilder};
pub use options::{MessageClass, Options};
pub use output_format::OutputFormat;
pub use render::{pretty, render};
pub use sink::{DiscardSink, FuncSink, LogSink, WriteFn};
pub use timestamp::TimestampFormat;
pub use value::{is_zero, loggable, Hooked, Loggable, Value};
pub use verbosity::Verbosity;

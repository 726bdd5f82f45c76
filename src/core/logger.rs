//! Logger facade
//!
//! [`Logger`] is the handle applications log through. It is cheap to clone,
//! `Send + Sync`, and every derivation (`with_name`, `with_values`,
//! `with_call_depth`, `v`) returns a new logger sharing the same output.

use super::{
    appender::{into_write_fn, Appender},
    formatter::Formatter,
    options::{MessageClass, Options},
    output_format::OutputFormat,
    sink::{DiscardSink, FuncSink, LogSink, WriteFn},
    timestamp::TimestampFormat,
    value::Value,
};
use crate::appenders::ConsoleAppender;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    level: i32,
}

impl Logger {
    pub fn new<S: LogSink + 'static>(sink: S) -> Self {
        Self::from_sink(Arc::new(sink))
    }

    pub fn from_sink(sink: Arc<dyn LogSink>) -> Self {
        Self { sink, level: 0 }
    }

    /// A logger that writes nothing
    pub fn discard() -> Self {
        Self::new(DiscardSink)
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Whether info lines from this logger would be written
    #[inline]
    pub fn enabled(&self) -> bool {
        self.sink.enabled(self.level)
    }

    /// Info verbosity of this logger; raised by [`Logger::v`]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Log an informational message with key-value pairs.
    ///
    /// Nothing is rendered when the logger's level fails the verbosity gate.
    #[track_caller]
    pub fn info(&self, msg: &str, pairs: &[Value]) {
        if self.sink.enabled(self.level) {
            self.sink.info(self.level, msg, pairs, Location::caller());
        }
    }

    /// Log an error with key-value pairs. Error lines are never gated.
    #[track_caller]
    pub fn error(&self, err: Option<&dyn Error>, msg: &str, pairs: &[Value]) {
        self.sink.error(err, msg, pairs, Location::caller());
    }

    /// A logger whose info lines are `level` steps less important.
    ///
    /// Levels are additive: `v(1).v(2)` logs at level 3. Negative values are
    /// treated as zero.
    ///
    /// ```
    /// use funclog::Logger;
    ///
    /// let logger = Logger::builder().verbosity(1).write(|_, _| {}).build();
    /// assert!(logger.v(1).enabled());
    /// assert!(!logger.v(1).v(1).enabled());
    /// ```
    #[must_use]
    pub fn v(&self, level: i32) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            level: self.level.saturating_add(level.max(0)),
        }
    }

    /// Append a segment to the logger's name
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            sink: self.sink.with_name(name),
            level: self.level,
        }
    }

    /// Attach key-value pairs to every line from the derived logger
    #[must_use]
    pub fn with_values(&self, pairs: &[Value]) -> Self {
        Self {
            sink: self.sink.with_values(pairs),
            level: self.level,
        }
    }

    /// Attribute lines `depth` frames further up the stack.
    ///
    /// Use from helper functions that log on behalf of their caller. Resolving
    /// a depth above zero needs line tables in the binary; without them (the
    /// default release profile) the caller is logged as `"<unknown>"` line 0.
    /// Set `debug = "line-tables-only"` under `[profile.release]` to keep it.
    ///
    /// A helper marked `#[track_caller]` needs no call depth at all, and is
    /// attributed correctly in every build:
    ///
    /// ```
    /// use funclog::prelude::*;
    ///
    /// #[track_caller]
    /// fn audit(logger: &Logger, action: &str) {
    ///     logger.info("audit", &kv!["action", action]);
    /// }
    ///
    /// let memory = MemoryAppender::new();
    /// let logger = Logger::builder()
    ///     .output_format(OutputFormat::Json)
    ///     .log_caller(MessageClass::All)
    ///     .appender(memory.clone())
    ///     .build();
    ///
    /// let expected = line!() + 1;
    /// audit(&logger, "login");
    /// let line: serde_json::Value = serde_json::from_str(&memory.lines()[0]).unwrap();
    /// assert_eq!(line["caller"]["line"], expected);
    /// ```
    #[must_use]
    pub fn with_call_depth(&self, depth: usize) -> Self {
        Self {
            sink: self.sink.with_call_depth(depth),
            level: self.level,
        }
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::discard()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a func-sink Logger with a fluent API
///
/// # Example
/// ```
/// use funclog::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder()
///     .output_format(OutputFormat::Json)
///     .log_caller(MessageClass::Error)
///     .verbosity(2)
///     .appender(memory.clone())
///     .build();
///
/// logger.v(2).info("kept", &[]);
/// logger.v(3).info("dropped", &[]);
/// assert_eq!(memory.lines(), vec![r#"{"logger":"","level":2,"msg":"kept"}"#.to_string()]);
/// ```
pub struct LoggerBuilder {
    options: Options,
    output_format: OutputFormat,
    name: Option<String>,
    write: Option<WriteFn>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            output_format: OutputFormat::default(),
            name: None,
            write: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_caller(mut self, class: MessageClass) -> Self {
        self.options.log_caller = class;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_timestamp(mut self, enabled: bool) -> Self {
        self.options.log_timestamp = enabled;
        self
    }

    /// Set the highest info level that is written
    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, verbosity: i32) -> Self {
        self.options.verbosity = verbosity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.options.timestamp_format = format;
        self
    }

    /// Replace all formatter options at once
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Initial logger name
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Send lines to a callback receiving `(prefix, line)`
    #[must_use = "builder methods return a new value"]
    pub fn write<F>(mut self, write: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.write = Some(Arc::new(write));
        self
    }

    /// Send lines to an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.write = Some(into_write_fn(Arc::new(appender)));
        self
    }

    /// Build the logger. Lines go to the console unless a destination was set.
    pub fn build(self) -> Logger {
        let write = self
            .write
            .unwrap_or_else(|| into_write_fn(Arc::new(ConsoleAppender::new())));
        let mut formatter = Formatter::with_format(self.output_format, self.options);
        if let Some(name) = self.name {
            formatter.add_name(&name);
        }
        Logger::new(FuncSink::from_parts(formatter, write))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

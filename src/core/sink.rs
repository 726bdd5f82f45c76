//! Logging backends
//!
//! [`LogSink`] is the seam between the [`Logger`](super::logger::Logger)
//! facade and whatever produces output. [`FuncSink`] formats lines with a
//! [`Formatter`] and hands them to a write callback; [`DiscardSink`] drops
//! everything.

use super::caller::CallSite;
use super::formatter::Formatter;
use super::options::Options;
use super::value::Value;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Write callback receiving `(prefix, line)`
pub type WriteFn = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// A logging backend.
///
/// `info` is only called after `enabled` returned true for the same level.
/// Derivation methods return a new sink and leave `self` unchanged.
pub trait LogSink: Send + Sync {
    fn enabled(&self, level: i32) -> bool;

    fn info(&self, level: i32, msg: &str, pairs: &[Value], site: CallSite);

    fn error(&self, err: Option<&dyn Error>, msg: &str, pairs: &[Value], site: CallSite);

    fn with_name(&self, name: &str) -> Arc<dyn LogSink>;

    fn with_values(&self, pairs: &[Value]) -> Arc<dyn LogSink>;

    fn with_call_depth(&self, depth: usize) -> Arc<dyn LogSink>;
}

/// Sink that renders lines and passes them to a callback.
///
/// # Example
///
/// ```
/// use funclog::{FuncSink, Logger, Options, Value};
/// use std::sync::{Arc, Mutex};
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let captured = lines.clone();
/// let sink = FuncSink::json(move |line| captured.lock().unwrap().push(line.to_string()), Options::default());
///
/// Logger::new(sink).with_name("svc").info("hello", &[Value::from(&"k"), Value::from(&"v")]);
/// assert_eq!(lines.lock().unwrap()[0], r#"{"logger":"svc","level":0,"msg":"hello","k":"v"}"#);
/// ```
#[derive(Clone)]
pub struct FuncSink {
    formatter: Formatter,
    write: WriteFn,
}

impl FuncSink {
    /// Key-value sink; `write` receives the logger name and the line
    pub fn new<F>(write: F, options: Options) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        Self::from_parts(Formatter::new(options), Arc::new(write))
    }

    /// JSON sink; `write_obj` receives one JSON object per line
    pub fn json<F>(write_obj: F, options: Options) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::from_parts(
            Formatter::json(options),
            Arc::new(move |_prefix: &str, line: &str| write_obj(line)),
        )
    }

    /// Sink over an existing formatter and callback
    pub fn from_parts(formatter: Formatter, write: WriteFn) -> Self {
        Self { formatter, write }
    }

    /// The write callback this sink was built with
    pub fn underlying(&self) -> &WriteFn {
        &self.write
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    fn derive(&self, formatter: Formatter) -> Arc<dyn LogSink> {
        Arc::new(Self {
            formatter,
            write: Arc::clone(&self.write),
        })
    }
}

impl fmt::Debug for FuncSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncSink")
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl LogSink for FuncSink {
    fn enabled(&self, level: i32) -> bool {
        self.formatter.enabled(level)
    }

    fn info(&self, level: i32, msg: &str, pairs: &[Value], site: CallSite) {
        let (prefix, line) = self.formatter.format_info(level, msg, pairs, site);
        (self.write)(&prefix, &line);
    }

    fn error(&self, err: Option<&dyn Error>, msg: &str, pairs: &[Value], site: CallSite) {
        let (prefix, line) = self.formatter.format_error(err, msg, pairs, site);
        (self.write)(&prefix, &line);
    }

    fn with_name(&self, name: &str) -> Arc<dyn LogSink> {
        self.derive(self.formatter.with_name(name))
    }

    fn with_values(&self, pairs: &[Value]) -> Arc<dyn LogSink> {
        self.derive(self.formatter.with_values(pairs))
    }

    fn with_call_depth(&self, depth: usize) -> Arc<dyn LogSink> {
        self.derive(self.formatter.with_call_depth(depth))
    }
}

/// Sink that is disabled at every level and drops every line
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn enabled(&self, _level: i32) -> bool {
        false
    }

    fn info(&self, _level: i32, _msg: &str, _pairs: &[Value], _site: CallSite) {}

    fn error(&self, _err: Option<&dyn Error>, _msg: &str, _pairs: &[Value], _site: CallSite) {}

    fn with_name(&self, _name: &str) -> Arc<dyn LogSink> {
        Arc::new(DiscardSink)
    }

    fn with_values(&self, _pairs: &[Value]) -> Arc<dyn LogSink> {
        Arc::new(DiscardSink)
    }

    fn with_call_depth(&self, _depth: usize) -> Arc<dyn LogSink> {
        Arc::new(DiscardSink)
    }
}

//! Line assembly
//!
//! A [`Formatter`] holds everything needed to turn one logging call into one
//! line: the output format, the slash-joined logger name, the saved key-value
//! pairs (kept pre-rendered), the call-depth bias and the builtin options.
//!
//! Lines are laid out as builtins, then saved pairs, then the call's own
//! pairs:
//!
//! ```text
//! "ts"=… "caller"={…} "level"=0 "msg"="…" <saved pairs> <call pairs>
//! ```
//!
//! In JSON mode the line is wrapped in braces and the name moves from the
//! prefix into a leading `"logger"` builtin.

use super::caller::{self, CallSite};
use super::kv::{flatten, PairWriter};
use super::options::{MessageClass, Options};
use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;
use super::value::Value;
use super::verbosity::Verbosity;
use chrono::Utc;
use std::error::Error;

/// Initial capacity of a line buffer
const LINE_CAPACITY: usize = 256;

/// Renders logging calls into `(prefix, body)` lines.
///
/// `with_*` methods return a derived formatter and leave `self` untouched.
/// `add_*` methods mutate a formatter the caller owns.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    output_format: OutputFormat,
    prefix: String,
    values: Vec<Value>,
    values_str: String,
    depth: usize,
    log_caller: MessageClass,
    log_timestamp: bool,
    timestamp_format: TimestampFormat,
    verbosity: Verbosity,
}

impl Formatter {
    /// Formatter producing key-value lines
    pub fn new(options: Options) -> Self {
        Self::with_format(OutputFormat::KeyValue, options)
    }

    /// Formatter producing JSON lines
    pub fn json(options: Options) -> Self {
        Self::with_format(OutputFormat::Json, options)
    }

    pub fn with_format(output_format: OutputFormat, options: Options) -> Self {
        if let Err(e) = options.validate() {
            eprintln!("[LOGGER WARNING] {}; falling back to the default pattern", e);
        }
        Self {
            output_format,
            prefix: String::new(),
            values: Vec::new(),
            values_str: String::new(),
            depth: 0,
            log_caller: options.log_caller,
            log_timestamp: options.log_timestamp,
            timestamp_format: options.timestamp_format,
            verbosity: Verbosity::new(options.verbosity),
        }
    }

    /// Whether an info line at `level` passes the verbosity gate
    pub fn enabled(&self, level: i32) -> bool {
        self.verbosity.enabled(level)
    }

    /// Build an info line.
    ///
    /// Returns `(prefix, body)`. The prefix is the logger name in key-value
    /// mode and always empty in JSON mode.
    pub fn format_info(
        &self,
        level: i32,
        msg: &str,
        pairs: &[Value],
        site: CallSite,
    ) -> (String, String) {
        let mut writer = self.begin_line(self.log_caller.includes_info(), site);
        writer.pair("level", &Value::Int(i64::from(level)));
        writer.str_pair("msg", msg);
        self.finish_line(writer, pairs)
    }

    /// Build an error line.
    ///
    /// Error lines have no `"level"`; `"error"` follows `"msg"` and holds the
    /// error's description, or `null` when there is none.
    pub fn format_error(
        &self,
        err: Option<&dyn Error>,
        msg: &str,
        pairs: &[Value],
        site: CallSite,
    ) -> (String, String) {
        let mut writer = self.begin_line(self.log_caller.includes_error(), site);
        writer.str_pair("msg", msg);
        match err {
            Some(err) => writer.pair("error", &Value::error(err)),
            None => writer.pair("error", &Value::Null),
        }
        self.finish_line(writer, pairs)
    }

    fn begin_line(&self, with_caller: bool, site: CallSite) -> PairWriter {
        let mut writer = PairWriter::with_capacity(self.output_format, false, LINE_CAPACITY);
        if self.output_format.is_json() {
            writer.open();
            writer.str_pair("logger", &self.prefix);
        }
        if self.log_timestamp {
            writer.pair("ts", &self.timestamp_format.to_value(&Utc::now()));
        }
        if with_caller {
            let caller = caller::resolve(site, self.depth);
            writer.pair("caller", &caller.to_value());
        }
        writer
    }

    fn finish_line(&self, mut writer: PairWriter, pairs: &[Value]) -> (String, String) {
        writer.fragment(&self.values_str);
        writer.pairs(pairs);
        if self.output_format.is_json() {
            writer.close();
            return (String::new(), writer.finish());
        }
        (self.prefix.clone(), writer.finish())
    }

    /// Append a name segment, joined to an existing name with `/`
    pub fn add_name(&mut self, name: &str) {
        if !self.prefix.is_empty() {
            self.prefix.push('/');
        }
        self.prefix.push_str(name);
    }

    /// Save pairs to be logged with every line, re-rendering the cache
    pub fn add_values(&mut self, pairs: &[Value]) {
        self.values.extend_from_slice(pairs);
        self.values_str = flatten(&self.values, self.output_format, false);
    }

    /// Skip `depth` more frames when attributing lines to a caller
    pub fn add_call_depth(&mut self, depth: usize) {
        self.depth += depth;
    }

    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        let mut derived = self.clone();
        derived.add_name(name);
        derived
    }

    #[must_use]
    pub fn with_values(&self, pairs: &[Value]) -> Self {
        let mut derived = self.clone();
        derived.add_values(pairs);
        derived
    }

    #[must_use]
    pub fn with_call_depth(&self, depth: usize) -> Self {
        let mut derived = self.clone();
        derived.add_call_depth(depth);
        derived
    }

    pub fn name(&self) -> &str {
        &self.prefix
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use std::panic::Location;

    fn kv(pairs: &[(&str, Value)]) -> Vec<Value> {
        pairs
            .iter()
            .flat_map(|(k, v)| [Value::from(*k), v.clone()])
            .collect()
    }

    #[test]
    fn test_info_key_value() {
        let f = Formatter::new(Options::default());
        let (prefix, body) = f.format_info(
            0,
            "hello",
            &kv(&[("k", Value::from(&"v"))]),
            Location::caller(),
        );
        assert_eq!(prefix, "");
        assert_eq!(body, r#""level"=0 "msg"="hello" "k"="v""#);
    }

    #[test]
    fn test_info_json() {
        let f = Formatter::json(Options::default()).with_name("svc");
        let (prefix, body) = f.format_info(
            0,
            "hello",
            &kv(&[("k", Value::from(&"v"))]),
            Location::caller(),
        );
        assert_eq!(prefix, "");
        assert_eq!(body, r#"{"logger":"svc","level":0,"msg":"hello","k":"v"}"#);
    }

    #[test]
    fn test_json_logger_always_present() {
        let f = Formatter::json(Options::default());
        let (_, body) = f.format_info(1, "m", &[], Location::caller());
        assert_eq!(body, r#"{"logger":"","level":1,"msg":"m"}"#);
    }

    #[test]
    fn test_error_lines() {
        let f = Formatter::new(Options::default());
        let (_, body) = f.format_error(None, "oops", &[], Location::caller());
        assert_eq!(body, r#""msg"="oops" "error"=null"#);

        let err = LoggerError::config("Options", "bad");
        let (_, body) = f.format_error(Some(&err), "oops", &[], Location::caller());
        assert_eq!(
            body,
            r#""msg"="oops" "error"="Invalid configuration for Options: bad""#
        );

        let (_, json) = Formatter::json(Options::default()).format_error(
            None,
            "oops",
            &[],
            Location::caller(),
        );
        assert_eq!(json, r#"{"logger":"","msg":"oops","error":null}"#);
    }

    #[test]
    fn test_saved_values_precede_call_values() {
        let f = Formatter::new(Options::default())
            .with_name("MyLogger")
            .with_values(&kv(&[("savedKey", Value::from(&"savedValue"))]));
        let (prefix, body) = f.format_info(
            0,
            "the message",
            &kv(&[("key", Value::from(&"value"))]),
            Location::caller(),
        );
        assert_eq!(prefix, "MyLogger");
        assert_eq!(
            body,
            r#""level"=0 "msg"="the message" "savedKey"="savedValue" "key"="value""#
        );
    }

    #[test]
    fn test_with_values_leaves_parent_untouched() {
        let parent = Formatter::new(Options::default()).with_values(&kv(&[("a", Value::from(1))]));
        let child = parent.with_values(&kv(&[("b", Value::from(2))]));
        let sibling = parent.with_values(&kv(&[("c", Value::from(3))]));

        assert_eq!(parent.values().len(), 2);
        assert_eq!(child.values().len(), 4);

        let (_, body) = sibling.format_info(0, "m", &[], Location::caller());
        assert_eq!(body, r#""level"=0 "msg"="m" "a"=1 "c"=3"#);
    }

    #[test]
    fn test_names_compose() {
        let mut f = Formatter::new(Options::default());
        f.add_name("a");
        f.add_name("b");
        assert_eq!(f.name(), "a/b");
        assert_eq!(f.with_name("c/d").name(), "a/b/c/d");
    }

    #[test]
    fn test_call_depth_accumulates() {
        let f = Formatter::new(Options::default())
            .with_call_depth(1)
            .with_call_depth(1);
        assert_eq!(f.depth(), 2);
    }

    #[test]
    fn test_caller_policy() {
        let site = Location::caller();
        let info_only = Formatter::new(Options::new().with_log_caller(MessageClass::Info));
        let (_, info) = info_only.format_info(0, "m", &[], site);
        let (_, error) = info_only.format_error(None, "m", &[], site);

        let expected = format!(r#""caller"={{"file":"formatter.rs","line":{}}} "#, site.line());
        assert!(info.starts_with(&expected));
        assert!(!error.contains("caller"));
    }

    #[test]
    fn test_timestamp_builtin() {
        let f = Formatter::json(
            Options::new()
                .with_log_timestamp(true)
                .with_timestamp_format(TimestampFormat::UnixMicros),
        );
        let (_, body) = f.format_info(0, "m", &[], Location::caller());
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(parsed["ts"].is_i64());

        let keys: Vec<&str> = parsed.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"logger"));
        assert!(body.starts_with(r#"{"logger":"","ts":"#));
    }

    #[test]
    fn test_enabled() {
        let f = Formatter::new(Options::new().with_verbosity(1));
        assert!(f.enabled(0));
        assert!(f.enabled(1));
        assert!(!f.enabled(2));
    }
}

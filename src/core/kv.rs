//! Key-value pair flattening
//!
//! Pairs arrive as one flat list alternating key and value. Lists of odd
//! length and non-string keys are tolerated and replaced by placeholder
//! tokens, so a malformed call still produces a parseable line.

use super::output_format::OutputFormat;
use super::render::{into_string, write_json, write_value};
use super::value::Value;
use std::borrow::Cow;

/// Value logged for the last key of an odd-length list
pub const NO_VALUE: &str = "<no-value>";

/// Accumulates `"key"<sep>value` pairs into a line buffer.
pub(crate) struct PairWriter {
    buf: Vec<u8>,
    format: OutputFormat,
    continuing: bool,
}

impl PairWriter {
    pub(crate) fn new(format: OutputFormat, continuing: bool) -> Self {
        Self::with_capacity(format, continuing, 128)
    }

    pub(crate) fn with_capacity(format: OutputFormat, continuing: bool, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            format,
            continuing,
        }
    }

    fn separate(&mut self) {
        if self.continuing {
            self.buf.push(self.format.pair_separator());
        }
        self.continuing = true;
    }

    fn key(&mut self, key: &str) {
        self.separate();
        write_json(&mut self.buf, key);
        self.buf.push(self.format.key_separator());
    }

    pub(crate) fn pair(&mut self, key: &str, value: &Value) {
        self.key(key);
        write_value(&mut self.buf, value, false);
    }

    /// Like `pair`, without capturing the string into a `Value` first
    pub(crate) fn str_pair(&mut self, key: &str, value: &str) {
        self.key(key);
        write_json(&mut self.buf, value);
    }

    /// Append an already flattened run of pairs
    pub(crate) fn fragment(&mut self, rendered: &str) {
        if rendered.is_empty() {
            return;
        }
        self.separate();
        self.buf.extend_from_slice(rendered.as_bytes());
    }

    pub(crate) fn pairs(&mut self, kvs: &[Value]) {
        for (index, chunk) in kvs.chunks(2).enumerate() {
            let key = match &chunk[0] {
                Value::String(s) => Cow::Borrowed(s.as_str()),
                _ => Cow::Owned(format!("<non-string-key-{}>", index)),
            };
            match chunk.get(1) {
                Some(value) => self.pair(&key, value),
                None => self.str_pair(&key, NO_VALUE),
            }
        }
    }

    pub(crate) fn open(&mut self) {
        self.buf.push(b'{');
    }

    pub(crate) fn close(&mut self) {
        self.buf.push(b'}');
    }

    pub(crate) fn finish(self) -> String {
        into_string(self.buf)
    }
}

/// Render a flat key-value list.
///
/// When `continuing` is set the output starts with a pair separator, ready to
/// be appended after earlier pairs. An empty list renders as `""`.
///
/// ```
/// use funclog::{flatten, OutputFormat, Value};
///
/// let pairs = [Value::from(&"k"), Value::from(&1), Value::from(&"odd")];
/// assert_eq!(flatten(&pairs, OutputFormat::KeyValue, false), r#""k"=1 "odd"="<no-value>""#);
/// assert_eq!(flatten(&pairs, OutputFormat::Json, true), r#","k":1,"odd":"<no-value>""#);
/// ```
#[must_use]
pub fn flatten(pairs: &[Value], format: OutputFormat, continuing: bool) -> String {
    let mut writer = PairWriter::new(format, continuing);
    writer.pairs(pairs);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kvs() -> Vec<Value> {
        vec![
            Value::from(&"int"),
            Value::from(&1),
            Value::from(&"str"),
            Value::from(&"ABC"),
            Value::from(&"bool"),
            Value::from(&true),
        ]
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(flatten(&[], OutputFormat::KeyValue, false), "");
        assert_eq!(flatten(&[], OutputFormat::Json, false), "");
        assert_eq!(flatten(&[], OutputFormat::Json, true), "");
    }

    #[test]
    fn test_key_value_mode() {
        assert_eq!(
            flatten(&kvs(), OutputFormat::KeyValue, false),
            r#""int"=1 "str"="ABC" "bool"=true"#
        );
    }

    #[test]
    fn test_json_mode() {
        assert_eq!(
            flatten(&kvs(), OutputFormat::Json, false),
            r#""int":1,"str":"ABC","bool":true"#
        );
    }

    #[test]
    fn test_continuing_adds_leading_separator() {
        let pairs = [Value::from(&"k"), Value::from(&"v")];
        assert_eq!(flatten(&pairs, OutputFormat::KeyValue, true), r#" "k"="v""#);
        assert_eq!(flatten(&pairs, OutputFormat::Json, true), r#","k":"v""#);
    }

    #[test]
    fn test_non_string_keys() {
        let pairs = [
            Value::from(&"ok"),
            Value::from(&1),
            Value::from(&123),
            Value::from(&"val"),
            Value::from(&vec![1]),
            Value::from(&"other"),
        ];
        assert_eq!(
            flatten(&pairs, OutputFormat::KeyValue, false),
            r#""ok"=1 "<non-string-key-1>"="val" "<non-string-key-2>"="other""#
        );
    }

    #[test]
    fn test_odd_length() {
        let pairs = [Value::from(&"lonely")];
        assert_eq!(flatten(&pairs, OutputFormat::KeyValue, false), r#""lonely"="<no-value>""#);
    }

    #[test]
    fn test_keys_are_escaped() {
        let pairs = [Value::from(&"say \"hi\""), Value::Null];
        assert_eq!(flatten(&pairs, OutputFormat::Json, false), r#""say \"hi\"":null"#);
    }

    #[test]
    fn test_fragment_separators() {
        let mut writer = PairWriter::new(OutputFormat::KeyValue, false);
        writer.fragment("");
        writer.str_pair("msg", "m");
        writer.fragment(r#""a"=1"#);
        writer.fragment("");
        writer.pairs(&[Value::from(&"b"), Value::from(&2)]);
        assert_eq!(writer.finish(), r#""msg"="m" "a"=1 "b"=2"#);
    }
}

//! Value rendering
//!
//! Turns a captured [`Value`] into a JSON-style fragment. Scalars go through
//! `serde_json` so numbers, floats and string escapes are byte-identical to
//! what `serde_json::to_string` produces.

use super::value::Value;
use serde::Serialize;

/// Render a value as a JSON fragment.
///
/// With `raw_string` set, a top-level string is emitted verbatim, without
/// quotes or escaping. Nested strings are always quoted.
#[must_use]
pub fn render(value: &Value, raw_string: bool) -> String {
    let mut buf = Vec::with_capacity(64);
    write_value(&mut buf, value, raw_string);
    into_string(buf)
}

/// Capture and render any serializable value.
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Inner {
///     #[serde(skip_serializing_if = "funclog::is_zero")]
///     note: String,
///     n: u8,
/// }
///
/// assert_eq!(funclog::pretty(&Inner { note: String::new(), n: 1 }), r#"{"n":1}"#);
/// assert_eq!(funclog::pretty(&None::<i32>), "null");
/// assert_eq!(funclog::pretty(&f64::NAN), "null");
/// ```
#[must_use]
pub fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    render(&Value::from_serialize(value), false)
}

pub(crate) fn write_value(buf: &mut Vec<u8>, value: &Value, raw_string: bool) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(b) => write_json(buf, b),
        Value::Int(i) => write_json(buf, i),
        Value::UInt(u) => write_json(buf, u),
        Value::Int128(i) => write_json(buf, i),
        Value::UInt128(u) => write_json(buf, u),
        Value::Float32(f) => write_json(buf, f),
        Value::Float(f) => write_json(buf, f),
        Value::String(s) if raw_string => buf.extend_from_slice(s.as_bytes()),
        Value::String(s) => write_json(buf, s.as_str()),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item, false);
            }
            buf.push(b']');
        }
        Value::Object(fields) => {
            buf.push(b'{');
            for (i, (key, field)) in fields.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_json(buf, key.as_str());
                buf.push(b':');
                write_value(buf, field, false);
            }
            buf.push(b'}');
        }
    }
}

/// Write a JSON scalar exactly as serde_json formats it.
pub(crate) fn write_json<T: Serialize + ?Sized>(buf: &mut Vec<u8>, value: &T) {
    // Scalars into a Vec<u8> cannot fail.
    let _ = serde_json::to_writer(&mut *buf, value);
}

pub(crate) fn into_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

//! Values attached to log lines
//!
//! Every key and value passed to a logger is captured into a [`Value`], an
//! owned, thread-safe tree that keeps struct fields and map entries in their
//! original order. Arbitrary data enters through `serde::Serialize`; types that
//! want to control their own log representation implement [`Loggable`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Int128(i128),
    UInt128(u128),
    /// Kept apart from `Float` so it prints with `f32` precision
    Float32(f32),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Ordered fields of a struct or entries of a map
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Capture any serializable value by inspecting its structure.
    ///
    /// Never fails: a value whose `Serialize` impl errors, or whose graph nests
    /// too deeply, becomes the string `"<unhandled-KIND>"`.
    ///
    /// # Example
    ///
    /// ```
    /// use funclog::Value;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Point {
    ///     x: i32,
    ///     #[serde(rename = "why")]
    ///     y: i32,
    /// }
    ///
    /// let value = Value::from_serialize(&Point { x: 9, y: 3 });
    /// assert_eq!(value.render(), r#"{"x":9,"why":3}"#);
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        super::capture::capture(value)
    }

    /// Capture a value through its `Display` impl, as a quoted string.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::String(display_string(value))
    }

    /// Capture an error through its description, as a quoted string.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Value::String(display_string(err))
    }

    /// Capture a value through its [`Loggable`] hooks.
    ///
    /// Hooks are tried in a fixed order: `marshal_log`, `stringify`,
    /// `describe_error`, and finally the structural `Serialize` form.
    /// [`kv!`](crate::kv) calls this for every item that implements
    /// `Loggable`; `Value::from` does not.
    pub fn loggable<T: Loggable + ?Sized>(value: &T) -> Self {
        if let Some(substitute) = value.marshal_log() {
            return substitute;
        }
        if let Some(s) = value.stringify() {
            return Value::String(s);
        }
        if let Some(s) = value.describe_error() {
            return Value::String(s);
        }
        Value::from_serialize(value)
    }

    /// The contained string, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value renders without nested structure
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Short name of the value's shape, used in escape tokens
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Int128(_) => "int",
            Value::UInt(_) | Value::UInt128(_) => "uint",
            Value::Float32(_) | Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Render as a JSON-style fragment
    #[must_use]
    pub fn render(&self) -> String {
        super::render::render(self, false)
    }
}

fn display_string<T: fmt::Display + ?Sized>(value: &T) -> String {
    use fmt::Write;

    let mut out = String::new();
    match write!(out, "{}", value) {
        Ok(()) => out,
        Err(_) => "<unhandled-display>".to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::UInt(u) => serializer.serialize_u64(*u),
            Value::Int128(i) => serializer.serialize_i128(*i),
            Value::UInt128(u) => serializer.serialize_u128(*u),
            Value::Float32(f) => serializer.serialize_f32(*f),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Captures through `Serialize` only; [`Loggable`] hooks are not consulted.
impl<T: Serialize + ?Sized> From<&T> for Value {
    fn from(value: &T) -> Self {
        Value::from_serialize(value)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

/// Hooks a type can use to choose its own log representation.
///
/// All hooks are optional. The first one returning `Some` wins, in this order:
/// `marshal_log`, `stringify`, `describe_error`. When none applies the value is
/// logged through its `Serialize` impl.
///
/// # Example
///
/// ```
/// use funclog::{Loggable, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Credentials {
///     user: String,
///     password: String,
/// }
///
/// impl Loggable for Credentials {
///     fn marshal_log(&self) -> Option<Value> {
///         Some(Value::Object(vec![("user".into(), Value::String(self.user.clone()))]))
///     }
/// }
///
/// let creds = Credentials { user: "ann".into(), password: "hunter2".into() };
/// assert_eq!(Value::loggable(&creds).render(), r#"{"user":"ann"}"#);
/// ```
pub trait Loggable: Serialize {
    /// Substitute value to log in place of `self`
    fn marshal_log(&self) -> Option<Value> {
        None
    }

    /// Display form, logged as a quoted string
    fn stringify(&self) -> Option<String> {
        None
    }

    /// Error description, logged as a quoted string
    fn describe_error(&self) -> Option<String> {
        None
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn marshal_log(&self) -> Option<Value> {
        (**self).marshal_log()
    }

    fn stringify(&self) -> Option<String> {
        (**self).stringify()
    }

    fn describe_error(&self) -> Option<String> {
        (**self).describe_error()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn marshal_log(&self) -> Option<Value> {
        Some(Value::loggable(&**self))
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn marshal_log(&self) -> Option<Value> {
        Some(self.as_ref().map_or(Value::Null, Value::loggable))
    }
}

impl<T: Loggable> Loggable for [T] {
    fn marshal_log(&self) -> Option<Value> {
        Some(Value::Array(self.iter().map(Value::loggable).collect()))
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn marshal_log(&self) -> Option<Value> {
        self.as_slice().marshal_log()
    }
}

impl<K: Serialize + Ord, V: Loggable> Loggable for BTreeMap<K, V> {
    fn marshal_log(&self) -> Option<Value> {
        Some(Value::from_serialize(&HookedEntries(
            self.iter().map(|(k, v)| (k, Hooked(v))),
        )))
    }
}

impl<K, V, H> Loggable for HashMap<K, V, H>
where
    K: Serialize + Eq + Hash,
    V: Loggable,
    H: BuildHasher,
{
    fn marshal_log(&self) -> Option<Value> {
        Some(Value::from_serialize(&HookedEntries(
            self.iter().map(|(k, v)| (k, Hooked(v))),
        )))
    }
}

struct HookedEntries<I>(I);

impl<I, K, V> Serialize for HookedEntries<I>
where
    I: Iterator<Item = (K, V)> + Clone,
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.clone())
    }
}

/// Serializes the wrapped value through its [`Loggable`] hooks.
///
/// Use it where a hooked value sits inside other data, so that its
/// substitute is logged instead of its raw fields.
///
/// # Example
///
/// ```
/// use funclog::{kv, Hooked, Loggable};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Secret(String);
///
/// impl Loggable for Secret {
///     fn stringify(&self) -> Option<String> {
///         Some("****".to_string())
///     }
/// }
///
/// let pairs = kv!["pair", (1, Hooked(Secret("pw".into())))];
/// assert_eq!(pairs[1].render(), r#"[1,"****"]"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hooked<T>(pub T);

impl<T: Loggable> Serialize for Hooked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::loggable(&self.0).serialize(serializer)
    }
}

/// Field serializer applying [`Loggable`] hooks, for
/// `#[serde(serialize_with = "funclog::loggable")]`.
///
/// ```
/// use funclog::{pretty, Loggable};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct ApiKey(String);
///
/// impl Loggable for ApiKey {
///     fn stringify(&self) -> Option<String> {
///         Some(format!("{}...", &self.0[..4]))
///     }
/// }
///
/// #[derive(Serialize)]
/// struct Client {
///     name: String,
///     #[serde(serialize_with = "funclog::loggable")]
///     key: ApiKey,
/// }
///
/// let client = Client { name: "billing".into(), key: ApiKey("sk_live_123".into()) };
/// assert_eq!(pretty(&client), r#"{"name":"billing","key":"sk_l..."}"#);
/// ```
pub fn loggable<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Loggable + ?Sized,
    S: Serializer,
{
    Value::loggable(value).serialize(serializer)
}

// Capture helpers for `kv!`. Method lookup on `&CaptureItem(&x)` finds the
// hooked impl first when `x: Loggable` and falls back to `Serialize` otherwise.

#[doc(hidden)]
pub struct CaptureItem<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait CaptureHooked {
    fn capture_item(&self) -> Value;
}

impl<T: Loggable + ?Sized> CaptureHooked for CaptureItem<'_, T> {
    fn capture_item(&self) -> Value {
        Value::loggable(self.0)
    }
}

#[doc(hidden)]
pub trait CaptureSerialized {
    fn capture_item(&self) -> Value;
}

impl<T: Serialize + ?Sized> CaptureSerialized for &CaptureItem<'_, T> {
    fn capture_item(&self) -> Value {
        Value::from_serialize(self.0)
    }
}

/// Zero-value test for `#[serde(skip_serializing_if = "funclog::is_zero")]`.
///
/// A field is zero when it equals its type's `Default`: empty strings and
/// collections, `false`, `0`, and `None`.
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

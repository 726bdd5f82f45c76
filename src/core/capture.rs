//! Structural capture of arbitrary values
//!
//! A `serde::Serializer` that turns any `Serialize` type into a [`Value`]
//! tree, mirroring the shapes serde_json produces: structs and maps become
//! ordered objects, sequences and tuples become arrays, `None` and `()` become
//! null, enums use external tagging. Serde attributes play the role of field
//! tags: `rename`, `skip`, `skip_serializing_if` and `flatten`.
//!
//! Map keys are rendered raw, so `{9: 3}` is captured as `{"9": 3}`. A key
//! that is itself an array or object becomes `"<unhandled-KIND>"`.

use super::error::{LoggerError, Result};
use super::render;
use super::value::Value;
use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

/// Maximum nesting before a value is considered cyclic
pub const MAX_DEPTH: usize = 128;

/// Upper bound on pre-allocation from untrusted size hints
const MAX_PREALLOC: usize = 4096;

/// Capture `value`, degrading failures to an escape token.
pub(crate) fn capture<T: Serialize + ?Sized>(value: &T) -> Value {
    match try_capture(value) {
        Ok(v) => v,
        Err(err) => Value::String(err.escape_token()),
    }
}

/// Capture `value`, reporting why it could not be inspected.
pub fn try_capture<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer { depth: 0 })
}

#[derive(Debug, Clone, Copy)]
struct ValueSerializer {
    depth: usize,
}

impl ValueSerializer {
    fn nested(self) -> Result<Self> {
        if self.depth >= MAX_DEPTH {
            return Err(LoggerError::unrenderable(
                "recursion",
                format!("value nests deeper than {} levels", MAX_DEPTH),
            ));
        }
        Ok(Self {
            depth: self.depth + 1,
        })
    }
}

fn capture_key<K: Serialize + ?Sized>(key: &K, serializer: ValueSerializer) -> String {
    match key.serialize(serializer) {
        Ok(Value::String(s)) => s,
        Ok(v) if v.is_scalar() => render::render(&v, true),
        Ok(v) => format!("<unhandled-{}>", v.kind()),
        Err(err) => err.escape_token(),
    }
}

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = LoggerError;

    type SerializeSeq = SeqCapture;
    type SerializeTuple = SeqCapture;
    type SerializeTupleStruct = SeqCapture;
    type SerializeTupleVariant = VariantCapture<SeqCapture>;
    type SerializeMap = MapCapture;
    type SerializeStruct = MapCapture;
    type SerializeStructVariant = VariantCapture<MapCapture>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Int128(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::UInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::UInt128(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(
            v.iter().map(|b| Value::UInt(u64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self.nested()?)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value> {
        value.serialize(self.nested()?)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        let inner = value.serialize(self.nested()?)?;
        Ok(Value::Object(vec![(variant.to_owned(), inner)]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture> {
        Ok(SeqCapture::new(self.nested()?, len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCapture> {
        Ok(SeqCapture::new(self.nested()?, Some(len)))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqCapture> {
        Ok(SeqCapture::new(self.nested()?, Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantCapture<SeqCapture>> {
        Ok(VariantCapture {
            variant,
            inner: SeqCapture::new(self.nested()?, Some(len)),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCapture> {
        Ok(MapCapture::new(self.nested()?, len))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapCapture> {
        Ok(MapCapture::new(self.nested()?, Some(len)))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantCapture<MapCapture>> {
        Ok(VariantCapture {
            variant,
            inner: MapCapture::new(self.nested()?, Some(len)),
        })
    }
}

pub(crate) struct SeqCapture {
    child: ValueSerializer,
    items: Vec<Value>,
}

impl SeqCapture {
    fn new(child: ValueSerializer, len: Option<usize>) -> Self {
        Self {
            child,
            items: Vec::with_capacity(len.unwrap_or(0).min(MAX_PREALLOC)),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(self.child)?);
        Ok(())
    }
}

impl SerializeSeq for SeqCapture {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

impl SerializeTuple for SeqCapture {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

impl SerializeTupleStruct for SeqCapture {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

pub(crate) struct MapCapture {
    child: ValueSerializer,
    fields: Vec<(String, Value)>,
    pending_key: Option<String>,
}

impl MapCapture {
    fn new(child: ValueSerializer, len: Option<usize>) -> Self {
        Self {
            child,
            fields: Vec::with_capacity(len.unwrap_or(0).min(MAX_PREALLOC)),
            pending_key: None,
        }
    }
}

impl SerializeMap for MapCapture {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(capture_key(key, self.child));
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self.pending_key.take().ok_or_else(|| {
            LoggerError::unrenderable("map", "map value serialized before its key")
        })?;
        self.fields.push((key, value.serialize(self.child)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.fields))
    }
}

impl SerializeStruct for MapCapture {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.fields.push((key.to_owned(), value.serialize(self.child)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.fields))
    }
}

/// Wraps a tuple or struct variant's payload as `{"Variant": payload}`
pub(crate) struct VariantCapture<C> {
    variant: &'static str,
    inner: C,
}

impl SerializeTupleVariant for VariantCapture<SeqCapture> {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.inner.push(value)
    }

    fn end(self) -> Result<Value> {
        let payload = Value::Array(self.inner.items);
        Ok(Value::Object(vec![(self.variant.to_owned(), payload)]))
    }
}

impl SerializeStructVariant for VariantCapture<MapCapture> {
    type Ok = Value;
    type Error = LoggerError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value> {
        let payload = Value::Object(self.inner.fields);
        Ok(Value::Object(vec![(self.variant.to_owned(), payload)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Dot,
        Circle(f64),
        Line(i32, i32),
        Rect { w: u32, h: u32 },
    }

    struct Refuses;

    impl Serialize for Refuses {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not today"))
        }
    }

    #[test]
    fn test_enum_shapes() {
        assert_eq!(capture(&Shape::Dot), Value::String("Dot".to_string()));
        assert_eq!(
            capture(&Shape::Circle(1.5)),
            Value::Object(vec![("Circle".to_string(), Value::Float(1.5))])
        );
        assert_eq!(capture(&Shape::Line(1, 2)).render(), r#"{"Line":[1,2]}"#);
        assert_eq!(capture(&Shape::Rect { w: 3, h: 4 }).render(), r#"{"Rect":{"w":3,"h":4}}"#);
    }

    #[test]
    fn test_non_string_map_keys() {
        let mut ints = BTreeMap::new();
        ints.insert(9, 3);
        assert_eq!(capture(&ints).render(), r#"{"9":3}"#);

        let mut bools = BTreeMap::new();
        bools.insert(true, "yes");
        assert_eq!(capture(&bools).render(), r#"{"true":"yes"}"#);

        let mut compound = BTreeMap::new();
        compound.insert(vec![1, 2], "pair");
        assert_eq!(capture(&compound).render(), r#"{"<unhandled-array>":"pair"}"#);
    }

    #[test]
    fn test_failing_serialize_becomes_token() {
        assert_eq!(capture(&Refuses), Value::String("<unhandled-custom>".to_string()));
        assert!(matches!(
            try_capture(&vec![Refuses]),
            Err(LoggerError::Unrenderable { kind: "custom", .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut deep = Value::Null;
        for _ in 0..(MAX_DEPTH + 8) {
            deep = Value::Array(vec![deep]);
        }
        assert_eq!(capture(&deep), Value::String("<unhandled-recursion>".to_string()));

        let mut shallow = Value::Null;
        for _ in 0..8 {
            shallow = Value::Array(vec![shallow]);
        }
        assert_eq!(capture(&shallow), shallow);
    }

    #[test]
    fn test_bytes_and_chars() {
        assert_eq!(capture(&'x'), Value::String("x".to_string()));
        let bytes = serde_bytes_like(&[1, 2]);
        assert_eq!(bytes.render(), "[1,2]");
    }

    fn serde_bytes_like(data: &[u8]) -> Value {
        struct Bytes<'a>(&'a [u8]);
        impl Serialize for Bytes<'_> {
            fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_bytes(self.0)
            }
        }
        capture(&Bytes(data))
    }
}

//! Host dynamic object model
//!
//! [`Object`] is the dynamically typed, owned object graph a host hands to the
//! converter and gets back from it.
//!
//! ## Type Rules
//!
//! - `Int(1) != Float(1.0)`: numeric equality never crosses variants
//! - Floats use IEEE-754 equality
//! - `Str` equals a `WideStr` holding the same code points
//! - `Bytes` and `ByteArray` are distinct: equal payloads in different
//!   variants are not equal
//! - `List`, `Map`, and `ByteArray` are mutable on the host side and cannot be
//!   used as map keys; a `Tuple` can if every member can

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::string::FromUtf16Error;

/// Conversion class of an object
///
/// Every object falls in exactly one class; the converter dispatches on it
/// with an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// Maps onto a wire scalar (nil, integer, double, text, bytes)
    Scalar,
    /// List or map
    Collection,
    /// Geospatial wrapper
    Geospatial,
    /// Wildcard comparator marker
    Wildcard,
    /// Infinity comparator marker
    Infinity,
    /// No wire representation; goes through the fallback serializer
    Fallback,
}

/// Instance of an arbitrary host class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Fully qualified class name
    pub type_name: String,
    /// Attributes in definition order
    pub attrs: Vec<(String, Object)>,
}

impl Instance {
    /// Create an instance with no attributes
    pub fn new(type_name: impl Into<String>) -> Self {
        Instance {
            type_name: type_name.into(),
            attrs: Vec::new(),
        }
    }

    /// Builder: add an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Object>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Attribute by name
    pub fn attr(&self, name: &str) -> Option<&Object> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Host object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Object {
    /// The host's null
    None,
    /// Explicit server-nil marker
    Null,
    /// Boolean
    Bool(bool),
    /// Arbitrary precision integer (bounded here by `i128`)
    Int(i128),
    /// Double precision float
    Float(f64),
    /// UTF-8 text
    Str(String),
    /// Wide text, possibly with unpaired surrogates
    WideStr(Vec<u16>),
    /// Immutable bytes
    Bytes(Vec<u8>),
    /// Mutable byte buffer
    ByteArray(Vec<u8>),
    /// Mutable ordered sequence
    List(Vec<Object>),
    /// Immutable ordered sequence
    Tuple(Vec<Object>),
    /// Insertion ordered mapping
    Map(Vec<(Object, Object)>),
    /// Geospatial value wrapping its `geo_data`
    Geospatial(Box<Object>),
    /// Wildcard comparator marker
    Wildcard,
    /// Infinity comparator marker
    Infinity,
    /// Instance of a user class
    Instance(Instance),
}

impl Object {
    /// Conversion class
    pub fn class(&self) -> ObjectClass {
        match self {
            Object::None
            | Object::Null
            | Object::Int(_)
            | Object::Float(_)
            | Object::Str(_)
            | Object::WideStr(_)
            | Object::Bytes(_)
            | Object::ByteArray(_) => ObjectClass::Scalar,
            Object::List(_) | Object::Map(_) => ObjectClass::Collection,
            Object::Geospatial(_) => ObjectClass::Geospatial,
            Object::Wildcard => ObjectClass::Wildcard,
            Object::Infinity => ObjectClass::Infinity,
            // No boolean or tuple on the wire
            Object::Bool(_) | Object::Tuple(_) | Object::Instance(_) => ObjectClass::Fallback,
        }
    }

    /// Host type name, used in error messages
    pub fn type_name(&self) -> &str {
        match self {
            Object::None => "NoneType",
            Object::Null => "null",
            Object::Bool(_) => "bool",
            Object::Int(_) => "int",
            Object::Float(_) => "float",
            Object::Str(_) | Object::WideStr(_) => "str",
            Object::Bytes(_) => "bytes",
            Object::ByteArray(_) => "bytearray",
            Object::List(_) => "list",
            Object::Tuple(_) => "tuple",
            Object::Map(_) => "dict",
            Object::Geospatial(_) => "GeoJSON",
            Object::Wildcard => "CDTWildcard",
            Object::Infinity => "CDTInfinite",
            Object::Instance(i) => &i.type_name,
        }
    }

    /// Whether the object may be used as a map key
    pub fn is_hashable(&self) -> bool {
        match self {
            Object::List(_) | Object::Map(_) | Object::ByteArray(_) => false,
            Object::Tuple(items) => items.iter().all(Object::is_hashable),
            _ => true,
        }
    }

    /// True for the host null
    pub fn is_none(&self) -> bool {
        matches!(self, Object::None)
    }

    /// Text content of `Str` or `WideStr`
    ///
    /// Returns `None` for other variants. A `WideStr` with unpaired
    /// surrogates yields `Some(Err(..))`.
    pub fn as_text(&self) -> Option<Result<Cow<'_, str>, FromUtf16Error>> {
        match self {
            Object::Str(s) => Some(Ok(Cow::Borrowed(s))),
            Object::WideStr(w) => Some(String::from_utf16(w).map(Cow::Owned)),
            _ => None,
        }
    }

    /// Integer value
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Object::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Entry of a mapping with a text key
    pub fn get(&self, key: &str) -> Option<&Object> {
        match self {
            Object::Map(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k.as_text(), Some(Ok(t)) if t == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Named field: a mapping entry or an instance attribute
    pub fn field(&self, name: &str) -> Option<&Object> {
        match self {
            Object::Instance(i) => i.attr(name),
            _ => self.get(name),
        }
    }

    /// Build a `Str`
    pub fn str(s: impl Into<String>) -> Self {
        Object::Str(s.into())
    }

    /// Build a `WideStr` from UTF-8 text
    pub fn wide(s: &str) -> Self {
        Object::WideStr(s.encode_utf16().collect())
    }

    /// Build a `Map` from `(text, object)` pairs
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Object)>) -> Self {
        Object::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Object::Str(k.into()), v))
                .collect(),
        )
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::None, Object::None) => true,
            (Object::Null, Object::Null) => true,
            (Object::Bool(a), Object::Bool(b)) => a == b,
            (Object::Int(a), Object::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Str(a), Object::Str(b)) => a == b,
            (Object::WideStr(a), Object::WideStr(b)) => a == b,
            (Object::Str(s), Object::WideStr(w)) | (Object::WideStr(w), Object::Str(s)) => {
                s.encode_utf16().eq(w.iter().copied())
            }
            (Object::Bytes(a), Object::Bytes(b)) => a == b,
            (Object::ByteArray(a), Object::ByteArray(b)) => a == b,
            (Object::List(a), Object::List(b)) => a == b,
            (Object::Tuple(a), Object::Tuple(b)) => a == b,
            (Object::Map(a), Object::Map(b)) => a == b,
            (Object::Geospatial(a), Object::Geospatial(b)) => a == b,
            (Object::Wildcard, Object::Wildcard) => true,
            (Object::Infinity, Object::Infinity) => true,
            (Object::Instance(a), Object::Instance(b)) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Bool(b)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Int(i as i128)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Int(i as i128)
    }
}

impl From<i128> for Object {
    fn from(i: i128) -> Self {
        Object::Int(i)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Float(f)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::Str(s.to_string())
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::Str(s)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::List(items)
    }
}

impl From<Instance> for Object {
    fn from(i: Instance) -> Self {
        Object::Instance(i)
    }
}

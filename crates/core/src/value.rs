//! Wire value model
//!
//! This module defines:
//! - Value: tagged union for every storable datum
//! - Text: wire text with an explicit ownership state
//! - ByteBuf: byte payload that is borrowed, pooled, or owned
//! - BytesType: sub-type tag of a bytes payload
//!
//! ## Type Rules
//!
//! - Exactly one variant is active; different variants are NEVER equal
//!   (`Integer(1) != Double(1.0)`)
//! - Doubles use IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - The `BytesType` tag of a bytes payload is preserved end to end and picks
//!   the deserializer on the read path
//! - `Wildcard` and `Infinity` are comparator markers for predicates; they are
//!   never persisted

use crate::record::Record;
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// Shared nil marker
pub static NIL: Value<'static> = Value::Nil;

/// Shared wildcard comparator marker
pub static WILDCARD: Value<'static> = Value::Wildcard;

/// Shared infinity comparator marker
pub static INFINITY: Value<'static> = Value::Infinity;

// ============================================================================
// BytesType
// ============================================================================

/// Sub-type of a bytes payload
///
/// Values are the wire codes. `Raw` and `Blob` carry caller bytes untouched;
/// the language codes mark serialized payloads. `Native` is what this
/// binding's built-in serializer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BytesType {
    /// Plain bytes
    Raw = 0,
    /// Opaque blob (mutable byte buffers, user serializer output)
    Blob = 4,
    /// Java serialized payload
    Java = 7,
    /// C# serialized payload
    CSharp = 8,
    /// Payload of the built-in serializer
    Native = 9,
    /// Ruby serialized payload
    Ruby = 10,
    /// PHP serialized payload
    Php = 11,
    /// Erlang serialized payload
    Erlang = 12,
}

impl BytesType {
    /// Convert to byte representation
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Try to create from byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(BytesType::Raw),
            4 => Some(BytesType::Blob),
            7 => Some(BytesType::Java),
            8 => Some(BytesType::CSharp),
            9 => Some(BytesType::Native),
            10 => Some(BytesType::Ruby),
            11 => Some(BytesType::Php),
            12 => Some(BytesType::Erlang),
            _ => None,
        }
    }

    /// Serialized by another language's client; this binding cannot decode it
    pub fn is_foreign(&self) -> bool {
        matches!(
            self,
            BytesType::Java | BytesType::CSharp | BytesType::Ruby | BytesType::Php | BytesType::Erlang
        )
    }
}

// ============================================================================
// ByteBuf
// ============================================================================

/// Byte payload of a `Value::Bytes` or a raw user key
///
/// The variant is the ownership flag: `Borrowed` aliases caller memory and is
/// never freed here, `Pooled` is a slice of a conversion pool arena, `Owned`
/// is freed with the value.
#[derive(Clone)]
pub enum ByteBuf<'a> {
    /// Aliases caller memory
    Borrowed(&'a [u8]),
    /// Carved out of a conversion pool arena
    Pooled(Bytes),
    /// Heap buffer owned by the value
    Owned(Vec<u8>),
}

impl<'a> ByteBuf<'a> {
    /// Whether dropping this buffer releases memory
    pub fn is_owned(&self) -> bool {
        !matches!(self, ByteBuf::Borrowed(_))
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> ByteBuf<'static> {
        match self {
            ByteBuf::Borrowed(b) => ByteBuf::Owned(b.to_vec()),
            ByteBuf::Pooled(b) => ByteBuf::Pooled(b),
            ByteBuf::Owned(v) => ByteBuf::Owned(v),
        }
    }
}

impl Deref for ByteBuf<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            ByteBuf::Borrowed(b) => b,
            ByteBuf::Pooled(b) => b,
            ByteBuf::Owned(v) => v,
        }
    }
}

impl PartialEq for ByteBuf<'_> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl fmt::Debug for ByteBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ByteBuf::Borrowed(_) => "Borrowed",
            ByteBuf::Pooled(_) => "Pooled",
            ByteBuf::Owned(_) => "Owned",
        };
        write!(f, "{}({:?})", kind, &**self)
    }
}

impl<'a> From<&'a [u8]> for ByteBuf<'a> {
    fn from(b: &'a [u8]) -> Self {
        ByteBuf::Borrowed(b)
    }
}

impl From<Vec<u8>> for ByteBuf<'_> {
    fn from(v: Vec<u8>) -> Self {
        ByteBuf::Owned(v)
    }
}

impl From<Bytes> for ByteBuf<'_> {
    fn from(b: Bytes) -> Self {
        ByteBuf::Pooled(b)
    }
}

// ============================================================================
// Text
// ============================================================================

/// Wire text
///
/// Wire strings are byte sequences produced by the driver and are not
/// guaranteed to be UTF-8, so the buffer is kept as bytes. A text may also be
/// absent: the driver handed over a string value without a buffer.
#[derive(Clone, PartialEq)]
pub struct Text<'a> {
    buf: Option<Cow<'a, [u8]>>,
}

impl<'a> Text<'a> {
    /// Text that aliases caller memory
    pub fn borrowed(s: &'a str) -> Self {
        Text {
            buf: Some(Cow::Borrowed(s.as_bytes())),
        }
    }

    /// Text that owns its buffer
    pub fn owned(s: String) -> Self {
        Text {
            buf: Some(Cow::Owned(s.into_bytes())),
        }
    }

    /// Text from raw wire bytes (may not be valid UTF-8)
    pub fn from_wire(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        Text {
            buf: Some(bytes.into()),
        }
    }

    /// A string value without a buffer
    pub fn absent() -> Self {
        Text { buf: None }
    }

    /// True when there is no buffer at all
    pub fn is_absent(&self) -> bool {
        self.buf.is_none()
    }

    /// Whether dropping this text releases memory
    pub fn is_owned(&self) -> bool {
        matches!(self.buf, Some(Cow::Owned(_)))
    }

    /// Raw bytes, if present
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.buf.as_deref()
    }

    /// The text as `&str`, if present and valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Length in bytes (0 when absent)
    pub fn len(&self) -> usize {
        self.as_bytes().map_or(0, <[u8]>::len)
    }

    /// True when absent or zero length
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> Text<'static> {
        Text {
            buf: self.buf.map(|b| Cow::Owned(b.into_owned())),
        }
    }
}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.buf {
            None => f.write_str("Text(<absent>)"),
            Some(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "Text({:?})", s),
                Err(_) => write!(f, "Text({:?})", b),
            },
        }
    }
}

impl<'a> From<&'a str> for Text<'a> {
    fn from(s: &'a str) -> Self {
        Text::borrowed(s)
    }
}

impl From<String> for Text<'_> {
    fn from(s: String) -> Self {
        Text::owned(s)
    }
}

// ============================================================================
// Value
// ============================================================================

/// Wire value
#[derive(Debug, Clone)]
pub enum Value<'a> {
    /// Absence of a value (bin removal on write)
    Nil,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point (IEEE-754)
    Double(f64),
    /// Text
    Text(Text<'a>),
    /// Bytes with their sub-type tag
    Bytes(BytesType, ByteBuf<'a>),
    /// Ordered list
    List(Vec<Value<'a>>),
    /// Ordered map of key/value pairs
    Map(Vec<(Value<'a>, Value<'a>)>),
    /// Nested record
    Record(Box<Record<'a>>),
    /// GeoJSON document
    GeoJson(Cow<'a, str>),
    /// Wildcard comparator marker
    Wildcard,
    /// Infinity comparator marker
    Infinity,
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(ta, a), Value::Bytes(tb, b)) => ta == tb && a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::GeoJson(a), Value::GeoJson(b)) => a == b,
            (Value::Wildcard, Value::Wildcard) => true,
            (Value::Infinity, Value::Infinity) => true,
            // Different variants are never equal
            _ => false,
        }
    }
}

impl<'a> Value<'a> {
    /// Text value aliasing caller memory
    pub fn text(s: &'a str) -> Self {
        Value::Text(Text::borrowed(s))
    }

    /// Text value owning its buffer
    pub fn string(s: impl Into<String>) -> Self {
        Value::Text(Text::owned(s.into()))
    }

    /// Raw bytes aliasing caller memory
    pub fn raw_bytes(b: &'a [u8]) -> Self {
        Value::Bytes(BytesType::Raw, ByteBuf::Borrowed(b))
    }

    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Integer(_) => "Integer",
            Value::Double(_) => "Double",
            Value::Text(_) => "Text",
            Value::Bytes(..) => "Bytes",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
            Value::GeoJson(_) => "GeoJson",
            Value::Wildcard => "Wildcard",
            Value::Infinity => "Infinity",
        }
    }

    /// Check if this is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if this is one of the comparator markers
    pub fn is_marker(&self) -> bool {
        matches!(self, Value::Wildcard | Value::Infinity)
    }

    /// Get as i64 if this is an Integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Double
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Get as &str if this is valid UTF-8 Text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) => t.as_str(),
            _ => None,
        }
    }

    /// Get the payload and tag if this is Bytes
    pub fn as_bytes(&self) -> Option<(BytesType, &[u8])> {
        match self {
            Value::Bytes(ty, b) => Some((*ty, &**b)),
            _ => None,
        }
    }

    /// Get as a slice if this is a List
    pub fn as_list(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get the entries if this is a Map
    pub fn as_map(&self) -> Option<&[(Value<'a>, Value<'a>)]> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get the record if this is a Record
    pub fn as_record(&self) -> Option<&Record<'a>> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Detach this value from any borrowed caller memory
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Nil => Value::Nil,
            Value::Integer(i) => Value::Integer(i),
            Value::Double(d) => Value::Double(d),
            Value::Text(t) => Value::Text(t.into_owned()),
            Value::Bytes(ty, b) => Value::Bytes(ty, b.into_owned()),
            Value::List(l) => Value::List(l.into_iter().map(Value::into_owned).collect()),
            Value::Map(m) => Value::Map(
                m.into_iter()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
            ),
            Value::Record(r) => Value::Record(Box::new(r.into_owned())),
            Value::GeoJson(g) => Value::GeoJson(Cow::Owned(g.into_owned())),
            Value::Wildcard => Value::Wildcard,
            Value::Infinity => Value::Infinity,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<i64> for Value<'_> {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value<'_> {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value<'_> {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Text::owned(s))
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(l: Vec<Value<'a>>) -> Self {
        Value::List(l)
    }
}

impl<'a> From<Record<'a>> for Value<'a> {
    fn from(r: Record<'a>) -> Self {
        Value::Record(Box::new(r))
    }
}

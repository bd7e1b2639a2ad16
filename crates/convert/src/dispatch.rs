//! Value dispatcher
//!
//! One function per direction decides how each node of a graph is
//! converted. Collections call back into it for their members, so nesting is
//! handled by a single recursion with an explicit depth counter: a graph
//! deeper than `Limits::max_nesting_depth` is reported as `ClientError`
//! instead of exhausting the stack.

use crate::collection;
use crate::converter::Converter;
use crate::extension;
use crate::pool::ConversionPool;
use crate::record::{self, BinShape};
use crate::scalar;
use kvmarshal_core::{ConversionError, Result, Value, INFINITY, WILDCARD};
use kvmarshal_host::{Object, ObjectClass};

/// Write-path state of one conversion call
pub(crate) struct Encoder<'c> {
    pub(crate) conv: &'c Converter,
    pub(crate) pool: ConversionPool,
}

impl<'c> Encoder<'c> {
    pub(crate) fn new(conv: &'c Converter) -> Self {
        Encoder {
            conv,
            pool: ConversionPool::new(conv.config.pool_capacity),
        }
    }

    pub(crate) fn encode<'o>(&mut self, obj: &'o Object, depth: usize) -> Result<Value<'o>> {
        self.conv.limits.validate_depth(depth)?;
        match obj.class() {
            ObjectClass::Scalar => scalar::encode(obj),
            ObjectClass::Collection => collection::encode(self, obj, depth),
            ObjectClass::Geospatial => extension::encode_geo(self, obj),
            ObjectClass::Wildcard => Ok(WILDCARD.clone()),
            ObjectClass::Infinity => Ok(INFINITY.clone()),
            ObjectClass::Fallback => extension::serialize(self, obj),
        }
    }
}

/// Read-path state of one conversion call
pub(crate) struct Decoder<'c> {
    pub(crate) conv: &'c Converter,
}

impl<'c> Decoder<'c> {
    pub(crate) fn new(conv: &'c Converter) -> Self {
        Decoder { conv }
    }

    pub(crate) fn decode(&self, value: &Value<'_>, depth: usize) -> Result<Object> {
        self.conv.limits.validate_depth(depth)?;
        match value {
            Value::Nil => Ok(Object::None),
            Value::Integer(i) => Ok(Object::Int(*i as i128)),
            Value::Double(d) => Ok(Object::Float(*d)),
            Value::Text(t) => scalar::decode_text(t),
            Value::Bytes(ty, buf) => extension::decode_bytes(self.conv, *ty, buf),
            Value::List(items) => collection::decode_list(self, items, depth),
            Value::Map(entries) => collection::decode_map(self, entries, depth),
            Value::Record(r) => record::record_to_object_at(self, r, None, BinShape::Canonical, depth),
            Value::GeoJson(text) => extension::decode_geo(self.conv, text),
            Value::Wildcard | Value::Infinity => {
                Err(ConversionError::client("Unknown type for value"))
            }
        }
    }

    /// Like [`Decoder::decode`], but a list becomes a list of pairs
    pub(crate) fn decode_flattened(&self, value: &Value<'_>, depth: usize) -> Result<Object> {
        match value {
            Value::List(items) => {
                self.conv.limits.validate_depth(depth)?;
                collection::decode_pairs(self, items, depth)
            }
            other => self.decode(other, depth),
        }
    }
}

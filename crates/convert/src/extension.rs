//! Extension types and the serializer fallback
//!
//! - Geospatial objects become GeoJSON values when the driver supports them,
//!   and fall back to the serializer otherwise
//! - Objects with no wire form are serialized into pooled bytes tagged with
//!   the policy's bytes type
//! - On read, the bytes type tag alone picks the deserializer

use crate::converter::Converter;
use crate::dispatch::Encoder;
use kvmarshal_core::{ByteBuf, BytesType, ConversionError, Result, Value};
use kvmarshal_host::Object;
use std::borrow::Cow;
use tracing::{debug, warn};

pub(crate) fn encode_geo<'o>(enc: &mut Encoder<'_>, obj: &'o Object) -> Result<Value<'o>> {
    let geo_data = match obj {
        Object::Geospatial(data) => data.as_ref(),
        other => {
            return Err(ConversionError::client(format!(
                "{} is not a geospatial value",
                other.type_name()
            )))
        }
    };
    if enc.conv.driver.has_geo() {
        let text = enc
            .conv
            .geo
            .dumps(geo_data)
            .map_err(|e| ConversionError::client(e.to_string()))?;
        Ok(Value::GeoJson(Cow::Owned(text)))
    } else {
        warn!("driver lacks native geo support, serializing geo_data instead");
        serialize(enc, geo_data)
    }
}

pub(crate) fn decode_geo(conv: &Converter, text: &str) -> Result<Object> {
    let geo_data = conv
        .geo
        .loads(text)
        .map_err(|e| ConversionError::client(e.to_string()))?;
    Ok(Object::Geospatial(Box::new(geo_data)))
}

/// Serialize `obj` with the configured policy into a pooled buffer
pub(crate) fn serialize<'o>(enc: &mut Encoder<'_>, obj: &Object) -> Result<Value<'o>> {
    let conv = enc.conv;
    let policy = conv.serializer_policy();
    let ty = policy.bytes_type().ok_or_else(|| {
        ConversionError::invalid_param(format!(
            "Unable to serialize {}: no serializer selected",
            obj.type_name()
        ))
    })?;
    let serializer = conv.serializers.for_policy(policy).ok_or_else(|| {
        ConversionError::client(format!(
            "Unable to serialize {}: no user serializer registered",
            obj.type_name()
        ))
    })?;
    let bytes = enc.pool.acquire_bytes(|out| {
        serializer
            .serialize(obj, out)
            .map_err(|e| ConversionError::client(e.to_string()))
    })?;
    Ok(Value::Bytes(ty, ByteBuf::Pooled(bytes)))
}

/// Read a bytes payload; the tag alone picks the deserializer
///
/// Tags with no deserializer (a blob without a user serializer, or another
/// language's payload) come back as a `ByteArray`.
pub(crate) fn decode_bytes(conv: &Converter, ty: BytesType, buf: &ByteBuf<'_>) -> Result<Object> {
    if ty == BytesType::Raw {
        return Ok(Object::Bytes(buf.to_vec()));
    }
    match conv.serializers.for_bytes_type(ty) {
        Some(deserializer) => deserializer
            .deserialize(buf)
            .map_err(|e| ConversionError::client(e.to_string())),
        None => {
            if ty.is_foreign() {
                debug!(bytes_type = ty.as_byte(), len = buf.len(), "foreign serialized payload kept as bytes");
            }
            Ok(Object::ByteArray(buf.to_vec()))
        }
    }
}

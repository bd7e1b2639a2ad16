//! Scalar codec
//!
//! Nil, integers, doubles, text and raw bytes. Booleans have no wire scalar
//! and never reach this module; the dispatcher sends them to the fallback
//! serializer.

use kvmarshal_core::{ByteBuf, BytesType, ConversionError, Result, Text, Value};
use kvmarshal_host::Object;

/// Host scalar to wire value
///
/// `Str` and `Bytes` borrow from the object; `WideStr` is transcoded into an
/// owned UTF-8 buffer.
pub(crate) fn encode(obj: &Object) -> Result<Value<'_>> {
    match obj {
        Object::None | Object::Null => Ok(Value::Nil),
        Object::Int(i) => Ok(Value::Integer(int_to_i64(*i)?)),
        Object::Float(f) => Ok(Value::Double(*f)),
        Object::Str(s) => Ok(Value::Text(Text::borrowed(s))),
        Object::WideStr(w) => Ok(Value::Text(wide_to_text(w)?)),
        Object::Bytes(b) => Ok(Value::Bytes(BytesType::Raw, ByteBuf::Borrowed(b))),
        Object::ByteArray(b) => Ok(Value::Bytes(BytesType::Blob, ByteBuf::Borrowed(b))),
        other => Err(ConversionError::client(format!(
            "{} is not a scalar",
            other.type_name()
        ))),
    }
}

/// Range-check a host integer into a signed 64-bit integer
#[track_caller]
pub(crate) fn int_to_i64(i: i128) -> Result<i64> {
    i64::try_from(i).map_err(|_| ConversionError::invalid_param("integer value exceeds sys.maxsize"))
}

/// Transcode wide text into owned UTF-8 text
#[track_caller]
pub(crate) fn wide_to_text(w: &[u16]) -> Result<Text<'static>> {
    String::from_utf16(w)
        .map(Text::owned)
        .map_err(|_| ConversionError::invalid_param("Unicode value not encoded in utf-8."))
}

/// Decode wire text bytes
///
/// Strict UTF-8 first. Producers that hand over C strings may leave garbage
/// after the NUL terminator, so on failure the text is cut at the first NUL
/// and the decode retried.
pub(crate) fn decode_utf8(bytes: &[u8]) -> Option<&str> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Some(s);
    }
    let end = bytes.iter().position(|b| *b == 0)?;
    std::str::from_utf8(&bytes[..end]).ok()
}

/// Wire text to host object
///
/// Absent text becomes `None`; the empty string stays an empty string.
pub(crate) fn decode_text(text: &Text<'_>) -> Result<Object> {
    match text.as_bytes() {
        None => Ok(Object::None),
        Some(bytes) => decode_utf8(bytes)
            .map(|s| Object::Str(s.to_string()))
            .ok_or_else(|| ConversionError::client("Unable to decode text value as UTF-8")),
    }
}

//! Operation argument helpers
//!
//! Small conversions shared by the operation builders: metadata, offsets,
//! bin names and text arguments.

use crate::converter::Converter;
use crate::record::{gen_from_object, ttl_from_object};
use kvmarshal_core::{ConversionError, Result};
use kvmarshal_host::Object;
use std::borrow::Cow;
use tracing::warn;

/// Metadata of a single operation; unset fields keep the driver default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationMeta {
    /// Time to live, already folded into the wire's 32-bit form
    pub ttl: Option<u32>,
    /// Expected generation
    pub gen: Option<u16>,
}

impl Converter {
    /// Read operation metadata; `None` (absent or host null) is empty metadata
    pub fn operation_meta(&self, meta: Option<&Object>) -> Result<OperationMeta> {
        let meta = match meta {
            None | Some(Object::None) => return Ok(OperationMeta::default()),
            Some(meta @ Object::Map(_)) => meta,
            Some(_) => {
                return Err(ConversionError::invalid_param(
                    "Metadata should be of type dictionary",
                ))
            }
        };
        Ok(OperationMeta {
            ttl: meta.get("ttl").map(ttl_from_object).transpose()?,
            gen: meta.get("gen").map(gen_from_object).transpose()?,
        })
    }

    /// Read an index or offset argument
    ///
    /// Out of range values are rejected under strict mode and clamped to the
    /// nearest 64-bit bound otherwise.
    pub fn index_from_object(&self, obj: &Object) -> Result<i64> {
        let i = obj
            .as_int()
            .ok_or_else(|| ConversionError::invalid_param("Offset should be of int or long type"))?;
        match i64::try_from(i) {
            Ok(index) => Ok(index),
            Err(_) if self.is_strict() => Err(ConversionError::invalid_param(
                "integer value exceeds sys.maxsize",
            )),
            Err(_) => {
                let clamped = if i < 0 { i64::MIN } else { i64::MAX };
                warn!(index = %i, clamped, "index out of range, saturating");
                Ok(clamped)
            }
        }
    }

    /// Read a bin name argument
    pub fn bin_name_from_object<'o>(&self, obj: &'o Object) -> Result<Cow<'o, str>> {
        let name = match obj {
            Object::Str(s) => Cow::Borrowed(s.as_str()),
            Object::WideStr(_) => match obj.as_text() {
                Some(Ok(name)) => name,
                _ => return Err(ConversionError::invalid_param("Invalid unicode value")),
            },
            Object::ByteArray(b) => std::str::from_utf8(b)
                .map(Cow::Borrowed)
                .map_err(|_| ConversionError::invalid_param("Bin name should be of type string"))?,
            _ => {
                return Err(ConversionError::invalid_param(
                    "Bin name should be of type string",
                ))
            }
        };
        if self.is_strict() {
            self.limits.validate_bin_name(&name)?;
        }
        Ok(name)
    }

    /// Read a text argument
    pub fn text_from_object<'o>(&self, obj: &'o Object) -> Result<Cow<'o, str>> {
        match obj.as_text() {
            Some(Ok(text)) => Ok(text),
            Some(Err(_)) => Err(ConversionError::invalid_param("Invalid unicode value")),
            None => Err(ConversionError::invalid_param("String value required")),
        }
    }
}

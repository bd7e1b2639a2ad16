//! Record codec
//!
//! ## Write path
//!
//! Bins come from a host mapping, in its order. Each name must be text and,
//! under strict mode, at most 14 bytes. Any bin that fails to convert aborts
//! the record and nothing is returned. A bin that converts but cannot be set
//! stops the record under strict mode and is skipped otherwise.
//!
//! Metadata is an optional mapping with `ttl` and `gen` entries.
//!
//! ## Read path
//!
//! A record becomes `(key, meta, bins)`. `meta` always carries `ttl` and
//! `gen`. `bins` takes one of three shapes, see [`BinShape`].

use crate::collection::MapBuilder;
use crate::converter::Converter;
use crate::dispatch::Decoder;
use kvmarshal_core::{ConversionError, Key, Record, Result};
use kvmarshal_host::Object;
use std::borrow::Cow;
use tracing::{trace, warn};

/// TTL range accepted from the host: negative values are special markers
const TTL_MIN: i128 = i32::MIN as i128;
const TTL_MAX: i128 = u32::MAX as i128;

/// Shape of the bins slot on the read path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinShape {
    /// Mapping with one entry per bin name; a repeated name keeps its first
    /// position and its last value
    #[default]
    Canonical,
    /// Like `Canonical`, but list-valued bins are read as key/value pairs
    Flattened,
    /// List of `(name, value)` tuples, one per wire bin, duplicates kept in
    /// order
    OperateOrdered,
}

fn bin_name(obj: &Object) -> Result<Cow<'_, str>> {
    match obj.as_text() {
        Some(Ok(name)) => Ok(name),
        Some(Err(_)) => Err(ConversionError::invalid_param(
            "Unicode bin name not encoded in utf-8.",
        )),
        None => Err(ConversionError::invalid_param(
            "A bin name must be a string or unicode string.",
        )),
    }
}

/// Read a ttl: `[-2^31, 2^32 - 1]`, negatives kept as their 32-bit pattern
pub(crate) fn ttl_from_object(obj: &Object) -> Result<u32> {
    let ttl = obj
        .as_int()
        .ok_or_else(|| ConversionError::invalid_param("TTL should be an int or long"))?;
    if !(TTL_MIN..=TTL_MAX).contains(&ttl) {
        return Err(ConversionError::invalid_param(
            "integer value for ttl exceeds sys.maxsize",
        ));
    }
    if ttl < 0 {
        Ok(ttl as i32 as u32)
    } else {
        Ok(ttl as u32)
    }
}

pub(crate) fn gen_from_object(obj: &Object) -> Result<u16> {
    let gen = obj
        .as_int()
        .ok_or_else(|| ConversionError::invalid_param("Generation should be an int or long"))?;
    u16::try_from(gen)
        .map_err(|_| ConversionError::invalid_param("integer value for gen exceeds sys.maxsize"))
}

fn apply_meta(record: &mut Record<'_>, meta: Option<&Object>) -> Result<()> {
    let meta = match meta {
        None | Some(Object::None) => return Ok(()),
        Some(meta @ Object::Map(_)) => meta,
        Some(_) => return Err(ConversionError::invalid_param("meta must be a dictionary")),
    };
    if let Some(ttl) = meta.get("ttl") {
        record.ttl = ttl_from_object(ttl)?;
    }
    if let Some(gen) = meta.get("gen") {
        record.gen = gen_from_object(gen)?;
    }
    Ok(())
}

fn meta_to_object(record: &Record<'_>) -> Object {
    Object::map([
        ("ttl", Object::Int(record.ttl as i128)),
        ("gen", Object::Int(record.gen as i128)),
    ])
}

/// Read a record at a given depth (records can nest inside values)
pub(crate) fn record_to_object_at(
    dec: &Decoder<'_>,
    record: &Record<'_>,
    key: Option<&Key<'_>>,
    shape: BinShape,
    depth: usize,
) -> Result<Object> {
    let key = key
        .or(record.key.as_ref())
        .map_or(Object::None, |k| dec.conv.key_to_object(k));

    let bins = match shape {
        BinShape::OperateOrdered => {
            let mut pairs = Vec::with_capacity(record.len());
            for bin in record.iter() {
                let value = dec.decode(&bin.value, depth + 1)?;
                pairs.push(Object::Tuple(vec![Object::Str(bin.name.clone()), value]));
            }
            Object::List(pairs)
        }
        BinShape::Canonical | BinShape::Flattened => {
            let mut map = MapBuilder::with_capacity(record.len());
            for bin in record.iter() {
                let value = if shape == BinShape::Flattened {
                    dec.decode_flattened(&bin.value, depth + 1)?
                } else {
                    dec.decode(&bin.value, depth + 1)?
                };
                map.insert(Object::Str(bin.name.clone()), value);
            }
            map.finish()
        }
    };

    Ok(Object::Tuple(vec![key, meta_to_object(record), bins]))
}

impl Converter {
    /// Build a record from a host bin mapping and optional metadata
    pub fn to_record<'o>(&self, bins: &'o Object, meta: Option<&Object>) -> Result<Record<'o>> {
        let entries = match bins {
            Object::Map(entries) => entries,
            _ => {
                return Err(ConversionError::invalid_param(
                    "Record should be passed as bin-value pair",
                ))
            }
        };
        trace!(bins = entries.len(), "object to record");

        let mut enc = self.encoder();
        let mut record = Record::with_capacity(entries.len());
        for (name, value) in entries {
            let name = bin_name(name)?;
            if self.is_strict() {
                self.limits.validate_bin_name(&name)?;
            }
            let value = enc.encode(value, 0)?;
            if !record.set(name.into_owned(), value) {
                if self.is_strict() {
                    return Err(ConversionError::bin_name("Unable to set key-value pair"));
                }
                warn!("bin could not be set, skipping");
            }
        }
        apply_meta(&mut record, meta)?;
        Ok(record)
    }

    /// Externalize a record as `(key, meta, bins)`
    ///
    /// `key` overrides the key stored in the record; with neither, the key
    /// slot is `None`.
    pub fn record_to_object(
        &self,
        record: &Record<'_>,
        key: Option<&Key<'_>>,
        shape: BinShape,
    ) -> Result<Object> {
        trace!(bins = record.len(), ?shape, "record to object");
        record_to_object_at(&self.decoder(), record, key, shape, 0)
    }

    /// Externalize only the bins of a record, in the given shape
    pub fn bins_to_object(&self, record: &Record<'_>, shape: BinShape) -> Result<Object> {
        match self.record_to_object(record, None, shape)? {
            Object::Tuple(mut slots) if slots.len() == 3 => Ok(slots.swap_remove(2)),
            _ => Err(ConversionError::client("record is null")),
        }
    }

    /// Externalize only the metadata of a record: `{ttl, gen}`
    pub fn meta_to_object(&self, record: &Record<'_>) -> Object {
        meta_to_object(record)
    }
}

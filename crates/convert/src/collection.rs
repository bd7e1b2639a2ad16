//! Collection codec
//!
//! Lists and maps in both directions. Members go back through the dispatcher
//! with the depth increased by one. A member that fails to convert aborts the
//! whole collection; the partially built one is dropped with the error.

use crate::dispatch::{Decoder, Encoder};
use kvmarshal_core::{ConversionError, Result, Value};
use kvmarshal_host::Object;
use std::collections::HashMap;
use tracing::debug;

const UNHASHABLE_KEY: &str = "Unable to use unhashable type as a dictionary key";

pub(crate) fn encode<'o>(enc: &mut Encoder<'_>, obj: &'o Object, depth: usize) -> Result<Value<'o>> {
    match obj {
        Object::List(items) => encode_list(enc, items, depth),
        Object::Map(entries) => encode_map(enc, entries, depth),
        other => Err(ConversionError::client(format!(
            "{} is not a collection",
            other.type_name()
        ))),
    }
}

fn encode_list<'o>(enc: &mut Encoder<'_>, items: &'o [Object], depth: usize) -> Result<Value<'o>> {
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        list.push(enc.encode(item, depth + 1)?);
    }
    Ok(Value::List(list))
}

fn encode_map<'o>(
    enc: &mut Encoder<'_>,
    entries: &'o [(Object, Object)],
    depth: usize,
) -> Result<Value<'o>> {
    let mut map = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        if !k.is_hashable() {
            return Err(ConversionError::client(UNHASHABLE_KEY));
        }
        let key = enc.encode(k, depth + 1)?;
        let value = enc.encode(v, depth + 1)?;
        map.push((key, value));
    }
    Ok(Value::Map(map))
}

pub(crate) fn decode_list(dec: &Decoder<'_>, items: &[Value<'_>], depth: usize) -> Result<Object> {
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        list.push(dec.decode(item, depth + 1)?);
    }
    Ok(Object::List(list))
}

/// Hashable form of the map keys the decoder produces most
#[derive(Debug, PartialEq, Eq, Hash)]
enum IndexKey {
    Int(i128),
    Str(String),
    Bytes(Vec<u8>),
}

impl IndexKey {
    fn of(obj: &Object) -> Option<Self> {
        match obj {
            Object::Int(i) => Some(IndexKey::Int(*i)),
            Object::Str(s) => Some(IndexKey::Str(s.clone())),
            // equal to the Str with the same code points
            Object::WideStr(_) => match obj.as_text() {
                Some(Ok(s)) => Some(IndexKey::Str(s.into_owned())),
                _ => None,
            },
            Object::Bytes(b) => Some(IndexKey::Bytes(b.clone())),
            _ => None,
        }
    }
}

/// Ordered host mapping where a repeated key keeps its first position and
/// takes the last value
///
/// Integer, text and byte keys are found through a hash index. Other keys
/// (floats, tuples, None) never equal an indexed key, so they are only
/// compared against each other.
pub(crate) struct MapBuilder {
    entries: Vec<(Object, Object)>,
    index: HashMap<IndexKey, usize>,
    unindexed: Vec<usize>,
}

impl MapBuilder {
    pub(crate) fn with_capacity(n: usize) -> Self {
        MapBuilder {
            entries: Vec::with_capacity(n),
            index: HashMap::with_capacity(n),
            unindexed: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: Object, value: Object) {
        let slot = match IndexKey::of(&key) {
            Some(ik) => match self.index.get(&ik) {
                Some(&i) => Some(i),
                None => {
                    self.index.insert(ik, self.entries.len());
                    None
                }
            },
            None => {
                let found = self
                    .unindexed
                    .iter()
                    .copied()
                    .find(|&i| self.entries[i].0 == key);
                if found.is_none() {
                    self.unindexed.push(self.entries.len());
                }
                found
            }
        };
        match slot {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub(crate) fn finish(self) -> Object {
        Object::Map(self.entries)
    }
}

pub(crate) fn decode_map(
    dec: &Decoder<'_>,
    entries: &[(Value<'_>, Value<'_>)],
    depth: usize,
) -> Result<Object> {
    let mut map = MapBuilder::with_capacity(entries.len());
    for (k, v) in entries {
        let key = dec.decode(k, depth + 1)?;
        if !key.is_hashable() {
            return Err(ConversionError::client(UNHASHABLE_KEY));
        }
        let value = dec.decode(v, depth + 1)?;
        map.insert(key, value);
    }
    Ok(map.finish())
}

/// Interleaved `[k0, v0, k1, v1, ..]` list to `[(k0, v0), (k1, v1), ..]`
pub(crate) fn decode_pairs(dec: &Decoder<'_>, items: &[Value<'_>], depth: usize) -> Result<Object> {
    if items.len() % 2 != 0 {
        return Err(ConversionError::client("Invalid key list of key/value pairs"));
    }
    debug!(pairs = items.len() / 2, "flattening list into key/value pairs");
    let mut pairs = Vec::with_capacity(items.len() / 2);
    for chunk in items.chunks_exact(2) {
        let key = dec.decode(&chunk[0], depth + 1)?;
        let value = dec.decode(&chunk[1], depth + 1)?;
        pairs.push(Object::Tuple(vec![key, value]));
    }
    Ok(Object::List(pairs))
}

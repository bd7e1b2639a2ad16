//! Shared helpers for the conversion suite

#![allow(dead_code)]

use kvmarshal::{Converter, ConverterConfig, CtxKind, Instance, Object};

/// Lenient converter with default settings
pub fn converter() -> Converter {
    Converter::default()
}

/// Converter with strict type checks
pub fn strict_converter() -> Converter {
    Converter::new(ConverterConfig::strict())
}

/// `(ns, set, key)` key tuple
pub fn key_tuple(ns: &str, set: &str, key: impl Into<Object>) -> Object {
    Object::Tuple(vec![ns.into(), set.into(), key.into()])
}

/// `(ns, set, None, digest)` key tuple
pub fn digest_tuple(ns: &str, set: &str, digest: Vec<u8>) -> Object {
    Object::Tuple(vec![ns.into(), set.into(), Object::None, Object::ByteArray(digest)])
}

/// A context step object as the host builds it
pub fn ctx_step(kind: CtxKind, value: impl Into<Object>) -> Object {
    Object::from(
        Instance::new("cdt_ctx._cdt_ctx")
            .with_attr("id", Object::Int(kind.id() as i128))
            .with_attr("value", value),
    )
}

/// `{ttl, gen}` metadata mapping
pub fn meta(ttl: i64, gen: i64) -> Object {
    Object::map([("ttl", Object::from(ttl)), ("gen", Object::from(gen))])
}

/// Split a `(key, meta, bins)` tuple
pub fn unpack_record(obj: Object) -> (Object, Object, Object) {
    match obj {
        Object::Tuple(mut slots) if slots.len() == 3 => {
            let bins = slots.remove(2);
            let meta = slots.remove(1);
            let key = slots.remove(0);
            (key, meta, bins)
        }
        other => panic!("Expected (key, meta, bins), got {:?}", other),
    }
}

//! kvmarshal - host object marshaling for a key-value store client
//!
//! Converts a host's dynamic object graphs into the store's wire values,
//! keys, records and context paths, and converts read results back.
//!
//! # Quick Start
//!
//! ```ignore
//! use kvmarshal::{Converter, Object};
//!
//! let conv = Converter::default();
//! let key = conv.to_key(&Object::Tuple(vec!["test".into(), "demo".into(), "k1".into()]))?;
//! let bins = Object::map([("a", Object::from(1i64))]);
//! let record = conv.to_record(&bins, None)?;
//! ```
//!
//! # Architecture
//!
//! - `kvmarshal-core`: wire value model and error taxonomy
//! - `kvmarshal-host`: host object model, serializers and geo codec
//! - `kvmarshal-convert`: the converter itself

pub use kvmarshal_convert::*;
pub use kvmarshal_core::{
    BatchRead, Bin, ByteBuf, BytesType, ContextPath, CtxKind, CtxStep, Digest, Key, Limits,
    ReadOutcome, Record, SourceLocation, Text, UserKey, Value, DIGEST_SIZE, INFINITY, NIL,
    WILDCARD,
};
pub use kvmarshal_host::{
    GeoCodec, Instance, JsonGeoCodec, NativeSerializer, Object, ObjectClass, Serializer,
    SerializerError, SerializerPolicy,
};

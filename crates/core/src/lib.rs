//! Wire value model for kvmarshal
//!
//! This crate defines the types the conversion layer produces and consumes:
//! - Value: tagged union for every storable datum (plus Text, ByteBuf, BytesType)
//! - Key: namespace, optional set, user key or digest
//! - Record: ordered bins plus generation and ttl
//! - ContextPath: addressing path into nested collections
//! - BatchRead: per-key batch read outcome
//! - Limits: nesting depth and bin name length bounds
//! - Error: ErrorKind, ConversionError, and the Outcome status record

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod context;
pub mod error;
pub mod key;
pub mod limits;
pub mod record;
pub mod value;

pub use batch::{BatchRead, ReadOutcome};
pub use context::{ContextPath, CtxKind, CtxStep};
pub use error::{ConversionError, ErrorKind, Outcome, Result, SourceLocation, STATUS_OK};
pub use key::{Digest, Key, KeyError, UserKey, DIGEST_SIZE};
pub use limits::{LimitError, Limits};
pub use record::{Bin, Record, BIN_NAME_MAX_LEN};
pub use value::{ByteBuf, BytesType, Text, Value, INFINITY, NIL, WILDCARD};

//! Record keys
//!
//! A key locates one record: a namespace, an optional set, and either a user
//! key or a precomputed digest.
//!
//! ## Contract
//!
//! - The namespace is always present and non-empty
//! - A key always carries at least one locator: construction requires either a
//!   user key or a digest
//! - A digest is exactly [`DIGEST_SIZE`] bytes
//! - Raw byte user keys are never empty
//! - Digests are computed by the driver; this crate only carries them. A key
//!   built from a user key may later have the driver's digest attached.

use crate::error::ConversionError;
use crate::value::{ByteBuf, Text};
use std::fmt;
use thiserror::Error;

/// Size of a record digest in bytes
pub const DIGEST_SIZE: usize = 20;

/// Fixed-size content-derived record locator
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Wrap an array
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }

    /// Copy from a slice, which must be exactly [`DIGEST_SIZE`] bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let arr: [u8; DIGEST_SIZE] = bytes
            .try_into()
            .map_err(|_| KeyError::DigestSize { actual: bytes.len() })?;
        Ok(Digest(arr))
    }

    /// Digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Digest(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

/// Caller-supplied record locator
#[derive(Debug, Clone, PartialEq)]
pub enum UserKey<'a> {
    /// Signed 64-bit integer key
    Integer(i64),
    /// Text key
    Text(Text<'a>),
    /// Raw byte key (never empty)
    Bytes(ByteBuf<'a>),
}

impl<'a> UserKey<'a> {
    /// Raw byte key, rejecting an empty buffer
    pub fn bytes(buf: impl Into<ByteBuf<'a>>) -> Result<Self, KeyError> {
        let buf = buf.into();
        if buf.is_empty() {
            return Err(KeyError::EmptyBytes);
        }
        Ok(UserKey::Bytes(buf))
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> UserKey<'static> {
        match self {
            UserKey::Integer(i) => UserKey::Integer(i),
            UserKey::Text(t) => UserKey::Text(t.into_owned()),
            UserKey::Bytes(b) => UserKey::Bytes(b.into_owned()),
        }
    }
}

impl From<i64> for UserKey<'_> {
    fn from(i: i64) -> Self {
        UserKey::Integer(i)
    }
}

impl<'a> From<&'a str> for UserKey<'a> {
    fn from(s: &'a str) -> Self {
        UserKey::Text(Text::borrowed(s))
    }
}

impl From<String> for UserKey<'_> {
    fn from(s: String) -> Self {
        UserKey::Text(Text::owned(s))
    }
}

/// A record key
#[derive(Debug, Clone, PartialEq)]
pub struct Key<'a> {
    namespace: String,
    set: Option<String>,
    user_key: Option<UserKey<'a>>,
    digest: Option<Digest>,
}

impl<'a> Key<'a> {
    /// Key located by a user key
    pub fn with_user_key(
        namespace: impl Into<String>,
        set: Option<String>,
        user_key: UserKey<'a>,
    ) -> Result<Self, KeyError> {
        let namespace = validate_namespace(namespace.into())?;
        Ok(Key {
            namespace,
            set,
            user_key: Some(user_key),
            digest: None,
        })
    }

    /// Key located by a precomputed digest
    pub fn with_digest(
        namespace: impl Into<String>,
        set: Option<String>,
        digest: Digest,
    ) -> Result<Self, KeyError> {
        let namespace = validate_namespace(namespace.into())?;
        Ok(Key {
            namespace,
            set,
            user_key: None,
            digest: Some(digest),
        })
    }

    /// Surface a digest computed by the driver
    pub fn attach_digest(&mut self, digest: Digest) {
        self.digest = Some(digest);
    }

    /// Namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Set, if any
    pub fn set(&self) -> Option<&str> {
        self.set.as_deref()
    }

    /// User key, if the key was built from one
    pub fn user_key(&self) -> Option<&UserKey<'a>> {
        self.user_key.as_ref()
    }

    /// Digest, if supplied or attached
    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref()
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> Key<'static> {
        Key {
            namespace: self.namespace,
            set: self.set,
            user_key: self.user_key.map(UserKey::into_owned),
            digest: self.digest,
        }
    }
}

fn validate_namespace(namespace: String) -> Result<String, KeyError> {
    if namespace.is_empty() {
        return Err(KeyError::EmptyNamespace);
    }
    Ok(namespace)
}

/// Key construction errors
///
/// All of these are caller input problems and map to `InvalidParam`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Namespace is the empty string
    #[error("namespace must be a non-empty string")]
    EmptyNamespace,

    /// Digest is not exactly `DIGEST_SIZE` bytes
    #[error("digest size is invalid. should be {} bytes, but received {actual}", DIGEST_SIZE)]
    DigestSize {
        /// Length actually received
        actual: usize,
    },

    /// Raw byte user key is empty
    #[error("Byte array size cannot be 0")]
    EmptyBytes,
}

impl KeyError {
    /// Stable reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::EmptyNamespace => "empty_namespace",
            KeyError::DigestSize { .. } => "digest_size",
            KeyError::EmptyBytes => "empty_bytes",
        }
    }
}

impl From<KeyError> for ConversionError {
    #[track_caller]
    fn from(err: KeyError) -> Self {
        ConversionError::invalid_param(err.to_string())
    }
}

//! Key codec
//!
//! ## Input shapes
//!
//! - positional: `(ns, set, key)` or `(ns, set, None, digest)`
//! - named: a mapping with `ns`, `set`, `key` and `digest` entries
//!
//! ## Rules
//!
//! - `ns` is required text; `set` is optional text (`None` means no set)
//! - a non-`None` user key wins over a digest
//! - user keys: text, integer (signed 64-bit), or non-empty bytes
//! - digests: bytes of exactly 20
//!
//! ## Output shape
//!
//! `(ns, set, key, digest)`, with `None` in every slot that has no value.

use crate::converter::Converter;
use crate::scalar;
use kvmarshal_core::{ByteBuf, ConversionError, Digest, Key, Result, Text, UserKey};
use kvmarshal_host::Object;
use std::borrow::Cow;
use tracing::trace;

struct KeyParts<'o> {
    ns: Option<&'o Object>,
    set: Option<&'o Object>,
    user_key: Option<&'o Object>,
    digest: Option<&'o Object>,
}

impl<'o> KeyParts<'o> {
    fn from_object(obj: &'o Object) -> Result<Self> {
        match obj {
            Object::Tuple(items) => {
                if !(3..=4).contains(&items.len()) {
                    return Err(ConversionError::invalid_param(
                        "key tuple must be (Namespace, Set, Key) or (Namespace, Set, None, Digest)",
                    ));
                }
                Ok(KeyParts {
                    ns: items.first(),
                    set: items.get(1),
                    user_key: items.get(2),
                    digest: items.get(3),
                })
            }
            Object::Map(_) => Ok(KeyParts {
                ns: obj.get("ns"),
                set: obj.get("set"),
                user_key: obj.get("key"),
                digest: obj.get("digest"),
            }),
            _ => Err(ConversionError::invalid_param("key is invalid")),
        }
    }
}

/// Present and not the host null
fn given(obj: Option<&Object>) -> Option<&Object> {
    obj.filter(|o| !o.is_none())
}

fn text_of<'o>(obj: &'o Object, message: &str) -> Result<Cow<'o, str>> {
    match obj.as_text() {
        Some(Ok(text)) => Ok(text),
        _ => Err(ConversionError::invalid_param(message)),
    }
}

fn user_key_from_object(obj: &Object) -> Result<UserKey<'_>> {
    match obj {
        Object::Str(s) => Ok(UserKey::Text(Text::borrowed(s))),
        Object::WideStr(w) => Ok(UserKey::Text(scalar::wide_to_text(w)?)),
        Object::Int(i) => i64::try_from(*i)
            .map(UserKey::Integer)
            .map_err(|_| ConversionError::invalid_param("integer value for KEY exceeds sys.maxsize")),
        Object::Bytes(b) | Object::ByteArray(b) => Ok(UserKey::bytes(ByteBuf::Borrowed(b))?),
        _ => Err(ConversionError::invalid_param("key is invalid")),
    }
}

fn digest_from_object(obj: &Object) -> Result<Digest> {
    match obj {
        Object::Bytes(b) | Object::ByteArray(b) => Ok(Digest::from_slice(b)?),
        _ => Err(ConversionError::invalid_param(
            "digest is invalid. expected a bytearray",
        )),
    }
}

fn user_key_to_object(user_key: &UserKey<'_>) -> Object {
    match user_key {
        UserKey::Integer(i) => Object::Int(*i as i128),
        UserKey::Text(text) => match text.as_bytes() {
            None => Object::None,
            Some(bytes) => match scalar::decode_utf8(bytes) {
                Some(s) => Object::Str(s.to_string()),
                None => Object::Bytes(bytes.to_vec()),
            },
        },
        UserKey::Bytes(buf) => Object::ByteArray(buf.to_vec()),
    }
}

fn non_empty_text(s: Option<&str>) -> Object {
    match s {
        Some(s) if !s.is_empty() => Object::Str(s.to_string()),
        _ => Object::None,
    }
}

impl Converter {
    /// Parse a host key shape into a key
    pub fn to_key<'o>(&self, obj: &'o Object) -> Result<Key<'o>> {
        trace!(type_name = obj.type_name(), "object to key");
        let parts = KeyParts::from_object(obj)?;

        let ns = parts
            .ns
            .ok_or_else(|| ConversionError::invalid_param("namespace is required"))?;
        let ns = text_of(ns, "namespace must be a string")?.into_owned();

        let set = match given(parts.set) {
            Some(set) => Some(text_of(set, "set must be a string")?.into_owned()),
            None => None,
        };

        if let Some(user_key) = given(parts.user_key) {
            let user_key = user_key_from_object(user_key)?;
            return Ok(Key::with_user_key(ns, set, user_key)?);
        }
        if let Some(digest) = given(parts.digest) {
            let digest = digest_from_object(digest)?;
            return Ok(Key::with_digest(ns, set, digest)?);
        }
        Err(ConversionError::invalid_param("either key or digest is required"))
    }

    /// Externalize a key as `(ns, set, key, digest)`
    ///
    /// Stored text that is not valid UTF-8 comes back as `Bytes` instead of
    /// failing.
    pub fn key_to_object(&self, key: &Key<'_>) -> Object {
        Object::Tuple(vec![
            non_empty_text(Some(key.namespace())),
            non_empty_text(key.set()),
            key.user_key().map_or(Object::None, user_key_to_object),
            key.digest()
                .map_or(Object::None, |d| Object::ByteArray(d.as_bytes().to_vec())),
        ])
    }
}

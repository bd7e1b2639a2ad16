//! Fallback serializer boundary
//!
//! Objects with no wire representation (booleans, tuples, class instances)
//! are turned into bytes by a serializer. The serializer in use is picked by a
//! [`SerializerPolicy`]; the bytes type tag written next to the payload picks
//! the deserializer on the read path, so reads never consult the policy.
//!
//! | Policy | Serializer | Tag |
//! |--------|------------|-----|
//! | `none` | none, the conversion fails | |
//! | `native` | [`NativeSerializer`] (bincode) | `Native` |
//! | `user` | the registered user serializer | `Blob` |

use crate::object::Object;
use kvmarshal_core::BytesType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Serializer errors
#[derive(Debug, Error)]
pub enum SerializerError {
    /// Encoding the object failed
    #[error("Unable to serialize {type_name}: {reason}")]
    Serialize {
        /// Host type of the object
        type_name: String,
        /// Why it failed
        reason: String,
    },

    /// Decoding the payload failed
    #[error("Unable to deserialize bytes: {0}")]
    Deserialize(String),

    /// Writing the payload failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Object to bytes and back
pub trait Serializer: Send + Sync {
    /// Write the encoded object into `out`
    fn serialize(&self, obj: &Object, out: &mut dyn io::Write) -> Result<(), SerializerError>;

    /// Decode an object from a payload this serializer wrote
    fn deserialize(&self, bytes: &[u8]) -> Result<Object, SerializerError>;
}

/// Which serializer handles unrepresentable objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializerPolicy {
    /// No fallback serialization
    None,
    /// The built-in serializer
    #[default]
    Native,
    /// The caller-registered serializer
    User,
}

impl SerializerPolicy {
    /// Bytes type tag written with this policy's output
    pub fn bytes_type(&self) -> Option<BytesType> {
        match self {
            SerializerPolicy::None => None,
            SerializerPolicy::Native => Some(BytesType::Native),
            SerializerPolicy::User => Some(BytesType::Blob),
        }
    }
}

/// Built-in serializer
///
/// Encodes the object graph with bincode. Payloads are only readable by this
/// binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSerializer;

impl Serializer for NativeSerializer {
    fn serialize(&self, obj: &Object, out: &mut dyn io::Write) -> Result<(), SerializerError> {
        bincode::serialize_into(out, obj).map_err(|e| SerializerError::Serialize {
            type_name: obj.type_name().to_string(),
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Object, SerializerError> {
        bincode::deserialize(bytes).map_err(|e| SerializerError::Deserialize(e.to_string()))
    }
}

/// The serializers available to a converter
#[derive(Clone, Default)]
pub struct Serializers {
    native: NativeSerializer,
    user: Option<Arc<dyn Serializer>>,
}

impl Serializers {
    /// Only the built-in serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user serializer
    pub fn with_user(mut self, user: Arc<dyn Serializer>) -> Self {
        self.user = Some(user);
        self
    }

    /// Built-in serializer
    pub fn native(&self) -> &dyn Serializer {
        &self.native
    }

    /// User serializer, if registered
    pub fn user(&self) -> Option<&dyn Serializer> {
        self.user.as_deref()
    }

    /// Serializer for a policy; `None` when the policy selects nothing or no
    /// user serializer is registered
    pub fn for_policy(&self, policy: SerializerPolicy) -> Option<&dyn Serializer> {
        match policy {
            SerializerPolicy::None => None,
            SerializerPolicy::Native => Some(self.native()),
            SerializerPolicy::User => self.user(),
        }
    }

    /// Deserializer for a bytes type tag
    pub fn for_bytes_type(&self, ty: BytesType) -> Option<&dyn Serializer> {
        match ty {
            BytesType::Native => Some(self.native()),
            BytesType::Blob => self.user(),
            _ => None,
        }
    }
}

impl fmt::Debug for Serializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializers")
            .field("native", &self.native)
            .field("user", &self.user.is_some())
            .finish()
    }
}

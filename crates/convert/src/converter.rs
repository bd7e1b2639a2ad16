//! The converter
//!
//! A [`Converter`] bundles what every conversion needs: the configuration,
//! the driver's capabilities, the serializers and the geo codec. It holds no
//! per-call state; each entry point builds its own pool and drops it before
//! returning, so one converter can serve many threads.
//!
//! Entry points for keys, records, batches, context paths and operation
//! arguments live next to their codecs; this module holds the generic value
//! entry points.

use crate::config::{ConfigError, ConverterConfig};
use crate::dispatch::{Decoder, Encoder};
use crate::driver::{Capabilities, Driver};
use kvmarshal_core::{Limits, Result, Value};
use kvmarshal_host::{GeoCodec, JsonGeoCodec, Object, Serializer, SerializerPolicy, Serializers};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::trace;

/// Host object to wire value converter and back
#[derive(Clone)]
pub struct Converter {
    pub(crate) config: ConverterConfig,
    pub(crate) limits: Limits,
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) serializers: Serializers,
    pub(crate) geo: Arc<dyn GeoCodec>,
}

impl Converter {
    /// Converter for a driver with native geo support, no user serializer and
    /// the JSON geo codec
    pub fn new(config: ConverterConfig) -> Self {
        let limits = config.limits();
        Converter {
            config,
            limits,
            driver: Arc::new(Capabilities::default()),
            serializers: Serializers::new(),
            geo: Arc::new(JsonGeoCodec),
        }
    }

    /// Converter configured from a TOML file
    pub fn from_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(ConverterConfig::from_file(path)?))
    }

    /// Use the given driver capabilities
    pub fn with_driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.driver = driver;
        self
    }

    /// Register the user serializer
    pub fn with_user_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializers = self.serializers.with_user(serializer);
        self
    }

    /// Use the given geo codec
    pub fn with_geo_codec(mut self, geo: Arc<dyn GeoCodec>) -> Self {
        self.geo = geo;
        self
    }

    /// Change the fallback serializer policy
    pub fn set_serializer_policy(&mut self, policy: SerializerPolicy) {
        self.config.serializer = policy;
    }

    /// Configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Limits in force
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Whether strict mode is on
    pub fn is_strict(&self) -> bool {
        self.config.strict_types
    }

    /// Fallback serializer policy
    pub fn serializer_policy(&self) -> SerializerPolicy {
        self.config.serializer
    }

    pub(crate) fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self)
    }

    pub(crate) fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self)
    }

    // ========================================================================
    // Generic value entry points
    // ========================================================================

    /// Convert any host object into a wire value
    ///
    /// Text and bytes borrow from `obj` where possible; call
    /// [`Value::into_owned`] to detach the result.
    pub fn to_value<'o>(&self, obj: &'o Object) -> Result<Value<'o>> {
        trace!(type_name = obj.type_name(), "object to value");
        self.encoder().encode(obj, 0)
    }

    /// Convert a wire value into a host object
    pub fn to_object(&self, value: &Value<'_>) -> Result<Object> {
        trace!(type_name = value.type_name(), "value to object");
        self.decoder().decode(value, 0)
    }

    /// Convert a wire value, reading a top-level list as interleaved
    /// key/value pairs
    ///
    /// Used for operation results whose wire shape is ambiguous between a
    /// list and an ordered map. Nested values are converted normally.
    pub fn to_object_flattened(&self, value: &Value<'_>) -> Result<Object> {
        trace!(type_name = value.type_name(), "value to object, flattened");
        self.decoder().decode_flattened(value, 0)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .field("has_geo", &self.driver.has_geo())
            .field("serializers", &self.serializers)
            .finish()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvmarshal_core::{BytesType, ErrorKind, INFINITY, WILDCARD};

    #[test]
    fn test_default_converter() {
        let conv = Converter::default();
        assert!(!conv.is_strict());
        assert_eq!(conv.serializer_policy(), SerializerPolicy::Native);
        assert_eq!(conv.limits().max_nesting_depth, 128);
    }

    #[test]
    fn test_markers_encode_to_shared_statics() {
        let conv = Converter::default();
        assert_eq!(conv.to_value(&Object::Wildcard).unwrap(), WILDCARD);
        assert_eq!(conv.to_value(&Object::Infinity).unwrap(), INFINITY);
    }

    #[test]
    fn test_markers_are_not_readable() {
        let conv = Converter::default();
        let err = conv.to_object(&Value::Wildcard).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientError);
        assert_eq!(err.message(), "Unknown type for value");
    }

    #[test]
    fn test_policy_can_be_changed() {
        let mut conv = Converter::default();
        conv.set_serializer_policy(SerializerPolicy::None);
        let err = conv.to_value(&Object::Bool(true)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);

        conv.set_serializer_policy(SerializerPolicy::Native);
        let value = conv.to_value(&Object::Bool(true)).unwrap();
        assert_eq!(value.as_bytes().map(|(ty, _)| ty), Some(BytesType::Native));
    }

    #[test]
    fn test_nesting_limit_from_config() {
        let conv = Converter::new(ConverterConfig {
            max_nesting_depth: 2,
            ..ConverterConfig::default()
        });
        let ok = Object::List(vec![Object::List(vec![Object::from(1i64)])]);
        assert!(conv.to_value(&ok).is_ok());

        let deep = Object::List(vec![ok]);
        let err = conv.to_value(&deep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientError);
    }

    #[test]
    fn test_read_nesting_limit() {
        let conv = Converter::new(ConverterConfig {
            max_nesting_depth: 2,
            ..ConverterConfig::default()
        });
        let ok = Value::List(vec![Value::List(vec![Value::Integer(1)])]);
        assert!(conv.to_object(&ok).is_ok());

        let deep = Value::List(vec![ok.clone()]);
        let err = conv.to_object(&deep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientError);

        let deep_map = Value::Map(vec![(Value::from("k"), deep.clone())]);
        assert_eq!(conv.to_object(&deep_map).unwrap_err().kind(), ErrorKind::ClientError);
    }

    #[test]
    fn test_flattened_read_nesting_limit() {
        let conv = Converter::new(ConverterConfig {
            max_nesting_depth: 2,
            ..ConverterConfig::default()
        });
        let ok = Value::List(vec![Value::from("k"), Value::List(vec![Value::Integer(1)])]);
        assert!(conv.to_object_flattened(&ok).is_ok());

        let deep = Value::List(vec![
            Value::from("k"),
            Value::List(vec![Value::List(vec![Value::Integer(1)])]),
        ]);
        let err = conv.to_object_flattened(&deep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientError);
    }
}

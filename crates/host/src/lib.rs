//! Host side of the kvmarshal conversion layer
//!
//! - Object: the host's dynamically typed object graph and its ObjectClass
//! - Serializer: fallback serialization for objects with no wire form
//! - GeoCodec: GeoJSON text for geospatial objects

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geo;
pub mod object;
pub mod serializer;

pub use geo::{GeoCodec, GeoError, JsonGeoCodec};
pub use object::{Instance, Object, ObjectClass};
pub use serializer::{NativeSerializer, Serializer, SerializerError, SerializerPolicy, Serializers};

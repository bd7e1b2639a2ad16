//! Geospatial codec boundary
//!
//! A geospatial object wraps its `geo_data`, a host mapping in GeoJSON shape.
//! The codec turns that mapping into GeoJSON text for the wire and parses it
//! back on read.

use crate::object::Object;
use thiserror::Error;

/// Geo codec errors
#[derive(Debug, Error)]
pub enum GeoError {
    /// `geo_data` holds an object with no JSON form
    #[error("Unsupported geo_data member of type {0}")]
    Unsupported(String),

    /// GeoJSON text failed to parse
    #[error("Invalid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// GeoJSON encoder and decoder
pub trait GeoCodec: Send + Sync {
    /// Encode `geo_data` as GeoJSON text
    fn dumps(&self, geo_data: &Object) -> Result<String, GeoError>;

    /// Parse GeoJSON text into `geo_data`
    fn loads(&self, text: &str) -> Result<Object, GeoError>;
}

/// GeoJSON codec backed by serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGeoCodec;

impl GeoCodec for JsonGeoCodec {
    fn dumps(&self, geo_data: &Object) -> Result<String, GeoError> {
        let json = to_json(geo_data)?;
        Ok(serde_json::to_string(&json)?)
    }

    fn loads(&self, text: &str) -> Result<Object, GeoError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        from_json(json)
    }
}

fn to_json(obj: &Object) -> Result<serde_json::Value, GeoError> {
    use serde_json::Value as J;

    let unsupported = || GeoError::Unsupported(obj.type_name().to_string());
    Ok(match obj {
        Object::None | Object::Null => J::Null,
        Object::Bool(b) => J::Bool(*b),
        Object::Int(i) => {
            if let Ok(n) = i64::try_from(*i) {
                J::from(n)
            } else if let Ok(n) = u64::try_from(*i) {
                J::from(n)
            } else {
                return Err(unsupported());
            }
        }
        Object::Float(f) => serde_json::Number::from_f64(*f)
            .map(J::Number)
            .ok_or_else(unsupported)?,
        Object::Str(_) | Object::WideStr(_) => match obj.as_text() {
            Some(Ok(s)) => J::String(s.into_owned()),
            _ => return Err(unsupported()),
        },
        Object::List(items) | Object::Tuple(items) => {
            J::Array(items.iter().map(to_json).collect::<Result<_, _>>()?)
        }
        Object::Map(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                let key = match k.as_text() {
                    Some(Ok(s)) => s.into_owned(),
                    _ => return Err(GeoError::Unsupported(k.type_name().to_string())),
                };
                map.insert(key, to_json(v)?);
            }
            J::Object(map)
        }
        _ => return Err(unsupported()),
    })
}

/// Object members keep their textual order (serde_json `preserve_order`)
fn from_json(json: serde_json::Value) -> Result<Object, GeoError> {
    use serde_json::Value as J;

    Ok(match json {
        J::Null => Object::None,
        J::Bool(b) => Object::Bool(b),
        J::Number(n) => {
            if let Some(i) = n.as_i64() {
                Object::Int(i as i128)
            } else if let Some(u) = n.as_u64() {
                Object::Int(u as i128)
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| GeoError::Unsupported(format!("number {}", n)))?;
                Object::Float(f)
            }
        }
        J::String(s) => Object::Str(s),
        J::Array(items) => Object::List(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<_, _>>()?,
        ),
        J::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                entries.push((Object::Str(k), from_json(v)?));
            }
            Object::Map(entries)
        }
    })
}

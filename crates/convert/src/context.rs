//! Context path codec
//!
//! A context path is a host list of steps. Each step exposes an `id` (the
//! wire kind) and a `value` (the payload), either as instance attributes or
//! as mapping entries.
//!
//! ## Contract
//!
//! - index and rank kinds take a signed 64-bit integer payload
//! - key and value kinds take any payload the value dispatcher accepts
//! - the first bad step fails the whole path; no partial path is returned

use crate::converter::Converter;
use crate::dispatch::Encoder;
use kvmarshal_core::{ContextPath, ConversionError, CtxKind, CtxStep, Result};
use kvmarshal_host::Object;
use tracing::trace;

const CTX_KEY: &str = "ctx";

fn convert_failed() -> ConversionError {
    ConversionError::invalid_param(format!("Failed to convert {}", CTX_KEY))
}

fn step_from_object<'o>(enc: &mut Encoder<'_>, step: &'o Object) -> Result<CtxStep<'o>> {
    let id = step.field("id").ok_or_else(convert_failed)?;
    let payload = step.field("value").ok_or_else(convert_failed)?;

    let id = id.as_int().ok_or_else(convert_failed)?;
    let unknown = || {
        ConversionError::invalid_param(format!(
            "Failed to convert, unknown ctx operation {}",
            id
        ))
    };
    let kind = i64::try_from(id)
        .ok()
        .and_then(CtxKind::from_id)
        .ok_or_else(unknown)?;

    if kind.requires_integer() {
        let n = payload
            .as_int()
            .and_then(|n| i64::try_from(n).ok())
            .ok_or_else(convert_failed)?;
        CtxStep::from_integer(kind, n).ok_or_else(unknown)
    } else {
        let value = enc
            .encode(payload, 0)
            .map_err(|e| {
                ConversionError::invalid_param(format!("Failed to convert {}: {}", CTX_KEY, e.message()))
            })?;
        CtxStep::from_value(kind, value).ok_or_else(unknown)
    }
}

fn steps_to_context<'o>(enc: &mut Encoder<'_>, steps: &'o Object) -> Result<ContextPath<'o>> {
    let items = match steps {
        Object::List(items) => items,
        _ => return Err(convert_failed()),
    };
    let mut path = ContextPath::with_capacity(items.len());
    for item in items {
        path.push(step_from_object(enc, item)?);
    }
    Ok(path)
}

impl Converter {
    /// Build a context path from a host list of steps
    pub fn to_context<'o>(&self, steps: &'o Object) -> Result<ContextPath<'o>> {
        trace!(type_name = steps.type_name(), "object to context");
        steps_to_context(&mut self.encoder(), steps)
    }

    /// Read the `ctx` entry of an operation mapping
    ///
    /// `None` when the operation has no `ctx` entry.
    pub fn context_from_operation<'o>(&self, op: &'o Object) -> Result<Option<ContextPath<'o>>> {
        match op.get(CTX_KEY) {
            None => Ok(None),
            Some(steps) => self.to_context(steps).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConverterConfig;
    use kvmarshal_core::{ErrorKind, Value};
    use kvmarshal_host::{Instance, SerializerPolicy};

    fn step(id: CtxKind, value: impl Into<Object>) -> Object {
        Object::from(
            Instance::new("cdt_ctx._cdt_ctx")
                .with_attr("id", Object::Int(id.id() as i128))
                .with_attr("value", value),
        )
    }

    #[test]
    fn test_integer_and_value_steps() {
        let conv = Converter::default();
        let steps = Object::List(vec![
            step(CtxKind::ListIndex, 0i64),
            step(CtxKind::MapKey, "inner"),
            step(CtxKind::MapRank, -1i64),
        ]);
        let path = conv.to_context(&steps).unwrap();
        assert_eq!(
            path,
            ContextPath::new()
                .list_index(0)
                .map_key(Value::from("inner"))
                .map_rank(-1)
        );
    }

    #[test]
    fn test_mapping_steps_accepted() {
        let conv = Converter::default();
        let steps = Object::List(vec![Object::map([
            ("id", Object::Int(CtxKind::ListValue.id() as i128)),
            ("value", Object::List(vec![Object::from(1i64)])),
        ])]);
        let path = conv.to_context(&steps).unwrap();
        assert_eq!(
            path.steps(),
            &[CtxStep::ListValue(Value::List(vec![Value::Integer(1)]))]
        );
    }

    #[test]
    fn test_index_kinds_require_integer() {
        let conv = Converter::default();
        for kind in [CtxKind::ListIndex, CtxKind::ListRank, CtxKind::MapIndex, CtxKind::MapRank] {
            let steps = Object::List(vec![step(kind, "zero")]);
            let err = conv.to_context(&steps).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParam);
            assert_eq!(err.message(), "Failed to convert ctx");
        }
    }

    #[test]
    fn test_value_kinds_accept_integers() {
        let conv = Converter::default();
        for kind in [CtxKind::ListValue, CtxKind::MapKey, CtxKind::MapValue] {
            let steps = Object::List(vec![step(kind, 7i64)]);
            let path = conv.to_context(&steps).unwrap();
            assert_eq!(path.steps()[0].as_value(), Some(&Value::Integer(7)));
        }
    }

    #[test]
    fn test_unknown_kind() {
        let conv = Converter::default();
        let steps = Object::List(vec![Object::map([
            ("id", Object::from(0x55i64)),
            ("value", Object::from(1i64)),
        ])]);
        let err = conv.to_context(&steps).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
        assert_eq!(err.message(), "Failed to convert, unknown ctx operation 85");
    }

    #[test]
    fn test_missing_fields() {
        let conv = Converter::default();
        let no_value = Object::List(vec![Object::map([("id", Object::from(0x10i64))])]);
        assert_eq!(conv.to_context(&no_value).unwrap_err().message(), "Failed to convert ctx");

        let not_a_step = Object::List(vec![Object::from(3i64)]);
        assert_eq!(conv.to_context(&not_a_step).unwrap_err().message(), "Failed to convert ctx");
    }

    #[test]
    fn test_payload_failure_fails_path() {
        let conv = Converter::new(ConverterConfig {
            serializer: SerializerPolicy::None,
            ..ConverterConfig::default()
        });
        let steps = Object::List(vec![
            step(CtxKind::ListIndex, 1i64),
            step(CtxKind::MapKey, Object::Bool(true)),
        ]);
        let err = conv.to_context(&steps).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
        assert!(err.message().starts_with("Failed to convert ctx: "));
    }

    #[test]
    fn test_context_from_operation() {
        let conv = Converter::default();
        let bare = Object::map([("bin", Object::from("b"))]);
        assert!(conv.context_from_operation(&bare).unwrap().is_none());

        let with_ctx = Object::map([
            ("bin", Object::from("b")),
            ("ctx", Object::List(vec![step(CtxKind::MapIndex, 2i64)])),
        ]);
        let path = conv.context_from_operation(&with_ctx).unwrap().unwrap();
        assert_eq!(path, ContextPath::new().map_index(2));

        let bad = Object::map([("ctx", Object::from("nope"))]);
        let err = conv.context_from_operation(&bad).unwrap_err();
        assert_eq!(err.message(), "Failed to convert ctx");
    }
}

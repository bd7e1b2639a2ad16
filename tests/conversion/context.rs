//! Context path step typing

use crate::common::*;
use kvmarshal::{ContextPath, CtxKind, ErrorKind, Object, Value};

const INDEX_KINDS: [CtxKind; 4] = [
    CtxKind::ListIndex,
    CtxKind::ListRank,
    CtxKind::MapIndex,
    CtxKind::MapRank,
];

const VALUE_KINDS: [CtxKind; 3] = [CtxKind::ListValue, CtxKind::MapKey, CtxKind::MapValue];

#[test]
fn test_index_kinds_reject_non_integers() {
    let conv = converter();
    let payloads = [
        Object::from("1"),
        Object::Float(1.0),
        Object::None,
        Object::List(vec![1i64.into()]),
    ];
    for kind in INDEX_KINDS {
        for payload in payloads.clone() {
            let steps = Object::List(vec![ctx_step(kind, payload)]);
            let err = conv.to_context(&steps).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParam);
        }
    }
}

#[test]
fn test_index_kinds_reject_overflow() {
    let conv = converter();
    let steps = Object::List(vec![ctx_step(CtxKind::ListIndex, Object::Int(1 << 64))]);
    assert_eq!(conv.to_context(&steps).unwrap_err().kind(), ErrorKind::InvalidParam);
}

#[test]
fn test_value_kinds_accept_any_convertible_payload() {
    let conv = converter();
    let payloads = [
        Object::from(3i64),
        Object::from("k"),
        Object::map([("nested", Object::List(vec![1i64.into()]))]),
        Object::Wildcard,
    ];
    for kind in VALUE_KINDS {
        for payload in payloads.clone() {
            let steps = Object::List(vec![ctx_step(kind, payload)]);
            let path = conv.to_context(&steps).unwrap();
            assert_eq!(path.len(), 1);
            assert_eq!(path.steps()[0].kind(), kind);
        }
    }
}

#[test]
fn test_multi_step_path_in_order() {
    let conv = converter();
    let steps = Object::List(vec![
        ctx_step(CtxKind::MapKey, "users"),
        ctx_step(CtxKind::ListRank, -1i64),
        ctx_step(CtxKind::MapValue, 10i64),
    ]);
    assert_eq!(
        conv.to_context(&steps).unwrap(),
        ContextPath::new()
            .map_key(Value::from("users"))
            .list_rank(-1)
            .map_value(Value::Integer(10))
    );
}

#[test]
fn test_operation_without_ctx() {
    let conv = converter();
    let op = Object::map([("op", Object::from(1i64)), ("bin", Object::from("b"))]);
    assert_eq!(conv.context_from_operation(&op).unwrap(), None);
}

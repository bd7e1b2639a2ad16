//! Key parsing: what is accepted and what is rejected

use crate::common::*;
use kvmarshal::{ErrorKind, Object, UserKey};

#[test]
fn test_exactly_one_locator_required() {
    let conv = converter();
    assert!(conv.to_key(&key_tuple("test", "demo", "k")).is_ok());
    assert!(conv.to_key(&digest_tuple("test", "demo", vec![7; 20])).is_ok());

    let neither = Object::Tuple(vec!["test".into(), "demo".into(), Object::None]);
    let err = conv.to_key(&neither).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParam);
}

#[test]
fn test_wrong_digest_length_reports_size() {
    let conv = converter();
    for len in [0usize, 1, 19, 21, 64] {
        let err = conv.to_key(&digest_tuple("test", "demo", vec![1; len])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
        assert!(
            err.message().contains(&format!("received {}", len)),
            "message was {:?}",
            err.message()
        );
    }
}

#[test]
fn test_namespace_must_be_non_empty_text() {
    let conv = converter();
    assert!(conv.to_key(&key_tuple("", "demo", "k")).is_err());

    let numeric_ns = Object::Tuple(vec![1i64.into(), "demo".into(), "k".into()]);
    assert_eq!(
        conv.to_key(&numeric_ns).unwrap_err().message(),
        "namespace must be a string"
    );

    let wide_ns = Object::Tuple(vec![Object::wide("test"), "demo".into(), "k".into()]);
    assert_eq!(conv.to_key(&wide_ns).unwrap().namespace(), "test");
}

#[test]
fn test_named_key_shape() {
    let conv = converter();
    let obj = Object::map([
        ("ns", Object::from("test")),
        ("set", Object::from("demo")),
        ("digest", Object::Bytes(vec![3; 20])),
    ]);
    let key = conv.to_key(&obj).unwrap();
    assert_eq!(key.digest().map(|d| d.as_bytes()[0]), Some(3));
}

#[test]
fn test_user_key_kinds() {
    let conv = converter();
    let text = key_tuple("test", "demo", "k");
    let int = key_tuple("test", "demo", -5i64);
    let raw = key_tuple("test", "demo", Object::Bytes(vec![9]));
    assert_eq!(conv.to_key(&text).unwrap().user_key(), Some(&UserKey::from("k")));
    assert_eq!(conv.to_key(&int).unwrap().user_key(), Some(&UserKey::Integer(-5)));
    assert_eq!(
        conv.key_to_object(&conv.to_key(&raw).unwrap()),
        Object::Tuple(vec![
            "test".into(),
            "demo".into(),
            Object::ByteArray(vec![9]),
            Object::None,
        ])
    );
}

#[test]
fn test_non_key_shapes_rejected() {
    let conv = converter();
    for obj in [Object::from("test"), Object::List(vec!["test".into()]), Object::None] {
        let err = conv.to_key(&obj).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
        assert_eq!(err.message(), "key is invalid");
    }
}

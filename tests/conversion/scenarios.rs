//! Reference scenarios

use crate::common::*;
use kvmarshal::{BatchRead, BinShape, Object, Record, Value, DIGEST_SIZE};

#[test]
fn test_plain_record() {
    let conv = converter();
    let bins = Object::map([("a", Object::from(1i64)), ("b", Object::from("x"))]);
    let meta = meta(100, 2);

    let record = conv.to_record(&bins, Some(&meta)).unwrap();
    assert_eq!(record.len(), 2);
    assert_eq!((record.ttl, record.gen), (100, 2));

    let obj = conv.record_to_object(&record, None, BinShape::Canonical).unwrap();
    assert_eq!(obj, Object::Tuple(vec![Object::None, meta, bins]));
}

#[test]
fn test_batch_miss() {
    let conv = converter();
    let k1_obj = key_tuple("test", "demo", 1i64);
    let k2_obj = key_tuple("test", "demo", 2i64);
    let k1 = conv.to_key(&k1_obj).unwrap();
    let k2 = conv.to_key(&k2_obj).unwrap();

    let mut record = Record::new().with_meta(1, 50);
    record.set("a", Value::Integer(10));
    let reads = vec![BatchRead::found(k1, record), BatchRead::not_found(k2)];

    let obj = conv.batch_to_object(&reads).unwrap();
    let Object::List(entries) = obj else {
        panic!("Expected list");
    };
    assert_eq!(entries.len(), 2);

    let (key, meta_obj, bins) = unpack_record(entries[0].clone());
    assert_eq!(
        key,
        Object::Tuple(vec!["test".into(), "demo".into(), 1i64.into(), Object::None])
    );
    assert_eq!(meta_obj, meta(50, 1));
    assert_eq!(bins, Object::map([("a", Object::from(10i64))]));

    let (key, meta_obj, bins) = unpack_record(entries[1].clone());
    assert_eq!(
        key,
        Object::Tuple(vec!["test".into(), "demo".into(), 2i64.into(), Object::None])
    );
    assert_eq!(meta_obj, Object::None);
    assert_eq!(bins, Object::None);
}

#[test]
fn test_digest_only_key() {
    let conv = converter();
    let digest = (0..DIGEST_SIZE as u8).collect::<Vec<_>>();
    let obj = digest_tuple("test", "demo", digest.clone());

    let key = conv.to_key(&obj).unwrap();
    assert!(key.user_key().is_none());

    assert_eq!(
        conv.key_to_object(&key),
        Object::Tuple(vec![
            "test".into(),
            "demo".into(),
            Object::None,
            Object::ByteArray(digest),
        ])
    );
}

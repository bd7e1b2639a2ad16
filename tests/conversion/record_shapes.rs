//! Record externalization shapes and write-path rules

use crate::common::*;
use kvmarshal::{BinShape, ErrorKind, Object, Record, Value};

fn operate_result() -> Record<'static> {
    let mut record = Record::new();
    record.push("b", Value::Integer(5));
    record.push("b", Value::Integer(6));
    record.push(
        "c",
        Value::List(vec![Value::Integer(3), Value::Integer(4), Value::Integer(5)]),
    );
    record
}

#[test]
fn test_operate_ordered_preserves_duplicates() {
    let conv = converter();
    let bins = conv
        .bins_to_object(&operate_result(), BinShape::OperateOrdered)
        .unwrap();
    assert_eq!(
        bins,
        Object::List(vec![
            Object::Tuple(vec!["b".into(), 5i64.into()]),
            Object::Tuple(vec!["b".into(), 6i64.into()]),
            Object::Tuple(vec![
                "c".into(),
                Object::List(vec![3i64.into(), 4i64.into(), 5i64.into()]),
            ]),
        ])
    );
}

#[test]
fn test_canonical_collapses_duplicates() {
    let conv = converter();
    let bins = conv.bins_to_object(&operate_result(), BinShape::Canonical).unwrap();
    match bins {
        Object::Map(entries) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0], (Object::from("b"), Object::from(6i64)));
        }
        other => panic!("Expected map, got {:?}", other),
    }
}

#[test]
fn test_flattened_odd_list_fails() {
    let conv = converter();
    let err = conv
        .bins_to_object(&operate_result(), BinShape::Flattened)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClientError);
}

#[test]
fn test_meta_always_present() {
    let conv = converter();
    let (_, meta_obj, bins) = unpack_record(
        conv.record_to_object(&Record::new(), None, BinShape::Canonical)
            .unwrap(),
    );
    assert_eq!(meta_obj, meta(0, 0));
    assert_eq!(bins, Object::Map(vec![]));
}

#[test]
fn test_ttl_markers() {
    let conv = converter();
    let bins = Object::map([("a", Object::from(1i64))]);
    let never = conv.to_record(&bins, Some(&meta(-1, 0))).unwrap();
    let keep = conv.to_record(&bins, Some(&meta(-2, 0))).unwrap();
    assert_eq!(never.ttl, u32::MAX);
    assert_eq!(keep.ttl, u32::MAX - 1);

    let err = conv
        .to_record(&bins, Some(&meta(i64::from(u32::MAX) + 1, 0)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParam);
}

#[test]
fn test_strict_bin_name_limit() {
    let bins = Object::map([("fourteen_chars", Object::from(1i64))]);
    assert!(strict_converter().to_record(&bins, None).is_ok());

    let long = Object::map([("fifteen_chars__", Object::from(1i64))]);
    let err = strict_converter().to_record(&long, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BinNameTooLong);
    assert!(converter().to_record(&long, None).is_ok());
}

#[test]
fn test_record_with_nested_values_round_trips() {
    let conv = converter();
    let bins = Object::map([
        ("list", Object::List(vec![1i64.into(), "two".into(), Object::Float(3.5)])),
        ("map", Object::map([("k", Object::Bytes(vec![0, 1]))])),
        ("geo", Object::Geospatial(Box::new(Object::map([
            ("type", Object::from("Point")),
            ("coordinates", Object::List(vec![Object::Float(0.5), Object::Float(1.5)])),
        ])))),
    ]);
    let record = conv.to_record(&bins, None).unwrap();
    assert_eq!(conv.bins_to_object(&record, BinShape::Canonical).unwrap(), bins);
}

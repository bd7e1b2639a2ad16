//! Round-trip and flatten-parity properties

use crate::common::*;
use kvmarshal::{BinShape, Object, Value};
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Object> {
    prop_oneof![
        Just(Object::None),
        any::<i64>().prop_map(Object::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Object::Float),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Object::Str),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Object::Bytes),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Object::ByteArray),
    ]
}

fn arb_object() -> impl Strategy<Value = Object> {
    arb_leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Object::List),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|m| {
                Object::Map(m.into_iter().map(|(k, v)| (Object::Str(k), v)).collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn test_value_round_trip(obj in arb_object()) {
        let conv = converter();
        let value = conv.to_value(&obj).unwrap();
        prop_assert_eq!(conv.to_object(&value).unwrap(), obj.clone());

        // detaching from host memory changes nothing observable
        let owned = value.into_owned();
        prop_assert_eq!(conv.to_object(&owned).unwrap(), obj);
    }

    #[test]
    fn test_record_round_trip(
        bins in prop::collection::btree_map("[a-z]{1,14}", arb_object(), 0..6),
        ttl in 0u32..=u32::MAX,
        gen in any::<u16>(),
    ) {
        let conv = strict_converter();
        let bins = Object::Map(bins.into_iter().map(|(k, v)| (Object::Str(k), v)).collect());
        let meta = meta(i64::from(ttl), i64::from(gen));

        let record = conv.to_record(&bins, Some(&meta)).unwrap();
        let (key, meta_back, bins_back) =
            unpack_record(conv.record_to_object(&record, None, BinShape::Canonical).unwrap());
        prop_assert_eq!(key, Object::None);
        prop_assert_eq!(meta_back, meta);
        prop_assert_eq!(bins_back, bins);
    }

    #[test]
    fn test_flatten_even_lists_pair_up(
        pairs in prop::collection::vec((arb_leaf(), arb_leaf()), 0..8),
    ) {
        let conv = converter();
        let flat: Vec<Object> = pairs
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect();
        let flat = Object::List(flat);
        let value = conv.to_value(&flat).unwrap();

        let expected = Object::List(
            pairs
                .into_iter()
                .map(|(k, v)| Object::Tuple(vec![k, v]))
                .collect(),
        );
        prop_assert_eq!(conv.to_object_flattened(&value).unwrap(), expected);
    }

    #[test]
    fn test_flatten_odd_lists_rejected(items in prop::collection::vec(any::<i64>(), 0..8)) {
        let conv = converter();
        let mut items: Vec<Value> = items.into_iter().map(Value::Integer).collect();
        if items.len() % 2 == 0 {
            items.push(Value::Nil);
        }
        prop_assert!(conv.to_object_flattened(&Value::List(items)).is_err());
    }
}

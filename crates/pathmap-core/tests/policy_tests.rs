use pathmap_core::read::read_into;
use pathmap_core::{MapperConfig, PathMapper};
use pathmap_model::{field_descriptor, DefaultValueHandling, NullValueHandling, TypeDescriptor};
use pathmap_test_utils::stubs::{ArityStub, RoundTripStub};
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq)]
struct Pair {
    projected: i32,
    plain: i32,
    label: Option<String>,
}

fn pair_descriptor(default: i32) -> TypeDescriptor<Pair> {
    TypeDescriptor::builder(Pair::default)
        .field(
            field_descriptor!(Pair, projected)
                .with_query("missing.projected")
                .unwrap()
                .with_default(json!(default)),
        )
        .field(field_descriptor!(Pair, plain).with_default(json!(default)))
        .field(field_descriptor!(Pair, label).with_query("label").unwrap())
        .build()
        .unwrap()
}

fn round_trip_stub() -> impl Strategy<Value = RoundTripStub> {
    (
        any::<i64>(),
        proptest::collection::vec("[a-z]{0,8}", 0..5),
        proptest::option::of("[a-zA-Z ]{0,12}"),
        proptest::collection::btree_map("[a-z]{1,6}", any::<bool>(), 0..4),
    )
        .prop_map(|(score, tags, label, flags)| RoundTripStub {
            score,
            tags,
            label,
            flags,
        })
}

proptest! {
    #[test]
    fn prop_populate_agrees_for_projected_and_plain(default in any::<i32>(), start in any::<i32>()) {
        let descriptor = pair_descriptor(default);
        let config = MapperConfig::new().with_default_value_handling(DefaultValueHandling::Populate);

        let mut target = Pair { projected: start, plain: start, label: None };
        read_into(&json!({}), &mut target, &descriptor, &config).unwrap();

        prop_assert_eq!(target.projected, default);
        prop_assert_eq!(target.plain, default);
    }

    #[test]
    fn prop_absent_projection_zeroes_non_nullable(start in any::<i32>()) {
        let descriptor = pair_descriptor(7);
        let mut target = Pair { projected: start, plain: start, label: Some("kept".into()) };
        read_into(&json!({}), &mut target, &descriptor, &MapperConfig::new()).unwrap();

        // No Populate: the declared default is not used
        prop_assert_eq!(target.projected, 0);
        // Plain fields are only touched when their member is present
        prop_assert_eq!(target.plain, start);
        // Absent projection on a nullable field assigns null
        prop_assert_eq!(target.label, None);
    }

    #[test]
    fn prop_single_match_collapses(value in any::<i32>()) {
        let mapper = PathMapper::new();
        let wrapped: ArityStub = mapper.read(&json!({ "values": [value] })).unwrap();
        prop_assert_eq!(wrapped.single, value);
    }

    #[test]
    fn prop_multiple_matches_fail_for_scalar(values in proptest::collection::vec(any::<i32>(), 2..6)) {
        let mapper = PathMapper::new();
        let result = mapper.read::<ArityStub>(&json!({ "values": values }));
        prop_assert!(result.unwrap_err().is_conversion_error());
    }

    #[test]
    fn prop_write_read_round_trip(stub in round_trip_stub()) {
        let mapper = PathMapper::new();
        let written = mapper.write(Some(&stub)).unwrap();
        let read: RoundTripStub = mapper.read(&written).unwrap();
        prop_assert_eq!(read, stub);
    }

    #[test]
    fn prop_null_ignore_round_trip_keeps_existing(
        stub in round_trip_stub(),
        existing in "[a-z]{1,8}",
    ) {
        let mapper = PathMapper::with_config(
            MapperConfig::new().with_null_value_handling(NullValueHandling::Ignore),
        );
        let cleared = RoundTripStub { label: None, ..stub.clone() };
        let written = mapper.write(Some(&cleared)).unwrap();
        prop_assert!(written.get("label").is_none());

        let mut target = RoundTripStub { label: Some(existing.clone()), ..RoundTripStub::default() };
        mapper.populate(&written, &mut target).unwrap();

        prop_assert_eq!(target.label, Some(existing));
        prop_assert_eq!(target.score, stub.score);
        prop_assert_eq!(target.tags, stub.tags);
        prop_assert_eq!(target.flags, stub.flags);
    }
}

#[test]
fn test_null_include_emits_null() {
    let stub = RoundTripStub::default();
    let written = PathMapper::new().write(Some(&stub)).unwrap();
    assert_eq!(written["label"], serde_json::Value::Null);
}

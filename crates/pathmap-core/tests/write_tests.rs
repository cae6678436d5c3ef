use pathmap_core::{MapperConfig, MapperError, NamingPolicy, PathMapper};
use pathmap_model::{DefaultValueHandling, NullValueHandling};
use pathmap_test_utils::stubs::*;
use pathmap_test_utils::{camel_case_mapper, init_tracing};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_simple_stub() {
    init_tracing();
    let obj = SimpleStub {
        value: 9,
        main_value: 8,
        nested_value: 7,
        nested_stub: None,
        normal_value: 6,
    };
    let result = camel_case_mapper().write_string(Some(&obj)).unwrap();
    assert_eq!(
        result,
        r#"{"value":9,"mainValue":8,"nestedValue":7,"nestedStub":null,"normalValue":6}"#
    );
}

#[test]
fn test_nested_stub_uses_active_config() {
    let obj = SimpleStub {
        value: 1,
        nested_stub: Some(Box::new(SimpleStub {
            normal_value: 6,
            ..SimpleStub::default()
        })),
        ..SimpleStub::default()
    };
    let result = camel_case_mapper().write_value(Some(&obj)).unwrap();
    assert_eq!(
        result["nestedStub"],
        json!({
            "value": 0,
            "mainValue": 0,
            "nestedValue": 0,
            "nestedStub": null,
            "normalValue": 6
        })
    );
}

#[test]
fn test_custom_converter() {
    let obj = CustomConverterStub {
        path_property: "test".into(),
        normal_property: "value ignored".into(),
    };
    let result = camel_case_mapper().write_string(Some(&obj)).unwrap();
    assert_eq!(
        result,
        r#"{"pathProperty":"custom-test","normalProperty":"custom"}"#
    );
}

#[test]
fn test_custom_item_converter() {
    let names = vec!["a".to_string(), "b".to_string()];
    let obj = CustomItemConverterStub {
        names_array: ["a".into(), "b".into()],
        names_deque: names.iter().cloned().collect(),
        names_list: names.clone(),
        names_dynamic: vec![json!("a"), json!("b")],
        names_boxed: names.into_boxed_slice(),
    };
    let result = camel_case_mapper().write_string(Some(&obj)).unwrap();
    assert_eq!(
        result,
        concat!(
            r#"{"namesArray":["item","item"],"namesDeque":["item","item"],"#,
            r#""namesList":["item","item"],"namesDynamic":["item","item"],"#,
            r#""namesBoxed":["item","item"]}"#
        )
    );
}

#[test]
fn test_null_instance() {
    let mapper = PathMapper::new();
    assert_eq!(mapper.write_string::<SimpleStub>(None).unwrap(), "null");
}

#[test]
fn test_null_nested_property() {
    let obj = PassThroughStub { sub: None };
    assert_eq!(
        PathMapper::new().write_string(Some(&obj)).unwrap(),
        r#"{"sub":null}"#
    );
}

#[test]
fn test_non_object_descriptor() {
    let err = PathMapper::new()
        .write(Some(&NonObjectStub { value: 1 }))
        .unwrap_err();
    assert!(matches!(err, MapperError::Json(_)));
    assert!(err.to_string().contains("not object-shaped"));
}

#[test]
fn test_null_value_handling_ignore_omits() {
    let mapper = PathMapper::with_config(
        MapperConfig::new()
            .with_naming(NamingPolicy::CamelCase)
            .with_null_value_handling(NullValueHandling::Ignore),
    );
    let result = mapper.write_value(Some(&SimpleStub::default())).unwrap();
    assert_eq!(
        result,
        json!({ "value": 0, "mainValue": 0, "nestedValue": 0, "normalValue": 0 })
    );
}

#[test]
fn test_null_value_handling_per_field() {
    let result = camel_case_mapper()
        .write_value(Some(&NullValueHandlingStub::default()))
        .unwrap();
    assert_eq!(
        result,
        json!({
            "valueIncluded": null,
            "normalValueIncluded": null,
            "value": null,
            "normalValue": null
        })
    );
}

#[test]
fn test_default_value_handling_ignore_omits_defaults() {
    let mapper = PathMapper::with_config(
        MapperConfig::new().with_default_value_handling(DefaultValueHandling::Ignore),
    );
    let obj = DefaultValueHandlingStub {
        value: None,
        normal_value: Some(2),
        value_without_populate_setting: 3,
        normal_value_without_populate_setting: 10,
        non_nullable_value: 0,
        non_nullable_value_without_default: 0,
    };
    let result = mapper.write_value(Some(&obj)).unwrap();
    // Fields with a per-field Populate override keep including defaults
    assert_eq!(
        result,
        json!({
            "value": null,
            "normal_value": 2,
            "normal_value_without_populate_setting": 10,
            "non_nullable_value": 0,
            "non_nullable_value_without_default": 0
        })
    );
}

#[test]
fn test_access_flags_on_write() {
    let obj = AccessStub {
        visible: 1,
        secret: "s".into(),
        computed: 5,
        hidden: 7,
        hidden_projected: 9,
        positive_only: 0,
    };
    let result = PathMapper::new().write_value(Some(&obj)).unwrap();
    assert_eq!(
        result,
        json!({ "visible": 1, "computed": 5, "hidden_projected": 9 })
    );

    let shown = AccessStub {
        positive_only: 2,
        ..obj
    };
    let result = PathMapper::new().write_value(Some(&shown)).unwrap();
    assert_eq!(result["positive_only"], json!(2));
}

#[test]
fn test_generic_serde_routes_through_mapper() {
    let obj = SimpleStub {
        value: 9,
        ..SimpleStub::default()
    };
    let result = serde_json::to_value(&obj).unwrap();
    assert_eq!(
        result,
        json!({
            "value": 9,
            "main_value": 0,
            "nested_value": 0,
            "nested_stub": null,
            "normal_value": 0
        })
    );
}

#[test]
fn test_serializer_streams() {
    let obj = SamePathMoreThanOnceStub {
        team_name1: "a".into(),
        team_name2: "b".into(),
    };
    let mapper = PathMapper::new();
    let mut out = Vec::new();
    serde_json::to_writer(&mut out, &mapper.serializer(Some(&obj)).unwrap()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        r#"{"team_name1":"a","team_name2":"b"}"#
    );
}

#[test]
fn test_plain_type_bypasses_pipeline() {
    let obj = PlainStub { value: 3 };
    assert_eq!(
        PathMapper::new().write_value(Some(&obj)).unwrap(),
        json!({ "serdeName": 3 })
    );
}

//! Fixture types with their descriptors

use crate::converters::{AppendConverter, CombineConverter, FailingConverter, OnlyConverter};
use pathmap_core::impl_path_mapped_serde;
use pathmap_model::{
    field_descriptor, DefaultValueHandling, DescriptorError, NullValueHandling, PathMapped,
    TypeDescriptor, TypeShape,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleStub {
    pub value: i32,
    pub main_value: i32,
    pub nested_value: i32,
    pub nested_stub: Option<Box<SimpleStub>>,
    pub normal_value: i32,
}

impl SimpleStub {
    pub const JSON: &'static str = r#"{
        "value": 1,
        "main": { "value": 2, "nested": { "value": 3, "normalValue": 4 } },
        "normalValue": 5
    }"#;
}

impl PathMapped for SimpleStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(SimpleStub::default)
            .field(field_descriptor!(SimpleStub, value).with_query("value")?)
            .field(field_descriptor!(SimpleStub, main_value).with_query("main.value")?)
            .field(field_descriptor!(SimpleStub, nested_value).with_query("main.nested.value")?)
            .field(field_descriptor!(SimpleStub, nested_stub).with_query("main.nested")?)
            .field(field_descriptor!(SimpleStub, normal_value))
            .build()
    }
}

impl_path_mapped_serde!(SimpleStub);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTypesStub {
    pub objects: Vec<Value>,
    pub values_array: [i32; 3],
    pub values_deque: VecDeque<i32>,
    pub values_list: Vec<i32>,
    pub array_of_arrays: Vec<Vec<i32>>,
}

impl ListTypesStub {
    pub const JSON: &'static str = r#"{
        "objects": [ {}, {}, { "points": 123 } ],
        "values": [ 9, 8, 7 ],
        "arrays": [ { "array": [ 1, 2, 3 ] }, { "array": [ 4 ] } ]
    }"#;
}

impl PathMapped for ListTypesStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(ListTypesStub::default)
            .field(field_descriptor!(ListTypesStub, objects).with_query("objects")?)
            .field(field_descriptor!(ListTypesStub, values_array).with_query("values[*]")?)
            .field(field_descriptor!(ListTypesStub, values_deque).with_query("values[*]")?)
            .field(field_descriptor!(ListTypesStub, values_list).with_query("values")?)
            .field(field_descriptor!(ListTypesStub, array_of_arrays).with_query("arrays[*].array")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySingleSelectionStub {
    pub value1: i32,
    pub value2: i32,
    pub value3: i32,
    pub value_missing: Option<i32>,
}

impl ArraySingleSelectionStub {
    pub const JSON: &'static str =
        r#"{ "list": [ { "value": 1 }, { "value": 2 }, { "value": 3 } ] }"#;
}

impl PathMapped for ArraySingleSelectionStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(ArraySingleSelectionStub::default)
            .field(field_descriptor!(ArraySingleSelectionStub, value1).with_query("list[0].value")?)
            .field(field_descriptor!(ArraySingleSelectionStub, value2).with_query("list[1].value")?)
            .field(field_descriptor!(ArraySingleSelectionStub, value3).with_query("list[2].value")?)
            .field(
                field_descriptor!(ArraySingleSelectionStub, value_missing)
                    .with_query("list[99].value")?,
            )
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryStub {
    pub data: BTreeMap<String, String>,
}

impl DictionaryStub {
    pub const JSON: &'static str =
        r#"{ "book": { "data": { "title": "title", "author": "author" } } }"#;
}

impl PathMapped for DictionaryStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(DictionaryStub::default)
            .field(field_descriptor!(DictionaryStub, data).with_query("book.data")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointsStub {
    pub points: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptExpressionStub {
    pub filtered: Vec<PointsStub>,
    pub high_values: Vec<i32>,
}

impl ScriptExpressionStub {
    pub const JSON: &'static str = r#"{
        "values": [ { "points": 5 }, { "points": 11 }, { "points": 16 } ],
        "scores": [ 5, 11, 16 ]
    }"#;
}

impl PathMapped for ScriptExpressionStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(ScriptExpressionStub::default)
            .field(
                field_descriptor!(ScriptExpressionStub, filtered)
                    .with_query("values[?(@.points > 10)]")?,
            )
            .field(field_descriptor!(ScriptExpressionStub, high_values).with_query("scores[?@ > 10]")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescendantMatchStub {
    pub names: Vec<String>,
}

impl DescendantMatchStub {
    pub const JSON: &'static str =
        r#"{ "player": { "name": "p1" }, "team": { "name": "t1" }, "name": "root" }"#;
}

impl PathMapped for DescendantMatchStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(DescendantMatchStub::default)
            .field(field_descriptor!(DescendantMatchStub, names).with_query("..name")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamePathMoreThanOnceStub {
    pub team_name1: String,
    pub team_name2: String,
}

impl SamePathMoreThanOnceStub {
    pub const JSON: &'static str = r#"{ "player": { "team": "team1" } }"#;
}

impl PathMapped for SamePathMoreThanOnceStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(SamePathMoreThanOnceStub::default)
            .field(field_descriptor!(SamePathMoreThanOnceStub, team_name1).with_query("player.team")?)
            .field(field_descriptor!(SamePathMoreThanOnceStub, team_name2).with_query("player.team")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomConverterStub {
    pub path_property: String,
    pub normal_property: String,
}

impl CustomConverterStub {
    pub const JSON: &'static str = r#"{ "player": { "id": 1 }, "normalProperty": 2 }"#;
}

impl PathMapped for CustomConverterStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(CustomConverterStub::default)
            .field(
                field_descriptor!(CustomConverterStub, path_property)
                    .with_query("player.id")?
                    .with_converter(CombineConverter::default()),
            )
            .field(
                field_descriptor!(CustomConverterStub, normal_property)
                    .with_converter(OnlyConverter::new("custom")),
            )
            .build()
    }
}

impl_path_mapped_serde!(CustomConverterStub);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomItemConverterStub {
    pub names_array: [String; 2],
    pub names_deque: VecDeque<String>,
    pub names_list: Vec<String>,
    pub names_dynamic: Vec<Value>,
    pub names_boxed: Box<[String]>,
}

impl CustomItemConverterStub {
    pub const JSON: &'static str = r#"{ "books": [ { "author": null }, { "author": null } ] }"#;
}

impl PathMapped for CustomItemConverterStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        let item = || OnlyConverter::new("item");
        TypeDescriptor::builder(CustomItemConverterStub::default)
            .field(
                field_descriptor!(CustomItemConverterStub, names_array)
                    .with_query("..author")?
                    .with_item_converter(item()),
            )
            .field(
                field_descriptor!(CustomItemConverterStub, names_deque)
                    .with_query("..author")?
                    .with_item_converter(item()),
            )
            .field(
                field_descriptor!(CustomItemConverterStub, names_list)
                    .with_query("..author")?
                    .with_item_converter(item()),
            )
            .field(
                field_descriptor!(CustomItemConverterStub, names_dynamic)
                    .with_query("..author")?
                    .with_item_converter(item()),
            )
            .field(
                field_descriptor!(CustomItemConverterStub, names_boxed)
                    .with_query("..author")?
                    .with_item_converter(item()),
            )
            .build()
    }
}

impl_path_mapped_serde!(CustomItemConverterStub);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassThroughStub {
    pub sub: Option<PassThroughSubStub>,
}

impl PassThroughStub {
    pub const JSON: &'static str = r#"{ "product": { "value": 42 } }"#;
}

impl PathMapped for PassThroughStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(PassThroughStub::default)
            .field(field_descriptor!(PassThroughStub, sub).with_query("$")?)
            .build()
    }
}

impl_path_mapped_serde!(PassThroughStub);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassThroughSubStub {
    pub value: i32,
}

impl PathMapped for PassThroughSubStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(PassThroughSubStub::default)
            .field(field_descriptor!(PassThroughSubStub, value).with_query("product.value")?)
            .build()
    }
}

impl_path_mapped_serde!(PassThroughSubStub);

/// A type mapped as a bare scalar rather than an object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonObjectStub {
    pub value: i32,
}

impl PathMapped for NonObjectStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(NonObjectStub::default)
            .with_shape(TypeShape::Integer)
            .field(field_descriptor!(NonObjectStub, value).with_query("")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultValueHandlingStub {
    pub value: Option<i32>,
    pub normal_value: Option<i32>,
    pub value_without_populate_setting: i32,
    pub normal_value_without_populate_setting: i32,
    pub non_nullable_value: i32,
    pub non_nullable_value_without_default: i32,
}

impl PathMapped for DefaultValueHandlingStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        let populate = DefaultValueHandling::Populate;
        TypeDescriptor::builder(DefaultValueHandlingStub::default)
            .field(
                field_descriptor!(DefaultValueHandlingStub, value)
                    .with_query("value")?
                    .with_default(json!(1))
                    .with_default_value_handling(populate),
            )
            .field(
                field_descriptor!(DefaultValueHandlingStub, normal_value)
                    .with_default(json!(2))
                    .with_default_value_handling(populate),
            )
            .field(
                field_descriptor!(DefaultValueHandlingStub, value_without_populate_setting)
                    .with_query("value")?
                    .with_default(json!(3)),
            )
            .field(
                field_descriptor!(DefaultValueHandlingStub, normal_value_without_populate_setting)
                    .with_default(json!(4)),
            )
            .field(
                field_descriptor!(DefaultValueHandlingStub, non_nullable_value)
                    .with_query("value")?
                    .with_default(json!(5))
                    .with_default_value_handling(populate),
            )
            .field(
                field_descriptor!(DefaultValueHandlingStub, non_nullable_value_without_default)
                    .with_query("value")?
                    .with_default_value_handling(populate),
            )
            .build()
    }
}

impl_path_mapped_serde!(DefaultValueHandlingStub);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullValueHandlingStub {
    pub value_ignored: Option<i32>,
    pub normal_value_ignored: Option<i32>,
    pub value_included: Option<i32>,
    pub normal_value_included: Option<i32>,
    pub value: Option<i32>,
    pub normal_value: Option<i32>,
}

impl NullValueHandlingStub {
    pub const JSON: &'static str = r#"{
        "value": null,
        "normalValueIgnored": null,
        "normalValueIncluded": null,
        "normalValue": null
    }"#;
}

impl PathMapped for NullValueHandlingStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        let ignore = NullValueHandling::Ignore;
        let include = NullValueHandling::Include;
        TypeDescriptor::builder(NullValueHandlingStub::default)
            .field(
                field_descriptor!(NullValueHandlingStub, value_ignored)
                    .with_query("value")?
                    .with_null_value_handling(ignore),
            )
            .field(field_descriptor!(NullValueHandlingStub, normal_value_ignored).with_null_value_handling(ignore))
            .field(
                field_descriptor!(NullValueHandlingStub, value_included)
                    .with_query("value")?
                    .with_null_value_handling(include),
            )
            .field(field_descriptor!(NullValueHandlingStub, normal_value_included).with_null_value_handling(include))
            .field(field_descriptor!(NullValueHandlingStub, value).with_query("value")?)
            .field(field_descriptor!(NullValueHandlingStub, normal_value))
            .build()
    }
}

impl_path_mapped_serde!(NullValueHandlingStub);

/// Projected fields whose queries match their member names, so written
/// documents read back unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundTripStub {
    pub score: i64,
    pub tags: Vec<String>,
    pub label: Option<String>,
    pub flags: BTreeMap<String, bool>,
}

impl PathMapped for RoundTripStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(RoundTripStub::default)
            .field(field_descriptor!(RoundTripStub, score).with_query("score")?)
            .field(field_descriptor!(RoundTripStub, tags).with_query("tags")?)
            .field(field_descriptor!(RoundTripStub, label).with_query("label")?)
            .field(field_descriptor!(RoundTripStub, flags))
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessStub {
    pub visible: i32,
    pub secret: String,
    pub computed: i32,
    pub hidden: i32,
    pub hidden_projected: i32,
    pub positive_only: i32,
}

impl PathMapped for AccessStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(AccessStub::default)
            .field(field_descriptor!(AccessStub, visible).with_query("visible")?)
            .field(field_descriptor!(AccessStub, secret).with_readable(false))
            .field(field_descriptor!(AccessStub, computed).with_writable(false))
            .field(field_descriptor!(AccessStub, hidden).with_ignored(true))
            .field(
                field_descriptor!(AccessStub, hidden_projected)
                    .with_query("source.value")?
                    .with_ignored(true),
            )
            .field(
                field_descriptor!(AccessStub, positive_only)
                    .with_should_serialize(|s: &AccessStub| s.positive_only > 0),
            )
            .build()
    }
}

impl_path_mapped_serde!(AccessStub);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExistingValueStub {
    pub history: Vec<Value>,
}

impl PathMapped for ExistingValueStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(ExistingValueStub::default)
            .field(
                field_descriptor!(ExistingValueStub, history)
                    .with_query("event")?
                    .with_converter(AppendConverter),
            )
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArityStub {
    pub single: i32,
}

impl PathMapped for ArityStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(ArityStub::default)
            .field(field_descriptor!(ArityStub, single).with_query("values[*]")?)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailingStub {
    pub value: String,
}

impl PathMapped for FailingStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(FailingStub::default)
            .field(
                field_descriptor!(FailingStub, value)
                    .with_query("value")?
                    .with_converter(FailingConverter),
            )
            .build()
    }
}

/// No projected fields: the gated entry points bypass the pipelines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainStub {
    #[serde(rename = "serdeName")]
    pub value: i32,
}

impl PathMapped for PlainStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(PlainStub::default)
            .field(field_descriptor!(PlainStub, value))
            .build()
    }
}

/// Declares an invalid query expression
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvalidQueryStub {
    pub value: i32,
}

impl PathMapped for InvalidQueryStub {
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
        TypeDescriptor::builder(InvalidQueryStub::default)
            .field(field_descriptor!(InvalidQueryStub, value).with_query("values[?")?)
            .build()
    }
}

//! JSON interop through serde.

use cleverdict_core::{CleverDict, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Settings {
    theme: String,
    font_size: u32,
    plugins: Vec<String>,
}

#[test]
fn round_trip_through_json_text() {
    let original = CleverDict::from_pairs([
        ("zeta", json!(1)),
        ("alpha", json!([1, 2])),
        ("mid key", json!({ "nested": true })),
    ])
    .unwrap();

    let text = original.to_json().unwrap();
    let back: CleverDict<Value> = CleverDict::from_json(&text).unwrap();
    assert_eq!(back, original);
    assert_eq!(back.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid key"]);
}

#[test]
fn serde_traits_work_with_serde_json_directly() {
    let dict = CleverDict::from_pairs([("b", 2), ("a", 1)]).unwrap();
    let value = serde_json::to_value(&dict).unwrap();
    assert_eq!(value, json!({ "b": 2, "a": 1 }));

    let back: CleverDict<i32> = serde_json::from_value(value).unwrap();
    assert_eq!(back, dict);
}

#[test]
fn typed_objects_convert_both_ways() {
    let settings = Settings {
        theme: "dark".to_string(),
        font_size: 14,
        plugins: vec!["git".to_string()],
    };
    let mut dict: CleverDict<Value> = CleverDict::from_object(&settings).unwrap();
    assert_eq!(dict.attrs().get("font_size"), Ok(&json!(14)));

    dict.attrs_mut().set("font_size", json!(16)).unwrap();
    let updated: Settings = dict.to_object().unwrap();
    assert_eq!(updated.font_size, 16);
}

#[test]
fn missing_fields_fail_to_convert() {
    let dict = CleverDict::from_pairs([("theme", json!("dark"))]).unwrap();
    let err = dict.to_object::<Settings>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[test]
fn nested_dicts_serialize_as_nested_objects() {
    let inner = CleverDict::from_pairs([("y", 1)]).unwrap();
    let outer = CleverDict::from_pairs([("x", inner)]).unwrap();
    assert_eq!(outer.to_value().unwrap(), json!({ "x": { "y": 1 } }));
}

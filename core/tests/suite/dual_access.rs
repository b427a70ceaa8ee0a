//! Key and attribute access observe one store.

use cleverdict_core::{CleverDict, DictError, ErrorKind};
use serde_json::{Value, json};

#[test]
fn attribute_and_key_writes_interleave() {
    let mut dict: CleverDict<Value> = CleverDict::new();
    dict.set("name", json!("Ada")).unwrap();
    dict.attrs_mut().set("age", json!(36)).unwrap();
    dict.set("age", json!(37)).unwrap();
    dict.attrs_mut().set("name", json!("Grace")).unwrap();

    assert_eq!(dict.attrs().get("age"), Ok(&json!(37)));
    assert_eq!(dict.get("name"), Ok(&json!("Grace")));
    assert_eq!(dict.keys().collect::<Vec<_>>(), ["name", "age"]);
}

#[test]
fn every_identifier_key_is_an_attribute() {
    let dict = CleverDict::from_pairs([("alpha", 1), ("two words", 2), ("_private", 3)]).unwrap();
    for (key, value) in &dict {
        if dict.is_identifier(key) {
            assert_eq!(dict.attrs().get(key), Ok(value));
        } else {
            assert!(!dict.attrs().contains(key));
        }
    }
    assert_eq!(dict.attrs().names(), ["alpha", "_private"]);
}

#[test]
fn keywords_stay_mapping_only() {
    let mut dict = CleverDict::from_pairs([("type", 1), ("fn", 2)]).unwrap();
    assert_eq!(dict["type"], 1);
    assert_eq!(
        dict.attrs().get("type").unwrap_err().kind(),
        ErrorKind::InvalidIdentifier
    );
    dict.add_alias("type", "kind").unwrap();
    assert_eq!(dict.attrs().get("kind"), Ok(&1));
}

#[test]
fn coerced_keys_are_reachable_as_text() {
    let mut dict: CleverDict<&str> = CleverDict::new();
    dict.set(7_u8, "seven").unwrap();
    dict.set(true, "yes").unwrap();
    dict.set(1.5_f64, "one and a half").unwrap();

    assert_eq!(dict.get("7"), Ok(&"seven"));
    assert_eq!(dict.get("true"), Ok(&"yes"));
    assert_eq!(dict.get("1.5"), Ok(&"one and a half"));
}

#[test]
fn uncoercible_keys_leave_the_store_untouched() {
    let mut dict = CleverDict::from_pairs([("a", 1)]).unwrap();
    let err = dict.set(f64::NAN, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    let err = dict.set(&json!(null), 2).unwrap_err();
    assert_eq!(err.to_string(), "JSON null cannot be used as a key");
    assert_eq!(dict.len(), 1);
}

#[test]
fn direct_attributes_are_not_entries() {
    let mut dict = CleverDict::from_pairs([("a", 1)]).unwrap();
    dict.set_direct("cache_hits", 10).unwrap();

    assert_eq!(dict.get_direct("cache_hits"), Ok(&10));
    assert_eq!(dict.len(), 1);
    assert!(!dict.contains_key("cache_hits"));
    assert_eq!(
        dict.attrs().get("cache_hits"),
        Err(DictError::attribute_not_found("cache_hits"))
    );
    assert_eq!(dict.direct_names().collect::<Vec<_>>(), ["cache_hits"]);

    dict.clear();
    assert!(dict.is_empty());
    assert_eq!(dict.get_direct("cache_hits"), Ok(&10));
    assert_eq!(*dict.delete_direct("cache_hits").unwrap(), 10);
}

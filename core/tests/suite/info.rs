//! Human-readable listing of entries and their attribute names.

use cleverdict_core::{AliasPolicy, CleverDict, DictOptions};
use insta::assert_snapshot;
use serde_json::{Value, json};

#[test]
fn info_lists_every_name() {
    let mut dict: CleverDict<Value> = CleverDict::with_options(
        DictOptions::default().with_aliases(AliasPolicy::Normalise),
    );
    dict.set("name", json!("Ada")).unwrap();
    dict.set("birth year", json!(1815)).unwrap();
    dict.set("type", json!(null)).unwrap();
    dict.add_alias("name", "n").unwrap();

    assert_snapshot!(dict.info(), @r#"
    CleverDict (3 entries):
        .name == .n == ["name"] == String("Ada")
        .birth_year == ["birth year"] == Number(1815)
        .type_ == ["type"] == Null
    "#);
}

#[test]
fn info_singular_and_empty() {
    let empty: CleverDict<i32> = CleverDict::new();
    assert_eq!(empty.info(), "CleverDict (0 entries):\n");

    let one = CleverDict::from_pairs([("x", 1)]).unwrap();
    assert_eq!(one.info(), "CleverDict (1 entry):\n    .x == [\"x\"] == 1\n");
}

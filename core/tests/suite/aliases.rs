//! Alias registration and the normalising alias policy.

use cleverdict_core::{AliasPolicy, CleverDict, DictError, DictOptions, ErrorKind};

fn normalising() -> DictOptions {
    DictOptions::default().with_aliases(AliasPolicy::Normalise)
}

#[test]
fn normalise_policy_registers_aliases_for_non_identifier_keys() {
    let dict =
        CleverDict::from_pairs_with([("first name", "Ada"), ("2nd", "x"), ("if", "y")], normalising())
            .unwrap();
    assert_eq!(dict.attrs().get("first_name"), Ok(&"Ada"));
    assert_eq!(dict.attrs().get("_2nd"), Ok(&"x"));
    assert_eq!(dict.attrs().get("if_"), Ok(&"y"));
    assert_eq!(dict.resolve_attribute("first_name"), Some("first name"));
}

#[test]
fn explicit_policy_registers_nothing() {
    let dict = CleverDict::from_pairs([("first name", 1)]).unwrap();
    assert!(dict.aliases_of("first name").next().is_none());
    assert!(!dict.attrs().contains("first_name"));
}

#[test]
fn colliding_normalised_name_fails_the_whole_insert() {
    let mut dict = CleverDict::from_pairs_with([("a b", 1)], normalising()).unwrap();
    let err = dict.set("a-b", 2).unwrap_err();
    assert_eq!(err, DictError::alias_conflict("a_b", "a b"));
    assert!(!dict.contains_key("a-b"));
    assert_eq!(dict.len(), 1);
}

#[test]
fn key_matching_an_alias_is_rejected() {
    let mut dict = CleverDict::from_pairs([("my key", 1)]).unwrap();
    dict.add_alias("my key", "mk").unwrap();
    let err = dict.set("mk", 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AliasConflict);
    assert_eq!(dict.len(), 1);
}

#[test]
fn alias_cannot_shadow_another_entry() {
    let mut dict = CleverDict::from_pairs([("x", 1), ("my key", 2)]).unwrap();
    assert_eq!(
        dict.add_alias("my key", "x").unwrap_err(),
        DictError::alias_conflict("x", "x")
    );
    assert_eq!(
        dict.add_alias("missing", "m").unwrap_err().kind(),
        ErrorKind::KeyNotFound
    );
}

#[test]
fn deleting_an_entry_drops_its_aliases() {
    let mut dict = CleverDict::from_pairs([("my key", 1)]).unwrap();
    dict.add_alias("my key", "mk").unwrap();
    dict.add_alias("my key", "k").unwrap();
    assert_eq!(dict.aliases_of("my key").collect::<Vec<_>>(), ["mk", "k"]);

    dict.delete("my key").unwrap();
    assert!(!dict.attrs().contains("mk"));
    assert!(!dict.attrs().contains("k"));

    dict.set("mk", 5).unwrap();
    assert_eq!(dict.attrs().get("mk"), Ok(&5));
}

#[test]
fn delete_alias_keeps_the_entry() {
    let mut dict = CleverDict::from_pairs([("my key", 1)]).unwrap();
    dict.add_alias("my key", "mk").unwrap();
    assert_eq!(dict.delete_alias("mk").unwrap(), "my key");
    assert_eq!(dict.get("my key"), Ok(&1));
    assert_eq!(
        dict.delete_alias("mk").unwrap_err(),
        DictError::attribute_not_found("mk")
    );
}

//! Options loaded from a config file drive dict behaviour.

use cleverdict_config::{DictConfig, load_options_at};
use cleverdict_core::{CleverDict, ErrorKind};

fn dict_from_config(content: &str) -> CleverDict<i32> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    let options = DictConfig::load_from(&path).unwrap().options().unwrap();
    CleverDict::with_options(options)
}

#[test]
fn ascii_policy_hides_unicode_keys() {
    let mut dict = dict_from_config("[dict]\nidentifiers = \"ascii\"\n");
    dict.set("café", 1).unwrap();
    assert_eq!(dict.get("café"), Ok(&1));
    assert_eq!(
        dict.attrs().get("café").unwrap_err().kind(),
        ErrorKind::InvalidIdentifier
    );
}

#[test]
fn unicode_policy_exposes_unicode_keys() {
    let mut dict = dict_from_config("");
    dict.set("café", 1).unwrap();
    assert_eq!(dict.attrs().get("café"), Ok(&1));
}

#[test]
fn normalise_policy_from_config() {
    let mut dict = dict_from_config("[dict]\naliases = \"normalise\"\n");
    dict.set("item count", 3).unwrap();
    assert_eq!(dict.attrs().get("item_count"), Ok(&3));
}

#[test]
fn unusable_config_falls_back_to_default_behaviour() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[dict]\naliases = \"always\"\n").unwrap();

    let mut dict: CleverDict<i32> = CleverDict::with_options(load_options_at(&path));
    dict.set("item count", 3).unwrap();
    assert!(!dict.attrs().contains("item_count"));
    assert_eq!(dict.get("item count"), Ok(&3));
}

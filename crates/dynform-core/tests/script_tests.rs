//! Replaying action scripts against a store

use dynform_core::{ActionOutcome, ActionScript, FieldValue, FormAction, FormStore};
use pretty_assertions::assert_eq;

const FRIENDS_SCRIPT: &str = r##"
actions:
  - op: append_entry
    collection: friends
    defaults: { favorites: { color: "#0000ff" } }
  - op: set_field
    path: friends.0.favorites.number
    value: "42"
  - op: set_enum
    field: likesTypescript
    value: MAYBE
  - op: remove_entry
    collection: friends
    index: 0
"##;

#[test]
fn script_replay_continues_past_rejection() {
    let script = ActionScript::from_yaml_str(FRIENDS_SCRIPT).unwrap();
    let mut store = FormStore::new();

    let outcomes: Vec<_> = script.actions.iter().map(|a| store.apply(a)).collect();

    assert!(matches!(outcomes[0], Ok(ActionOutcome::Appended(_))));
    assert!(matches!(outcomes[1], Ok(ActionOutcome::Written(true))));
    assert!(outcomes[2].is_err());
    assert!(matches!(outcomes[3], Ok(ActionOutcome::Removed(_))));

    assert!(store.snapshot().friends.is_empty());
    assert_eq!(store.revision(), 3);
}

#[test]
fn script_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("friends.yml");
    std::fs::write(&path, FRIENDS_SCRIPT).unwrap();

    let script = ActionScript::load(&path).unwrap();
    assert_eq!(script.len(), 4);
    assert_eq!(
        script.actions[1],
        FormAction::SetField {
            path: "friends.0.favorites.number".to_string(),
            value: "42".to_string(),
        }
    );
}

#[test]
fn script_json_and_yaml_agree() {
    let yaml = ActionScript::from_yaml_str(FRIENDS_SCRIPT).unwrap();
    let json = ActionScript::from_json_str(&serde_json::to_string(&yaml).unwrap()).unwrap();
    assert_eq!(json, yaml);

    let mut store = FormStore::new();
    for action in &json.actions[..2] {
        store.apply(action).unwrap();
    }
    assert_eq!(
        store.get_field("friends.0.favorites.number").unwrap(),
        FieldValue::Number(42.0)
    );
}

#[test]
fn unquoted_number_in_script_reaches_number_field() {
    let script = ActionScript::from_yaml_str(
        r##"
actions:
  - op: append_entry
    collection: friends
  - op: set_field
    path: friends.0.favorites.number
    value: 42
"##,
    )
    .unwrap();

    let mut store = FormStore::new();
    for action in &script.actions {
        store.apply(action).unwrap();
    }
    assert_eq!(
        store.get_field("friends.0.favorites.number").unwrap(),
        FieldValue::Number(42.0)
    );
}

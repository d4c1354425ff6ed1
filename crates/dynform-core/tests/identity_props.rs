//! Identity properties of repeatable collections
//!
//! A reference model tracks (id, name) pairs while random appends, removals
//! and edits run against the store.

use dynform_core::{CollectionKind, EntryId, FormStore};
use dynform_test_utils::{friend_named, friend_names};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Append(String),
    Remove(usize),
    Rename(usize, String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Op::Append),
        (0..12usize).prop_map(Op::Remove),
        (0..12usize, "[a-z]{1,8}").prop_map(|(i, name)| Op::Rename(i, name)),
    ]
}

proptest! {
    #[test]
    fn prop_survivors_keep_identity_and_values(ops in proptest::collection::vec(op(), 0..60)) {
        let mut store = FormStore::new();
        let mut model: Vec<(EntryId, String)> = Vec::new();

        for op in ops {
            match op {
                Op::Append(name) => {
                    let id = store.append_friend(friend_named(&name));
                    prop_assert!(model.iter().all(|(existing, _)| *existing != id));
                    model.push((id, name));
                }
                Op::Remove(index) => {
                    let result = store.remove_entry(CollectionKind::Friends, index);
                    if index < model.len() {
                        let (expected, _) = model.remove(index);
                        prop_assert_eq!(result.unwrap(), expected);
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Rename(index, name) => {
                    let result = store.set_field(&format!("friends.{index}.name"), &name);
                    if index < model.len() {
                        prop_assert!(result.is_ok());
                        model[index].1 = name;
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
            }

            let ids: Vec<EntryId> = model.iter().map(|(id, _)| *id).collect();
            let names: Vec<Option<String>> = model.iter().map(|(_, n)| Some(n.clone())).collect();
            prop_assert_eq!(store.entry_ids(CollectionKind::Friends), ids);
            prop_assert_eq!(friend_names(&store), names);
        }
    }

    #[test]
    fn prop_remove_shifts_identities(len in 1..20usize, pick in any::<prop::sample::Index>()) {
        let mut store = FormStore::new();
        let original: Vec<EntryId> = (0..len)
            .map(|i| store.append_friend(friend_named(&i.to_string())))
            .collect();
        let index = pick.index(len);

        store.remove_entry(CollectionKind::Friends, index).unwrap();
        let after = store.entry_ids(CollectionKind::Friends);

        prop_assert_eq!(after.len(), len - 1);
        prop_assert_eq!(&after[..index], &original[..index]);
        prop_assert_eq!(&after[index..], &original[index + 1..]);
    }

    #[test]
    fn prop_read_after_write(value in "\\PC{0,24}") {
        let mut store = FormStore::new();
        store.append_default_skill();
        store.set_field("skills.0.label", &value).unwrap();
        let snapshot = store.snapshot();
        let stored = snapshot.skills.values().next().map(|skill| skill.label.as_str());
        prop_assert_eq!(stored, Some(value.as_str()));
        let read = store.get_field("skills.0.label").unwrap();
        prop_assert_eq!(read.as_text(), Some(value.as_str()));
    }

    #[test]
    fn prop_numeric_input_never_nan(raw in "\\PC{0,12}") {
        let mut store = FormStore::new();
        store.append_default_friend();
        store.set_field("friends.0.favorites.number", "5").unwrap();
        store.set_field("friends.0.favorites.number", &raw).unwrap();

        let value = store.get_field("friends.0.favorites.number").unwrap();
        match value.as_number() {
            Some(n) => {
                prop_assert!(n.is_finite());
                prop_assert_eq!(Some(n), raw.trim().parse::<f64>().ok());
            }
            None => prop_assert!(value.is_absent()),
        }
    }
}

//! Form data model
//!
//! Field order in these structs is the key order of the JSON preview.

use crate::collection::EntryCollection;
use crate::color::HexColor;
use crate::path::FieldPath;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Answer to "Do you like Typescript?"
///
/// `YesAgain` behaves exactly like any other choice; it has no special meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikesTypescript {
    #[default]
    Yes,
    No,
    YesAgain,
}

impl LikesTypescript {
    /// Every allowed value, in display order
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::YesAgain];

    /// Wire name (`YES`, `NO`, `YES_AGAIN`)
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::YesAgain => "YES_AGAIN",
        }
    }

    /// Allowed wire names joined for messages
    #[must_use]
    pub fn allowed() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl Display for LikesTypescript {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LikesTypescript {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

/// Value outside the allowed set of an enum field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown choice: {0:?}")]
pub struct UnknownChoice(pub String);

/// One entry of the `skills` collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillEntry {
    pub label: String,
}

impl SkillEntry {
    /// Skill with the given label
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Nested `favorites` record of a friend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Favorites {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_opt_number")]
    pub number: Option<f64>,
}

#[allow(clippy::ref_option)]
fn serialize_opt_number<S: serde::Serializer>(
    number: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match number {
        Some(n) => crate::value::serialize_number(n, serializer),
        None => serializer.serialize_none(),
    }
}

/// One entry of the `friends` collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FriendEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub favorites: Favorites,
}

impl FriendEntry {
    /// Friend with only a favorite color set
    #[must_use]
    pub fn with_color(color: HexColor) -> Self {
        Self {
            favorites: Favorites {
                color: Some(color),
                number: None,
            },
            ..Self::default()
        }
    }

    /// Set the name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Repeatable collections of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Skills,
    Friends,
}

impl CollectionKind {
    /// Field name of the collection
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Friends => "friends",
        }
    }

    /// Path of the collection itself
    #[inline]
    #[must_use]
    pub fn path(self) -> FieldPath {
        FieldPath::single(self.as_str())
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = crate::FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skills" => Ok(Self::Skills),
            "friends" => Ok(Self::Friends),
            other => Err(crate::FormError::UnknownCollection(other.to_string())),
        }
    }
}

/// Complete form state
///
/// Serializes to the plain nested structure shown in the live preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub likes_typescript: LikesTypescript,
    pub skills: EntryCollection<SkillEntry>,
    pub friends: EntryCollection<FriendEntry>,
}

impl FormState {
    /// Empty form with the given radio default
    #[must_use]
    pub fn new(likes_typescript: LikesTypescript) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            likes_typescript,
            skills: EntryCollection::new(),
            friends: EntryCollection::new(),
        }
    }

    /// Number of entries in a collection
    #[inline]
    #[must_use]
    pub fn len_of(&self, collection: CollectionKind) -> usize {
        match collection {
            CollectionKind::Skills => self.skills.len(),
            CollectionKind::Friends => self.friends.len(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(LikesTypescript::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::EntryIdAllocator;

    #[test]
    fn likes_typescript_wire_names() {
        for value in LikesTypescript::ALL {
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(json, format!("\"{}\"", value.as_str()));
            assert_eq!(value.as_str().parse(), Ok(value));
        }
        assert!("MAYBE".parse::<LikesTypescript>().is_err());
        assert!("yes".parse::<LikesTypescript>().is_err());
    }

    #[test]
    fn default_form_snapshot() {
        let json = serde_json::to_string(&FormState::default()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"","email":"","likesTypescript":"YES","skills":[],"friends":[]}"#
        );
    }

    #[test]
    fn friend_omits_absent_fields() {
        let mut state = FormState::default();
        let mut ids = EntryIdAllocator::new();
        state
            .friends
            .push(ids.mint(), FriendEntry::with_color(HexColor::BLUE));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json["friends"],
            serde_json::json!([{ "favorites": { "color": "#0000ff" } }])
        );
    }

    #[test]
    fn friend_defaults_deserialize() {
        let friend: FriendEntry = serde_json::from_value(serde_json::json!({
            "birthday": "1990-04-01",
            "favorites": { "color": "#F00", "number": 7 }
        }))
        .unwrap();
        assert_eq!(friend.favorites.color, Some(HexColor::from_rgb(0xff, 0, 0)));
        assert_eq!(friend.favorites.number, Some(7.0));
        assert_eq!(friend.birthday, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert_eq!(friend.name, None);
    }

    #[test]
    fn friend_defaults_reject_unknown_fields() {
        let result: Result<FriendEntry, _> =
            serde_json::from_value(serde_json::json!({ "nickname": "bob" }));
        assert!(result.is_err());
    }

    #[test]
    fn collection_kind_parse() {
        assert_eq!("friends".parse::<CollectionKind>().unwrap(), CollectionKind::Friends);
        assert!("enemies".parse::<CollectionKind>().is_err());
        assert_eq!(CollectionKind::Skills.path().to_string(), "skills");
    }
}

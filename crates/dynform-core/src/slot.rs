//! Resolution of paths to scalar slots
//!
//! [`Slot`] is the structural address of one scalar field. Resolution is
//! purely syntactic; index bounds are checked against the current state on
//! every read and write.

use crate::collection::Entry;
use crate::error::FormError;
use crate::model::{CollectionKind, FormState, FriendEntry, SkillEntry};
use crate::path::{FieldPath, Segment};
use crate::value::{coerce_color, coerce_date, coerce_number, FieldKind, FieldValue};

/// Scalar slot addressed by a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Name,
    Email,
    LikesTypescript,
    SkillLabel(usize),
    FriendName(usize),
    FriendEmail(usize),
    FriendBirthday(usize),
    FriendColor(usize),
    FriendNumber(usize),
}

impl Slot {
    /// Resolve a path to a slot
    ///
    /// # Errors
    /// - [`FormError::NotAScalar`] for records and collections
    /// - [`FormError::UnknownField`] for names the form does not have
    pub fn resolve(path: &FieldPath) -> Result<Self, FormError> {
        use Segment::{Index, Key};

        let keys: Vec<Option<&str>> = path.iter().map(Segment::as_key).collect();
        let slot = match (path.segments(), keys.as_slice()) {
            (_, [Some("name")]) => Self::Name,
            (_, [Some("email")]) => Self::Email,
            (_, [Some("likesTypescript")]) => Self::LikesTypescript,
            ([Key(_), Index(i), Key(_)], [Some("skills"), None, Some("label")]) => {
                Self::SkillLabel(*i)
            }
            ([Key(_), Index(i), Key(_)], [Some("friends"), None, Some(field)]) => match *field {
                "name" => Self::FriendName(*i),
                "email" => Self::FriendEmail(*i),
                "birthday" => Self::FriendBirthday(*i),
                "favorites" => return Err(not_a_scalar(path)),
                _ => return Err(unknown(path)),
            },
            ([Key(_), Index(i), Key(_), Key(_)], [Some("friends"), None, Some("favorites"), Some(field)]) => {
                match *field {
                    "color" => Self::FriendColor(*i),
                    "number" => Self::FriendNumber(*i),
                    _ => return Err(unknown(path)),
                }
            }
            ([], _)
            | (_, [Some("skills" | "friends")])
            | ([Key(_), Index(_)], [Some("skills" | "friends"), None]) => {
                return Err(not_a_scalar(path))
            }
            _ => return Err(unknown(path)),
        };
        Ok(slot)
    }

    /// Declared kind of the slot
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Name
            | Self::Email
            | Self::SkillLabel(_)
            | Self::FriendName(_)
            | Self::FriendEmail(_) => FieldKind::Text,
            Self::LikesTypescript => FieldKind::Choice,
            Self::FriendBirthday(_) => FieldKind::Date,
            Self::FriendColor(_) => FieldKind::Color,
            Self::FriendNumber(_) => FieldKind::Number,
        }
    }

    /// Collection and index the slot lives in, if any
    #[must_use]
    pub const fn entry(self) -> Option<(CollectionKind, usize)> {
        match self {
            Self::Name | Self::Email | Self::LikesTypescript => None,
            Self::SkillLabel(i) => Some((CollectionKind::Skills, i)),
            Self::FriendName(i)
            | Self::FriendEmail(i)
            | Self::FriendBirthday(i)
            | Self::FriendColor(i)
            | Self::FriendNumber(i) => Some((CollectionKind::Friends, i)),
        }
    }

    /// Read the slot's current value
    ///
    /// # Errors
    /// Returns [`FormError::IndexOutOfRange`] if the entry does not exist
    pub fn read(self, state: &FormState) -> Result<FieldValue, FormError> {
        let value: FieldValue = match self {
            Self::Name => FieldValue::Text(state.name.clone()),
            Self::Email => FieldValue::Text(state.email.clone()),
            Self::LikesTypescript => FieldValue::Choice(state.likes_typescript),
            Self::SkillLabel(i) => FieldValue::Text(skill(state, i)?.value().label.clone()),
            Self::FriendName(i) => friend(state, i)?.value().name.clone().into(),
            Self::FriendEmail(i) => friend(state, i)?.value().email.clone().into(),
            Self::FriendBirthday(i) => friend(state, i)?.value().birthday.into(),
            Self::FriendColor(i) => friend(state, i)?.value().favorites.color.into(),
            Self::FriendNumber(i) => friend(state, i)?.value().favorites.number.into(),
        };
        Ok(value)
    }

    /// Coerce raw control input and store it
    ///
    /// Returns `true` if the stored value changed. Nothing is written when
    /// coercion fails.
    ///
    /// # Errors
    /// Returns error if the entry does not exist or the input is rejected
    /// for the slot's kind
    pub fn write(self, state: &mut FormState, path: &FieldPath, raw: &str) -> Result<bool, FormError> {
        let changed = match self {
            Self::Name => replace(&mut state.name, raw.to_string()),
            Self::Email => replace(&mut state.email, raw.to_string()),
            Self::LikesTypescript => {
                let choice = raw.parse().map_err(|_| FormError::InvalidEnumValue {
                    field: path.to_string(),
                    value: raw.to_string(),
                    allowed: crate::LikesTypescript::allowed(),
                })?;
                replace(&mut state.likes_typescript, choice)
            }
            Self::SkillLabel(i) => {
                replace(&mut skill_mut(state, i)?.value_mut().label, raw.to_string())
            }
            Self::FriendName(i) => {
                replace(&mut friend_mut(state, i)?.value_mut().name, Some(raw.to_string()))
            }
            Self::FriendEmail(i) => {
                replace(&mut friend_mut(state, i)?.value_mut().email, Some(raw.to_string()))
            }
            Self::FriendBirthday(i) => {
                let entry = friend_mut(state, i)?;
                let date = coerce_date(raw).map_err(|_| FormError::InvalidDate {
                    path: path.to_string(),
                    value: raw.to_string(),
                })?;
                replace(&mut entry.value_mut().birthday, date)
            }
            Self::FriendColor(i) => {
                let entry = friend_mut(state, i)?;
                let color = coerce_color(raw).map_err(|source| FormError::InvalidColor {
                    path: path.to_string(),
                    source,
                })?;
                replace(&mut entry.value_mut().favorites.color, color)
            }
            Self::FriendNumber(i) => {
                replace(&mut friend_mut(state, i)?.value_mut().favorites.number, coerce_number(raw))
            }
        };
        Ok(changed)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn out_of_range(collection: CollectionKind, index: usize, len: usize) -> FormError {
    FormError::IndexOutOfRange {
        collection,
        index,
        len,
    }
}

fn skill(state: &FormState, i: usize) -> Result<&Entry<SkillEntry>, FormError> {
    let len = state.skills.len();
    state
        .skills
        .get(i)
        .ok_or_else(|| out_of_range(CollectionKind::Skills, i, len))
}

fn skill_mut(state: &mut FormState, i: usize) -> Result<&mut Entry<SkillEntry>, FormError> {
    let len = state.skills.len();
    state
        .skills
        .get_mut(i)
        .ok_or_else(|| out_of_range(CollectionKind::Skills, i, len))
}

fn friend(state: &FormState, i: usize) -> Result<&Entry<FriendEntry>, FormError> {
    let len = state.friends.len();
    state
        .friends
        .get(i)
        .ok_or_else(|| out_of_range(CollectionKind::Friends, i, len))
}

fn friend_mut(state: &mut FormState, i: usize) -> Result<&mut Entry<FriendEntry>, FormError> {
    let len = state.friends.len();
    state
        .friends
        .get_mut(i)
        .ok_or_else(|| out_of_range(CollectionKind::Friends, i, len))
}

fn not_a_scalar(path: &FieldPath) -> FormError {
    FormError::NotAScalar {
        path: path.to_string(),
    }
}

fn unknown(path: &FieldPath) -> FormError {
    FormError::UnknownField {
        path: path.to_string(),
    }
}

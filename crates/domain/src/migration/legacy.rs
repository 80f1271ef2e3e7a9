//! Pre-page document shapes (schemas 1 and 2).
//!
//! Both schemas are flat: labelled lists of `{ name, value }` entries plus
//! stress tracks. They differ only in the stress-box type, so one generic
//! struct covers both. Keys this model does not know are kept in `extra` and
//! survive the 1→2 stage untouched.
//!
//! Only the four entry lists and `stressTracks` are required. Identity fields
//! may be absent or `null` in documents written by early clients.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::character::Slot;
use crate::ids::CharacterId;

/// Schema 1: stress boxes are plain booleans.
pub type LegacyV1Character = LegacyCharacter<bool>;

/// Schema 2: stress boxes are `{ checked, label }`.
pub type LegacyV2Character = LegacyCharacter<StressBox>;

/// A schema 2 stress box is exactly a slot of the current model.
pub type StressBox = Slot;

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

impl LegacyEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyStressTrack<B> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub value: Vec<B>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCharacter<B> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CharacterId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_during_turn: Option<bool>,
    pub version: u32,

    pub aspects: Vec<LegacyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspects_label: Option<String>,

    pub stunts: Vec<LegacyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stunts_label: Option<String>,

    pub consequences: Vec<LegacyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequences_label: Option<String>,

    pub skills: Vec<LegacyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_label: Option<String>,

    pub stress_tracks: Vec<LegacyStressTrack<B>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_tracks_label: Option<String>,

    // Not carried into schema 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fate_points: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! Stage 1→2: boolean stress boxes become labelled slots.

use super::legacy::{LegacyStressTrack, LegacyV1Character, LegacyV2Character, StressBox};
use super::SchemaVersion;

/// Box `i` of each track becomes `{ checked, label: "i+1" }`; every other
/// field, unknown keys included, is copied as is.
pub fn migrate_v1_to_v2(v1: &LegacyV1Character) -> LegacyV2Character {
    let stress_tracks = v1
        .stress_tracks
        .iter()
        .map(|track| LegacyStressTrack {
            name: track.name.clone(),
            value: track
                .value
                .iter()
                .enumerate()
                .map(|(index, checked)| StressBox::numbered(index, *checked))
                .collect(),
        })
        .collect();

    LegacyV2Character {
        id: v1.id.clone(),
        name: v1.name.clone(),
        group: v1.group.clone(),
        last_updated: v1.last_updated,
        played_during_turn: v1.played_during_turn,
        version: SchemaVersion::V2.as_u32(),
        aspects: v1.aspects.clone(),
        aspects_label: v1.aspects_label.clone(),
        stunts: v1.stunts.clone(),
        stunts_label: v1.stunts_label.clone(),
        consequences: v1.consequences.clone(),
        consequences_label: v1.consequences_label.clone(),
        skills: v1.skills.clone(),
        skills_label: v1.skills_label.clone(),
        notes: v1.notes.clone(),
        notes_label: v1.notes_label.clone(),
        stress_tracks,
        stress_tracks_label: v1.stress_tracks_label.clone(),
        fate_points: v1.fate_points.clone(),
        refresh: v1.refresh.clone(),
        extra: v1.extra.clone(),
    }
}

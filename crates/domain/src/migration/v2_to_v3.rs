//! Stage 2→3: reshape the flat schema 2 document into pages, sections and
//! blocks.
//!
//! The result is always one page, "Character", holding six sections in a
//! fixed order:
//!
//! | # | label | column | block type | source |
//! |---|---|---|---|---|
//! | 1 | Aspects | Left, on card | Text | `aspects` |
//! | 2 | Stunts & Extras | Left | Text | `stunts` |
//! | 3 | Other | Left | Text | `notes`, as one "Notes" block |
//! | 4 | Stress | Right | SlotTracker | `stressTracks` |
//! | 5 | Consequences | Right | Text | `consequences` |
//! | 6 | Skills | Right, on card | Skill | `skills` |
//!
//! A custom `*Label` on the legacy document replaces the default label.
//! `fatePoints` and `refresh` have no destination yet and are dropped.
//! A missing `id` gets a fresh one; a missing `lastUpdated` becomes 0 unless
//! the caller stamped it beforehand.

use super::legacy::{LegacyEntry, LegacyV2Character};
use crate::character::{Block, Character, Page, Position, Section, LATEST_VERSION};
use crate::ids::CharacterId;

pub const PAGE_LABEL: &str = "Character";
pub const ASPECTS_LABEL: &str = "Aspects";
pub const STUNTS_LABEL: &str = "Stunts & Extras";
pub const NOTES_SECTION_LABEL: &str = "Other";
pub const NOTES_BLOCK_LABEL: &str = "Notes";
pub const STRESS_LABEL: &str = "Stress";
pub const CONSEQUENCES_LABEL: &str = "Consequences";
pub const SKILLS_LABEL: &str = "Skills";

fn label_or<'a>(custom: &'a Option<String>, fallback: &'a str) -> &'a str {
    custom.as_deref().unwrap_or(fallback)
}

fn entry_section(
    label: &str,
    position: Position,
    entries: &[LegacyEntry],
    to_block: fn(&LegacyEntry) -> Block,
) -> Section {
    Section::new(label, position).with_blocks(entries.iter().map(to_block).collect())
}

fn text_block(entry: &LegacyEntry) -> Block {
    Block::text(entry.name.clone(), entry.value.clone())
}

fn skill_block(entry: &LegacyEntry) -> Block {
    Block::skill(entry.name.clone(), entry.value.clone())
}

pub fn migrate_v2_to_v3(v2: &LegacyV2Character) -> Character {
    let aspects = entry_section(
        label_or(&v2.aspects_label, ASPECTS_LABEL),
        Position::Left,
        &v2.aspects,
        text_block,
    )
    .visible_on_card();

    let stunts = entry_section(
        label_or(&v2.stunts_label, STUNTS_LABEL),
        Position::Left,
        &v2.stunts,
        text_block,
    );

    let notes = Section::new(label_or(&v2.notes_label, NOTES_SECTION_LABEL), Position::Left)
        .with_blocks(vec![Block::text(
            NOTES_BLOCK_LABEL,
            v2.notes.clone().unwrap_or_default(),
        )]);

    let stress = Section::new(label_or(&v2.stress_tracks_label, STRESS_LABEL), Position::Right)
        .with_blocks(
            v2.stress_tracks
                .iter()
                .map(|track| Block::slot_tracker(track.name.clone(), track.value.clone()))
                .collect(),
        );

    let consequences = entry_section(
        label_or(&v2.consequences_label, CONSEQUENCES_LABEL),
        Position::Right,
        &v2.consequences,
        text_block,
    );

    let skills = entry_section(
        label_or(&v2.skills_label, SKILLS_LABEL),
        Position::Right,
        &v2.skills,
        skill_block,
    )
    .visible_on_card();

    // TODO: map fatePoints and refresh onto a main point counter once the
    // sheet layout for them is settled.
    Character {
        id: v2.id.clone().unwrap_or_else(CharacterId::generate),
        name: v2.name.clone(),
        group: v2.group.clone(),
        last_updated: v2.last_updated.unwrap_or_default(),
        played_during_turn: v2.played_during_turn,
        version: LATEST_VERSION,
        pages: vec![Page::new(
            PAGE_LABEL,
            vec![aspects, stunts, notes, stress, consequences, skills],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{BlockContent, BlockType, Slot};
    use crate::migration::legacy::LegacyStressTrack;
    use serde_json::{json, Map};

    fn v2() -> LegacyV2Character {
        LegacyV2Character {
            id: Some("c2".into()),
            name: "Landon".to_string(),
            group: None,
            last_updated: Some(1_480_000_000),
            played_during_turn: Some(true),
            version: 2,
            aspects: vec![
                LegacyEntry::new("High Concept", "Disciple of the Ivory Shroud"),
                LegacyEntry::new("Trouble", "I Owe Old Finn Everything"),
            ],
            aspects_label: None,
            stunts: vec![LegacyEntry::new("Another Round?", "+2 to Rapport")],
            stunts_label: None,
            consequences: vec![LegacyEntry::new("Mild", "")],
            consequences_label: None,
            skills: vec![
                LegacyEntry::new("Fight", "4"),
                LegacyEntry::new("Athletics", "3"),
            ],
            skills_label: None,
            notes: None,
            notes_label: None,
            stress_tracks: vec![LegacyStressTrack {
                name: "Physical".to_string(),
                value: vec![Slot::new("1", true), Slot::new("2", false)],
            }],
            stress_tracks_label: None,
            fate_points: Some(json!(3)),
            refresh: Some(json!(2)),
            extra: Map::new(),
        }
    }

    fn layout(character: &Character) -> Vec<(&str, Position, bool)> {
        character.pages[0]
            .sections
            .iter()
            .map(|s| (s.label.as_str(), s.position, s.is_visible_on_card()))
            .collect()
    }

    #[test]
    fn produces_fixed_six_section_layout() {
        let character = migrate_v2_to_v3(&v2());

        assert_eq!(character.pages.len(), 1);
        assert_eq!(character.pages[0].label, PAGE_LABEL);
        assert_eq!(
            layout(&character),
            vec![
                ("Aspects", Position::Left, true),
                ("Stunts & Extras", Position::Left, false),
                ("Other", Position::Left, false),
                ("Stress", Position::Right, false),
                ("Consequences", Position::Right, false),
                ("Skills", Position::Right, true),
            ]
        );
    }

    #[test]
    fn maps_entries_to_typed_blocks() {
        let character = migrate_v2_to_v3(&v2());
        let sections = &character.pages[0].sections;

        let aspect = &sections[0].blocks[1];
        assert_eq!(aspect.label, "Trouble");
        assert_eq!(
            aspect.content,
            BlockContent::Text {
                value: "I Owe Old Finn Everything".to_string(),
                meta: Default::default()
            }
        );

        assert!(sections[5]
            .blocks
            .iter()
            .all(|block| block.block_type() == BlockType::Skill));
        assert_eq!(sections[5].blocks[0].label, "Fight");

        let stress = &sections[3].blocks[0];
        assert_eq!(stress.label, "Physical");
        assert_eq!(
            stress.content,
            BlockContent::SlotTracker {
                value: vec![Slot::new("1", true), Slot::new("2", false)],
                meta: Default::default()
            }
        );
    }

    #[test]
    fn missing_notes_become_empty_notes_block() {
        let character = migrate_v2_to_v3(&v2());
        let other = &character.pages[0].sections[2];
        assert_eq!(other.blocks.len(), 1);
        assert_eq!(other.blocks[0].label, NOTES_BLOCK_LABEL);
        assert_eq!(
            other.blocks[0].content,
            BlockContent::Text {
                value: String::new(),
                meta: Default::default()
            }
        );
    }

    #[test]
    fn custom_labels_replace_defaults() {
        let mut source = v2();
        source.skills_label = Some("Approaches".to_string());
        source.notes_label = Some("Backstory".to_string());
        let character = migrate_v2_to_v3(&source);

        assert_eq!(character.pages[0].sections[2].label, "Backstory");
        assert_eq!(character.pages[0].sections[5].label, "Approaches");
    }

    #[test]
    fn empty_lists_still_yield_six_sections() {
        let mut source = v2();
        source.aspects.clear();
        source.stunts.clear();
        source.consequences.clear();
        source.skills.clear();
        source.stress_tracks.clear();
        let character = migrate_v2_to_v3(&source);

        assert_eq!(character.pages[0].sections.len(), 6);
        assert_eq!(character.blocks().count(), 1);
    }

    #[test]
    fn carries_identity_and_stamps_latest_version() {
        let source = v2();
        let character = migrate_v2_to_v3(&source);

        assert_eq!(Some(character.id.clone()), source.id);
        assert_eq!(character.name, source.name);
        assert_eq!(Some(character.last_updated), source.last_updated);
        assert_eq!(character.played_during_turn, Some(true));
        assert_eq!(character.version, LATEST_VERSION);
        assert!(character.validate().is_ok());
    }

    #[test]
    fn missing_identity_gets_fresh_id_and_zero_timestamp() {
        let mut source = v2();
        source.id = None;
        source.last_updated = None;
        let character = migrate_v2_to_v3(&source);

        assert!(!character.id.as_str().is_empty());
        assert_eq!(character.last_updated, 0);
        assert!(character.validate().is_ok());
    }

    #[test]
    fn drops_fate_points_and_refresh() {
        // Known data loss: schema 3 has no slot for these yet.
        let character = migrate_v2_to_v3(&v2());
        let document = serde_json::to_value(&character).expect("serialize");

        assert_eq!(document.get("fatePoints"), None);
        assert_eq!(document.get("refresh"), None);
        assert!(character
            .blocks()
            .all(|block| block.block_type() != BlockType::PointCounter));
    }
}

//! Game-system templates.
//!
//! One pure factory per supported game system, each returning a current
//! schema skeleton pre-populated with that system's default sections. The
//! factories leave `name` empty and `lastUpdated` at zero; the character
//! factory stamps both.
//!
//! # Supported Systems
//!
//! - Fate Condensed (`CoreCondensed`)
//! - Fate Accelerated (`Accelerated`)
//! - Fate of Cthulhu (`FateOfCthulhu`)
//! - A blank sheet (`Empty`)

mod empty;
mod fate_accelerated;
mod fate_condensed;
mod fate_of_cthulhu;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::character::{Block, Character, Page, Position, Section, Slot};
use crate::error::DomainError;

pub use empty::make_empty_character;
pub use fate_accelerated::make_fate_accelerated_character;
pub use fate_condensed::make_fate_condensed_character;
pub use fate_of_cthulhu::make_fate_of_cthulhu_character;

/// Game-system selector accepted by the character factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterType {
    CoreCondensed,
    Accelerated,
    FateOfCthulhu,
    Empty,
}

impl CharacterType {
    pub const ALL: [CharacterType; 4] = [
        CharacterType::CoreCondensed,
        CharacterType::Accelerated,
        CharacterType::FateOfCthulhu,
        CharacterType::Empty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterType::CoreCondensed => "CoreCondensed",
            CharacterType::Accelerated => "Accelerated",
            CharacterType::FateOfCthulhu => "FateOfCthulhu",
            CharacterType::Empty => "Empty",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterType::CoreCondensed => "Fate Condensed",
            CharacterType::Accelerated => "Fate Accelerated",
            CharacterType::FateOfCthulhu => "Fate of Cthulhu",
            CharacterType::Empty => "Blank Sheet",
        }
    }

    /// Build this system's skeleton.
    pub fn template(&self) -> Character {
        match self {
            CharacterType::CoreCondensed => make_fate_condensed_character(),
            CharacterType::Accelerated => make_fate_accelerated_character(),
            CharacterType::FateOfCthulhu => make_fate_of_cthulhu_character(),
            CharacterType::Empty => make_empty_character(),
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown character type: {}", s)))
    }
}

// =============================================================================
// Shared building blocks for the templates
// =============================================================================

fn skeleton(pages: Vec<Page>) -> Character {
    Character::new("", 0, pages)
}

fn text_section(label: &str, position: Position, block_labels: &[&str]) -> Section {
    Section::new(label, position).with_blocks(
        block_labels
            .iter()
            .map(|label| Block::text(*label, ""))
            .collect(),
    )
}

fn skill_section(label: &str, position: Position, skills: &[&str]) -> Section {
    Section::new(label, position)
        .visible_on_card()
        .with_blocks(skills.iter().map(|skill| Block::skill(*skill, "0")).collect())
}

fn stress_section(label: &str, position: Position, tracks: &[(&str, usize)]) -> Section {
    Section::new(label, position).with_blocks(
        tracks
            .iter()
            .map(|(track, boxes)| Block::slot_tracker(*track, Slot::track(*boxes)))
            .collect(),
    )
}

fn fate_points_section(refresh: i64) -> Section {
    Section::new("Fate Points", Position::Right)
        .visible_on_card()
        .with_blocks(vec![Block::point_counter(
            "Fate Points",
            refresh.to_string(),
            Some(refresh),
            true,
        )])
}

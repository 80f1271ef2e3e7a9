//! Fate Accelerated sheet: approaches instead of skills, a single stress track.

use super::{fate_points_section, skeleton, skill_section, stress_section, text_section};
use crate::character::{Block, Character, Page, Position, Section};

const APPROACHES: [&str; 6] = ["Careful", "Clever", "Flashy", "Forceful", "Quick", "Sneaky"];

pub fn make_fate_accelerated_character() -> Character {
    let sections = vec![
        text_section(
            "Aspects",
            Position::Left,
            &["High Concept", "Trouble", "Aspect", "Aspect", "Aspect"],
        )
        .visible_on_card(),
        text_section("Stunts", Position::Left, &["Stunt"]),
        Section::new("Other", Position::Left).with_blocks(vec![Block::rich_text("Notes", "")]),
        fate_points_section(3),
        stress_section("Stress", Position::Right, &[("Stress", 3)]),
        text_section(
            "Consequences",
            Position::Right,
            &["Mild", "Moderate", "Severe"],
        ),
        skill_section("Approaches", Position::Right, &APPROACHES),
    ];

    skeleton(vec![Page::new("Character", sections)])
}

use super::{fate_points_section, skeleton, skill_section, stress_section, text_section};
use crate::character::{Block, Character, Page, Position, Section, Slot};

const SKILLS: [&str; 18] = [
    "Academics",
    "Athletics",
    "Burglary",
    "Contacts",
    "Crafts",
    "Deceive",
    "Drive",
    "Empathy",
    "Fight",
    "Investigate",
    "Notice",
    "Physique",
    "Provoke",
    "Rapport",
    "Resources",
    "Shoot",
    "Stealth",
    "Will",
];

pub fn make_fate_of_cthulhu_character() -> Character {
    let sections = vec![
        text_section(
            "Aspects",
            Position::Left,
            &["High Concept", "Trouble", "Relationship", "Other Aspect"],
        )
        .visible_on_card(),
        text_section("Stunts & Extras", Position::Left, &["Stunt", "Stunt", "Stunt"]),
        Section::new("Corruption", Position::Left).with_blocks(vec![
            Block::text("Corruption Aspect", ""),
            Block::slot_tracker("Corruption", Slot::track(5)),
        ]),
        Section::new("Other", Position::Left).with_blocks(vec![Block::rich_text("Notes", "")]),
        fate_points_section(3),
        stress_section("Stress", Position::Right, &[("Physical", 3), ("Mental", 3)]),
        text_section(
            "Consequences",
            Position::Right,
            &["Mild", "Moderate", "Severe"],
        ),
        skill_section("Skills", Position::Right, &SKILLS),
    ];

    skeleton(vec![Page::new("Character", sections)])
}

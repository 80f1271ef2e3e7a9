use super::skeleton;
use crate::character::{Character, Page};

/// A single blank page for players building their own layout.
pub fn make_empty_character() -> Character {
    skeleton(vec![Page::new("Character", Vec::new())])
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::block::Block;
use crate::error::DomainError;
use crate::ids::SectionId;

/// Layout column a section is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Left,
    Right,
}

impl Position {
    pub fn opposite(&self) -> Self {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Left => f.write_str("Left"),
            Position::Right => f.write_str("Right"),
        }
    }
}

impl FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Position::Left),
            "Right" => Ok(Position::Right),
            _ => Err(DomainError::parse(format!("Unknown position: {}", s))),
        }
    }
}

/// A titled group of blocks within a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub label: String,
    pub position: Position,
    /// Summarized on the compact character card when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_on_card: Option<bool>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(label: impl Into<String>, position: Position) -> Self {
        Self {
            id: SectionId::generate(),
            label: label.into(),
            position,
            visible_on_card: None,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn visible_on_card(mut self) -> Self {
        self.visible_on_card = Some(true);
        self
    }

    pub fn is_visible_on_card(&self) -> bool {
        self.visible_on_card.unwrap_or(false)
    }
}

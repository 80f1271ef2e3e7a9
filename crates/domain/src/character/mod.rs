//! The current (schema 3) character document.
//!
//! A character is a tree: pages hold sections, sections hold blocks. Every
//! node carries its own identifier, and no identifier may appear twice in the
//! same tree.

mod block;
mod edits;
mod page;
mod section;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use block::{
    Block, BlockContent, BlockType, CheckableMeta, PointCounterMeta, Slot, SlotTrackerMeta,
};
pub use page::Page;
pub use section::{Position, Section};

use crate::clock::{unix_now, ClockPort};
use crate::error::DomainError;
use crate::ids::{CharacterId, SectionId};

/// Schema version stamped on every made or migrated character.
pub const LATEST_VERSION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Unix seconds.
    pub last_updated: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_during_turn: Option<bool>,
    pub version: u32,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Character {
    pub fn new(name: impl Into<String>, last_updated: i64, pages: Vec<Page>) -> Self {
        Self {
            id: CharacterId::generate(),
            name: name.into(),
            group: None,
            last_updated,
            played_during_turn: None,
            version: LATEST_VERSION,
            pages,
        }
    }

    /// Stamp `lastUpdated` with the clock's current time.
    pub fn touch(&mut self, clock: &dyn ClockPort) {
        self.last_updated = unix_now(clock);
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.pages.iter().flat_map(|page| page.sections.iter())
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections().flat_map(|section| section.blocks.iter())
    }

    pub fn find_section(&self, section_id: &SectionId) -> Option<&Section> {
        self.sections().find(|section| &section.id == section_id)
    }

    /// Every identifier in the tree, character id first, in document order.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids = vec![self.id.as_str()];
        for page in &self.pages {
            ids.push(page.id.as_str());
            for section in &page.sections {
                ids.push(section.id.as_str());
                ids.extend(section.blocks.iter().map(|block| block.id.as_str()));
            }
        }
        ids
    }

    /// Check the invariants a consumer relies on after loading.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if `version` is not [`LATEST_VERSION`]
    /// - `DomainError::Constraint` if any identifier occurs twice in the tree
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.version != LATEST_VERSION {
            return Err(DomainError::validation(format!(
                "expected schema version {}, found {}",
                LATEST_VERSION, self.version
            )));
        }

        let mut seen = HashSet::new();
        for id in self.identifiers() {
            if !seen.insert(id) {
                return Err(DomainError::constraint(format!(
                    "duplicate identifier {}",
                    id
                )));
            }
        }
        Ok(())
    }
}

//! Character factory: the entry point for making and loading characters.
//!
//! `make` builds a fresh character from a game-system template. `migrate`
//! brings a stored document of any supported schema up to date, and is
//! fail-open: a document that cannot be upgraded comes back untouched,
//! tagged with the reason, instead of as an error. A document already at the
//! latest schema also comes back untouched, unknown keys included.

use std::sync::Arc;

use serde_json::Value;

use crate::character::{Block, BlockType, Character, LATEST_VERSION};
use crate::clock::{unix_now, ClockPort, SystemClock};
use crate::ids::CharacterId;
use crate::migration::{migrate_versioned, MigrationError, SchemaVersion, VersionedCharacter};
use crate::templates::CharacterType;

/// Result of [`CharacterFactory::migrate`].
#[derive(Debug)]
pub enum MigrationOutcome {
    /// The document was upgraded from an older schema.
    Migrated(Character),
    /// The document was already current. `original` is what the caller
    /// passed in; `character` is its typed view.
    Current {
        character: Character,
        original: Value,
    },
    /// The document could not be upgraded and is handed back unchanged.
    /// Consumers must not assume it follows any particular schema.
    Unmigrated {
        original: Value,
        reason: MigrationError,
    },
}

impl MigrationOutcome {
    /// Whether the result follows the latest schema.
    pub fn is_migrated(&self) -> bool {
        !matches!(self, MigrationOutcome::Unmigrated { .. })
    }

    pub fn character(&self) -> Option<&Character> {
        match self {
            MigrationOutcome::Migrated(character)
            | MigrationOutcome::Current { character, .. } => Some(character),
            MigrationOutcome::Unmigrated { .. } => None,
        }
    }

    pub fn into_character(self) -> Result<Character, MigrationError> {
        match self {
            MigrationOutcome::Migrated(character)
            | MigrationOutcome::Current { character, .. } => Ok(character),
            MigrationOutcome::Unmigrated { reason, .. } => Err(reason),
        }
    }

    /// The document to hand back to the caller. Only upgraded documents are
    /// re-serialized; current and failed ones are returned as given.
    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        match self {
            MigrationOutcome::Migrated(character) => serde_json::to_value(character),
            MigrationOutcome::Current { original, .. }
            | MigrationOutcome::Unmigrated { original, .. } => Ok(original),
        }
    }
}

pub struct CharacterFactory {
    clock: Arc<dyn ClockPort>,
}

impl Default for CharacterFactory {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }
}

impl CharacterFactory {
    pub const LATEST_VERSION: u32 = LATEST_VERSION;

    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    /// Build a new character for the given game system.
    ///
    /// The template's skeleton is kept; `id`, `name` and `lastUpdated` are
    /// overwritten with a fresh id, an empty name and the current time.
    pub fn make(&self, character_type: CharacterType) -> Character {
        let skeleton = character_type.template();
        let character = Character {
            id: CharacterId::generate(),
            name: String::new(),
            last_updated: unix_now(self.clock.as_ref()),
            ..skeleton
        };
        tracing::debug!(
            character_id = %character.id,
            character_type = %character_type,
            "Made character from template"
        );
        character
    }

    /// Bring a stored document of unknown schema up to date.
    ///
    /// Never fails: when any stage cannot process the document, the failure
    /// is logged and the original document is returned as
    /// [`MigrationOutcome::Unmigrated`]. A legacy document without
    /// `lastUpdated` is stamped with the current time.
    pub fn migrate(&self, document: &Value) -> MigrationOutcome {
        let migrated = VersionedCharacter::from_document(document).and_then(|versioned| {
            let from_version = versioned.version();
            let stamped = versioned.stamp_missing_last_updated(unix_now(self.clock.as_ref()));
            migrate_versioned(stamped).map(|character| (from_version, character))
        });

        match migrated {
            Ok((SchemaVersion::LATEST, character)) => MigrationOutcome::Current {
                character,
                original: document.clone(),
            },
            Ok((from_version, character)) => {
                tracing::debug!(
                    character_id = %character.id,
                    %from_version,
                    "Character document migrated"
                );
                MigrationOutcome::Migrated(character)
            }
            Err(reason) => {
                tracing::warn!(
                    error = %reason,
                    document_id = ?document.get("id"),
                    "Character migration failed, returning original document"
                );
                MigrationOutcome::Unmigrated {
                    original: document.clone(),
                    reason,
                }
            }
        }
    }

    pub fn make_block(block_type: BlockType) -> Block {
        Block::new(block_type)
    }

    pub fn duplicate_block(block: &Block) -> Block {
        block.duplicate()
    }
}

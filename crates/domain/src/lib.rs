//! Fatesheet domain: the character document model and its schema migrations.
//!
//! - [`character`]: the current page/section/block tree and its edits
//! - [`templates`]: one skeleton factory per supported game system
//! - [`migration`]: the schema 1 → 2 → 3 upgrade chain
//! - [`factory`]: `make` / `migrate` entry points

pub mod character;
pub mod clock;
pub mod error;
pub mod factory;
pub mod ids;
pub mod migration;
pub mod templates;

pub use character::{
    Block, BlockContent, BlockType, Character, CheckableMeta, Page, PointCounterMeta, Position,
    Section, Slot, SlotTrackerMeta, LATEST_VERSION,
};
pub use clock::{ClockPort, FixedClock, SystemClock};
pub use error::DomainError;
pub use factory::{CharacterFactory, MigrationOutcome};
pub use ids::{generate_id, BlockId, CharacterId, PageId, SectionId};
pub use migration::{migrate_document, MigrationError, SchemaVersion, VersionedCharacter};
pub use templates::CharacterType;

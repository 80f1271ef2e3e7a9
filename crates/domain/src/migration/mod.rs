//! Schema migration engine.
//!
//! Saved documents come in three shapes. A document is classified by its
//! `version` tag into a [`VersionedCharacter`], then walked through two
//! stages. Each stage upgrades exactly one version and passes every other
//! version through, so the full chain is safe to run on any document,
//! including one that is already current.
//!
//! The engine only borrows the caller's document. Stages build new values,
//! so a failure anywhere leaves the original available for the fail-open
//! fallback in [`crate::factory::CharacterFactory::migrate`]. Stages do not
//! log; the factory reports failures once, at the boundary.

pub mod legacy;
mod v1_to_v2;
mod v2_to_v3;

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::character::{Character, LATEST_VERSION};

pub use legacy::{
    LegacyCharacter, LegacyEntry, LegacyStressTrack, LegacyV1Character, LegacyV2Character,
    StressBox,
};
pub use v1_to_v2::migrate_v1_to_v2;
pub use v2_to_v3::migrate_v2_to_v3;

/// Every schema version a document may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaVersion {
    V1 = 1,
    V2 = 2,
    V3 = 3,
}

impl SchemaVersion {
    pub const OLDEST: SchemaVersion = SchemaVersion::V1;
    pub const LATEST: SchemaVersion = SchemaVersion::V3;

    pub fn as_u32(&self) -> u32 {
        *self as u32
    }
}

impl TryFrom<u64> for SchemaVersion {
    type Error = MigrationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SchemaVersion::V1),
            2 => Ok(SchemaVersion::V2),
            3 => Ok(SchemaVersion::V3),
            other => Err(MigrationError::UnsupportedVersion(other)),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u32())
    }
}

/// Why a document could not be brought to the latest schema.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("Document has no version tag")]
    MissingVersion,

    #[error("Invalid version tag: {0}")]
    InvalidVersion(String),

    #[error("Unsupported schema version {0}")]
    UnsupportedVersion(u64),

    #[error("Malformed {version} document: {source}")]
    Malformed {
        version: SchemaVersion,
        #[source]
        source: serde_json::Error,
    },

    #[error("Migration stopped at {0}")]
    Incomplete(SchemaVersion),
}

/// A loaded document, typed by the schema it claims.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedCharacter {
    V1(LegacyV1Character),
    V2(LegacyV2Character),
    V3(Character),
}

impl VersionedCharacter {
    /// Read the `version` tag and parse the document as that schema.
    /// The document itself is never modified.
    pub fn from_document(document: &Value) -> Result<Self, MigrationError> {
        let object = document.as_object().ok_or(MigrationError::NotAnObject)?;
        let tag = object
            .get("version")
            .ok_or(MigrationError::MissingVersion)?;
        let version = tag
            .as_u64()
            .ok_or_else(|| MigrationError::InvalidVersion(tag.to_string()))
            .and_then(SchemaVersion::try_from)?;

        let malformed = |source| MigrationError::Malformed { version, source };
        let parsed = match version {
            SchemaVersion::V1 => {
                VersionedCharacter::V1(LegacyV1Character::deserialize(document).map_err(malformed)?)
            }
            SchemaVersion::V2 => {
                VersionedCharacter::V2(LegacyV2Character::deserialize(document).map_err(malformed)?)
            }
            SchemaVersion::V3 => {
                VersionedCharacter::V3(Character::deserialize(document).map_err(malformed)?)
            }
        };
        Ok(parsed)
    }

    pub fn version(&self) -> SchemaVersion {
        match self {
            VersionedCharacter::V1(_) => SchemaVersion::V1,
            VersionedCharacter::V2(_) => SchemaVersion::V2,
            VersionedCharacter::V3(_) => SchemaVersion::V3,
        }
    }

    /// Fill a missing legacy `lastUpdated` with `now`. Current documents are
    /// left alone.
    pub fn stamp_missing_last_updated(self, now: i64) -> Self {
        match self {
            VersionedCharacter::V1(mut v1) => {
                v1.last_updated.get_or_insert(now);
                VersionedCharacter::V1(v1)
            }
            VersionedCharacter::V2(mut v2) => {
                v2.last_updated.get_or_insert(now);
                VersionedCharacter::V2(v2)
            }
            current => current,
        }
    }

    /// The current-schema character, if this document is already current.
    pub fn into_latest(self) -> Result<Character, MigrationError> {
        match self {
            VersionedCharacter::V3(character) => Ok(character),
            other => Err(MigrationError::Incomplete(other.version())),
        }
    }
}

/// Stage 1→2; other versions pass through.
pub fn upgrade_v1_to_v2(document: VersionedCharacter) -> VersionedCharacter {
    match document {
        VersionedCharacter::V1(v1) => VersionedCharacter::V2(migrate_v1_to_v2(&v1)),
        other => other,
    }
}

/// Stage 2→3; other versions pass through.
pub fn upgrade_v2_to_v3(document: VersionedCharacter) -> VersionedCharacter {
    match document {
        VersionedCharacter::V2(v2) => VersionedCharacter::V3(migrate_v2_to_v3(&v2)),
        other => other,
    }
}

/// Run the full chain on a loaded document.
///
/// # Errors
///
/// Returns a [`MigrationError`] when the document has no usable version tag
/// or does not match the shape its tag claims.
pub fn migrate_document(document: &Value) -> Result<Character, MigrationError> {
    migrate_versioned(VersionedCharacter::from_document(document)?)
}

/// Run the full chain on an already classified document.
pub fn migrate_versioned(versioned: VersionedCharacter) -> Result<Character, MigrationError> {
    let character = upgrade_v2_to_v3(upgrade_v1_to_v2(versioned)).into_latest()?;
    debug_assert_eq!(character.version, LATEST_VERSION);
    Ok(character)
}

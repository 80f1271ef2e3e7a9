//! Blocks, the polymorphic content units of a sheet.
//!
//! A block is `{ id, label, type, value, meta }` on the wire. The `type` tag
//! selects one of five content shapes; each variant of [`BlockContent`]
//! carries exactly the value/meta pair of its type, so a Skill can never hold
//! slot-tracker meta.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::DomainError;
use crate::ids::BlockId;

/// Discriminator of a block's content shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Text,
    RichText,
    Skill,
    PointCounter,
    SlotTracker,
}

impl BlockType {
    pub const ALL: [BlockType; 5] = [
        BlockType::Text,
        BlockType::RichText,
        BlockType::Skill,
        BlockType::PointCounter,
        BlockType::SlotTracker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "Text",
            BlockType::RichText => "RichText",
            BlockType::Skill => "Skill",
            BlockType::PointCounter => "PointCounter",
            BlockType::SlotTracker => "SlotTracker",
        }
    }

    /// Label given to freshly made blocks of this type.
    pub fn default_label(&self) -> &'static str {
        match self {
            BlockType::Text => "Text",
            BlockType::RichText => "Rich Text",
            BlockType::Skill => "Skill",
            BlockType::PointCounter => "Point Counter",
            BlockType::SlotTracker => "Slot Tracker",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown block type: {}", s)))
    }
}

/// Meta shared by Text and Skill blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckableMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCounterMeta {
    /// Kept as the stored JSON number, so `5`, `5.0` and `2.5` all survive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    #[serde(default)]
    pub is_main_point_counter: bool,
}

/// Slot trackers carry no meta, but the document still stores `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTrackerMeta {}

/// One checkable box of a slot tracker (a stress box in legacy documents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl Slot {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }

    /// Slot labelled with its 1-based position in the track.
    pub fn numbered(index: usize, checked: bool) -> Self {
        Self::new((index + 1).to_string(), checked)
    }

    /// `count` unchecked slots labelled "1".."count".
    pub fn track(count: usize) -> Vec<Slot> {
        (0..count).map(|i| Slot::numbered(i, false)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockContent {
    Text {
        value: String,
        #[serde(default)]
        meta: CheckableMeta,
    },
    RichText {
        value: String,
    },
    /// Rank is stored as text, e.g. "2".
    Skill {
        value: String,
        #[serde(default)]
        meta: CheckableMeta,
    },
    /// Count is stored as text, e.g. "3".
    PointCounter {
        value: String,
        #[serde(default)]
        meta: PointCounterMeta,
    },
    SlotTracker {
        value: Vec<Slot>,
        #[serde(default)]
        meta: SlotTrackerMeta,
    },
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Text { .. } => BlockType::Text,
            BlockContent::RichText { .. } => BlockType::RichText,
            BlockContent::Skill { .. } => BlockType::Skill,
            BlockContent::PointCounter { .. } => BlockType::PointCounter,
            BlockContent::SlotTracker { .. } => BlockType::SlotTracker,
        }
    }

    /// Default content of a freshly made block.
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockContent::Text {
                value: String::new(),
                meta: CheckableMeta::default(),
            },
            BlockType::RichText => BlockContent::RichText {
                value: String::new(),
            },
            BlockType::Skill => BlockContent::Skill {
                value: "0".to_string(),
                meta: CheckableMeta::default(),
            },
            BlockType::PointCounter => BlockContent::PointCounter {
                value: "0".to_string(),
                meta: PointCounterMeta::default(),
            },
            BlockType::SlotTracker => BlockContent::SlotTracker {
                value: Slot::track(1),
                meta: SlotTrackerMeta::default(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub label: String,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    /// A freshly identified block with the default shape for `block_type`.
    pub fn new(block_type: BlockType) -> Self {
        Self {
            id: BlockId::generate(),
            label: block_type.default_label().to_string(),
            content: BlockContent::default_for(block_type),
        }
    }

    pub fn with_content(label: impl Into<String>, content: BlockContent) -> Self {
        Self {
            id: BlockId::generate(),
            label: label.into(),
            content,
        }
    }

    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_content(
            label,
            BlockContent::Text {
                value: value.into(),
                meta: CheckableMeta::default(),
            },
        )
    }

    pub fn rich_text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_content(
            label,
            BlockContent::RichText {
                value: value.into(),
            },
        )
    }

    pub fn skill(label: impl Into<String>, rank: impl Into<String>) -> Self {
        Self::with_content(
            label,
            BlockContent::Skill {
                value: rank.into(),
                meta: CheckableMeta::default(),
            },
        )
    }

    pub fn point_counter(
        label: impl Into<String>,
        count: impl Into<String>,
        max: Option<i64>,
        is_main_point_counter: bool,
    ) -> Self {
        Self::with_content(
            label,
            BlockContent::PointCounter {
                value: count.into(),
                meta: PointCounterMeta {
                    max: max.map(Number::from),
                    is_main_point_counter,
                },
            },
        )
    }

    pub fn slot_tracker(label: impl Into<String>, slots: Vec<Slot>) -> Self {
        Self::with_content(
            label,
            BlockContent::SlotTracker {
                value: slots,
                meta: SlotTrackerMeta::default(),
            },
        )
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }

    /// Copy of this block under a fresh identifier; label and content are kept.
    pub fn duplicate(&self) -> Self {
        Self {
            id: BlockId::generate(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slot_tracker_defaults_to_one_unchecked_box() {
        let block = Block::new(BlockType::SlotTracker);
        assert_eq!(block.label, "Slot Tracker");
        match block.content {
            BlockContent::SlotTracker { value, .. } => {
                assert_eq!(value, vec![Slot::new("1", false)]);
            }
            other => panic!("expected slot tracker, got {:?}", other),
        }
    }

    #[test]
    fn point_counter_defaults_to_zero_and_not_main() {
        let block = Block::new(BlockType::PointCounter);
        match block.content {
            BlockContent::PointCounter { value, meta } => {
                assert_eq!(value, "0");
                assert!(!meta.is_main_point_counter);
                assert_eq!(meta.max, None);
            }
            other => panic!("expected point counter, got {:?}", other),
        }
    }

    #[test]
    fn every_block_type_makes_matching_content() {
        for block_type in BlockType::ALL {
            let block = Block::new(block_type);
            assert_eq!(block.block_type(), block_type);
            assert_eq!(block.label, block_type.default_label());
        }
    }

    #[test]
    fn skill_defaults_to_rank_zero() {
        let block = Block::new(BlockType::Skill);
        assert_eq!(
            block.content,
            BlockContent::Skill {
                value: "0".to_string(),
                meta: CheckableMeta::default()
            }
        );
    }

    #[test]
    fn made_blocks_get_distinct_ids() {
        let a = Block::new(BlockType::Text);
        let b = Block::new(BlockType::Text);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn duplicate_changes_only_the_id() {
        let source = Block::slot_tracker("Physical", vec![Slot::new("1", true), Slot::new("2", false)]);
        let first = source.duplicate();
        let second = source.duplicate();

        assert_ne!(first.id, source.id);
        assert_ne!(second.id, source.id);
        assert_ne!(first.id, second.id);
        assert_eq!(first.label, source.label);
        assert_eq!(first.content, source.content);
    }

    #[test]
    fn serializes_to_flat_tagged_shape() {
        let block = Block::point_counter("Fate Points", "3", Some(5), true);
        let value = serde_json::to_value(&block).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": block.id.as_str(),
                "label": "Fate Points",
                "type": "PointCounter",
                "value": "3",
                "meta": { "max": 5, "isMainPointCounter": true }
            })
        );
    }

    #[test]
    fn text_meta_omits_unset_checked() {
        let block = Block::text("High Concept", "Wizard PI");
        let value = serde_json::to_value(&block).expect("serialize");
        assert_eq!(value["meta"], json!({}));
    }

    #[test]
    fn deserializes_document_block_without_meta() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "label": "Notes",
            "type": "RichText",
            "value": "<b>hi</b>"
        }))
        .expect("rich text block");
        assert_eq!(block.block_type(), BlockType::RichText);
        assert_eq!(block.id.as_str(), "b1");
    }

    #[test]
    fn point_counter_max_accepts_any_json_number() {
        for max in [json!(5), json!(5.0), json!(2.5)] {
            let block: Block = serde_json::from_value(json!({
                "id": "b1",
                "label": "Fate Points",
                "type": "PointCounter",
                "value": "2",
                "meta": { "max": max.clone(), "isMainPointCounter": true }
            }))
            .expect("point counter block");
            let value = serde_json::to_value(&block).expect("serialize");
            assert_eq!(value["meta"]["max"], max);
        }
    }

    #[test]
    fn rejects_unknown_block_type_tag() {
        let result: Result<Block, _> = serde_json::from_value(json!({
            "id": "b1",
            "label": "Dice",
            "type": "DicePool",
            "value": "4dF"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn block_type_parses_from_tag() {
        assert_eq!("SlotTracker".parse::<BlockType>(), Ok(BlockType::SlotTracker));
        assert!(matches!(
            "slot".parse::<BlockType>(),
            Err(DomainError::Parse(_))
        ));
    }
}

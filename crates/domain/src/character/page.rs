use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::ids::PageId;

/// One sheet of the character: an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub label: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(label: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            id: PageId::generate(),
            label: label.into(),
            sections,
        }
    }
}

//! Sheet edits invoked by the rendering layer.
//!
//! Every edit borrows the character and returns an updated copy; the input
//! is never touched, so a caller can keep the previous value for undo.
//! Sections are stored in one list per page; "up" and "down" are relative to
//! the other sections sharing the same position column.

use super::block::{Block, BlockType};
use super::page::Page;
use super::section::{Position, Section};
use super::Character;
use crate::error::DomainError;
use crate::ids::{BlockId, SectionId};

impl Character {
    fn locate_section(&self, section_id: &SectionId) -> Result<(usize, usize), DomainError> {
        self.pages
            .iter()
            .enumerate()
            .find_map(|(page_index, page)| {
                page.sections
                    .iter()
                    .position(|section| &section.id == section_id)
                    .map(|section_index| (page_index, section_index))
            })
            .ok_or_else(|| DomainError::not_found("Section", section_id.as_str()))
    }

    fn locate_block(&self, block_id: &BlockId) -> Result<(usize, usize, usize), DomainError> {
        for (page_index, page) in self.pages.iter().enumerate() {
            for (section_index, section) in page.sections.iter().enumerate() {
                if let Some(block_index) = section.blocks.iter().position(|b| &b.id == block_id) {
                    return Ok((page_index, section_index, block_index));
                }
            }
        }
        Err(DomainError::not_found("Block", block_id.as_str()))
    }

    fn check_page_index(&self, page_index: usize) -> Result<(), DomainError> {
        if page_index >= self.pages.len() {
            return Err(DomainError::validation(format!(
                "page index {} out of range ({} pages)",
                page_index,
                self.pages.len()
            )));
        }
        Ok(())
    }

    fn edit_section(
        &self,
        section_id: &SectionId,
        edit: impl FnOnce(&mut Section),
    ) -> Result<Character, DomainError> {
        let (page_index, section_index) = self.locate_section(section_id)?;
        let mut updated = self.clone();
        edit(&mut updated.pages[page_index].sections[section_index]);
        Ok(updated)
    }

    pub fn remove_section(&self, section_id: &SectionId) -> Result<Character, DomainError> {
        let (page_index, section_index) = self.locate_section(section_id)?;
        let mut updated = self.clone();
        updated.pages[page_index].sections.remove(section_index);
        Ok(updated)
    }

    /// Swap with the nearest earlier section in the same column.
    /// No-op when the section already leads its column.
    pub fn move_section_up(&self, section_id: &SectionId) -> Result<Character, DomainError> {
        let (page_index, section_index) = self.locate_section(section_id)?;
        let sections = &self.pages[page_index].sections;
        let position = sections[section_index].position;
        let neighbour = sections[..section_index]
            .iter()
            .rposition(|section| section.position == position);

        let mut updated = self.clone();
        if let Some(neighbour) = neighbour {
            updated.pages[page_index]
                .sections
                .swap(neighbour, section_index);
        }
        Ok(updated)
    }

    /// Swap with the nearest later section in the same column.
    /// No-op when the section already ends its column.
    pub fn move_section_down(&self, section_id: &SectionId) -> Result<Character, DomainError> {
        let (page_index, section_index) = self.locate_section(section_id)?;
        let sections = &self.pages[page_index].sections;
        let position = sections[section_index].position;
        let neighbour = sections[section_index + 1..]
            .iter()
            .position(|section| section.position == position)
            .map(|offset| section_index + 1 + offset);

        let mut updated = self.clone();
        if let Some(neighbour) = neighbour {
            updated.pages[page_index]
                .sections
                .swap(section_index, neighbour);
        }
        Ok(updated)
    }

    pub fn reposition_section(
        &self,
        section_id: &SectionId,
        position: Position,
    ) -> Result<Character, DomainError> {
        self.edit_section(section_id, |section| section.position = position)
    }

    pub fn move_section_to_opposite_column(
        &self,
        section_id: &SectionId,
    ) -> Result<Character, DomainError> {
        self.edit_section(section_id, |section| {
            section.position = section.position.opposite()
        })
    }

    /// Move the section to the end of another page. Moving onto the page that
    /// already holds it leaves the character unchanged.
    pub fn move_section_to_page(
        &self,
        section_id: &SectionId,
        page_index: usize,
    ) -> Result<Character, DomainError> {
        self.check_page_index(page_index)?;
        let (from_page, section_index) = self.locate_section(section_id)?;

        let mut updated = self.clone();
        if from_page != page_index {
            let section = updated.pages[from_page].sections.remove(section_index);
            updated.pages[page_index].sections.push(section);
        }
        Ok(updated)
    }

    pub fn rename_section(
        &self,
        section_id: &SectionId,
        label: impl Into<String>,
    ) -> Result<Character, DomainError> {
        let label = label.into();
        self.edit_section(section_id, |section| section.label = label)
    }

    pub fn toggle_section_visible_on_card(
        &self,
        section_id: &SectionId,
    ) -> Result<Character, DomainError> {
        self.edit_section(section_id, |section| {
            section.visible_on_card = Some(!section.is_visible_on_card())
        })
    }

    /// Append an empty section to a page.
    pub fn add_section(
        &self,
        page_index: usize,
        label: impl Into<String>,
        position: Position,
    ) -> Result<Character, DomainError> {
        self.check_page_index(page_index)?;
        let mut updated = self.clone();
        updated.pages[page_index]
            .sections
            .push(Section::new(label, position));
        Ok(updated)
    }

    pub fn add_page(&self, label: impl Into<String>) -> Character {
        let mut updated = self.clone();
        updated.pages.push(Page::new(label, Vec::new()));
        updated
    }

    /// Append a default block of `block_type` to the section.
    pub fn add_block(
        &self,
        section_id: &SectionId,
        block_type: BlockType,
    ) -> Result<Character, DomainError> {
        self.edit_section(section_id, |section| {
            section.blocks.push(Block::new(block_type))
        })
    }

    /// Insert a copy of the block directly after it, under a fresh id.
    pub fn duplicate_block(&self, block_id: &BlockId) -> Result<Character, DomainError> {
        let (page_index, section_index, block_index) = self.locate_block(block_id)?;
        let mut updated = self.clone();
        let blocks = &mut updated.pages[page_index].sections[section_index].blocks;
        let copy = blocks[block_index].duplicate();
        blocks.insert(block_index + 1, copy);
        Ok(updated)
    }

    pub fn remove_block(&self, block_id: &BlockId) -> Result<Character, DomainError> {
        let (page_index, section_index, block_index) = self.locate_block(block_id)?;
        let mut updated = self.clone();
        updated.pages[page_index].sections[section_index]
            .blocks
            .remove(block_index);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Slot;

    /// Left: A, B, C interleaved with Right: X, Y.
    fn sheet() -> Character {
        let sections = vec![
            Section::new("A", Position::Left),
            Section::new("X", Position::Right),
            Section::new("B", Position::Left)
                .with_blocks(vec![Block::slot_tracker("Physical", Slot::track(2))]),
            Section::new("Y", Position::Right),
            Section::new("C", Position::Left),
        ];
        Character::new(
            "Edit Test",
            0,
            vec![Page::new("Character", sections), Page::new("Extras", Vec::new())],
        )
    }

    fn labels(character: &Character, page_index: usize) -> Vec<&str> {
        character.pages[page_index]
            .sections
            .iter()
            .map(|section| section.label.as_str())
            .collect()
    }

    fn section_id(character: &Character, label: &str) -> SectionId {
        character
            .sections()
            .find(|section| section.label == label)
            .map(|section| section.id.clone())
            .expect("section exists")
    }

    #[test]
    fn remove_section_leaves_input_intact() {
        let original = sheet();
        let id = section_id(&original, "B");
        let updated = original.remove_section(&id).expect("remove");

        assert_eq!(labels(&updated, 0), vec!["A", "X", "Y", "C"]);
        assert_eq!(labels(&original, 0), vec!["A", "X", "B", "Y", "C"]);
    }

    #[test]
    fn move_up_skips_other_column() {
        let original = sheet();
        let updated = original
            .move_section_up(&section_id(&original, "C"))
            .expect("move up");
        assert_eq!(labels(&updated, 0), vec!["A", "X", "C", "Y", "B"]);
    }

    #[test]
    fn move_up_at_column_top_is_noop() {
        let original = sheet();
        let updated = original
            .move_section_up(&section_id(&original, "X"))
            .expect("move up");
        assert_eq!(updated, original);
    }

    #[test]
    fn move_down_skips_other_column() {
        let original = sheet();
        let updated = original
            .move_section_down(&section_id(&original, "X"))
            .expect("move down");
        assert_eq!(labels(&updated, 0), vec!["A", "Y", "B", "X", "C"]);
    }

    #[test]
    fn move_down_at_column_bottom_is_noop() {
        let original = sheet();
        let updated = original
            .move_section_down(&section_id(&original, "C"))
            .expect("move down");
        assert_eq!(updated, original);
    }

    #[test]
    fn opposite_column_flips_position() {
        let original = sheet();
        let id = section_id(&original, "A");
        let updated = original
            .move_section_to_opposite_column(&id)
            .expect("flip");
        assert_eq!(
            updated.find_section(&id).map(|s| s.position),
            Some(Position::Right)
        );

        let back = updated
            .reposition_section(&id, Position::Left)
            .expect("reposition");
        assert_eq!(back, original);
    }

    #[test]
    fn move_to_page_appends_to_target() {
        let original = sheet();
        let id = section_id(&original, "B");
        let updated = original.move_section_to_page(&id, 1).expect("move");

        assert_eq!(labels(&updated, 0), vec!["A", "X", "Y", "C"]);
        assert_eq!(labels(&updated, 1), vec!["B"]);
        assert!(updated.validate().is_ok());
    }

    #[test]
    fn move_to_missing_page_is_rejected() {
        let original = sheet();
        let id = section_id(&original, "B");
        assert!(matches!(
            original.move_section_to_page(&id, 7),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn move_to_own_page_is_noop() {
        let original = sheet();
        let id = section_id(&original, "B");
        assert_eq!(original.move_section_to_page(&id, 0), Ok(original.clone()));
    }

    #[test]
    fn rename_and_toggle_card_visibility() {
        let original = sheet();
        let id = section_id(&original, "A");
        let updated = original
            .rename_section(&id, "Aspects")
            .and_then(|c| c.toggle_section_visible_on_card(&id))
            .expect("edit");

        let section = updated.find_section(&id).expect("section");
        assert_eq!(section.label, "Aspects");
        assert!(section.is_visible_on_card());

        let toggled_back = updated
            .toggle_section_visible_on_card(&id)
            .expect("toggle");
        assert_eq!(toggled_back.find_section(&id).map(|s| s.is_visible_on_card()), Some(false));
    }

    #[test]
    fn unknown_section_is_not_found() {
        let original = sheet();
        let missing = SectionId::generate();
        assert!(matches!(
            original.remove_section(&missing),
            Err(DomainError::NotFound { entity_type: "Section", .. })
        ));
    }

    #[test]
    fn add_section_and_page() {
        let original = sheet().add_page("Notes");
        assert_eq!(original.pages.len(), 3);

        let updated = original
            .add_section(2, "Journal", Position::Left)
            .expect("add section");
        assert_eq!(labels(&updated, 2), vec!["Journal"]);
        assert!(original.add_section(3, "Nope", Position::Left).is_err());
        assert!(updated.validate().is_ok());
    }

    #[test]
    fn add_block_appends_default_block() {
        let original = sheet();
        let id = section_id(&original, "A");
        let updated = original.add_block(&id, BlockType::PointCounter).expect("add");
        let section = updated.find_section(&id).expect("section");
        assert_eq!(section.blocks.len(), 1);
        assert_eq!(section.blocks[0].block_type(), BlockType::PointCounter);
    }

    #[test]
    fn duplicate_block_inserts_after_source_with_fresh_id() {
        let original = sheet();
        let source = original.blocks().next().cloned().expect("block");
        let updated = original.duplicate_block(&source.id).expect("duplicate");

        let section = updated
            .find_section(&section_id(&updated, "B"))
            .expect("section");
        assert_eq!(section.blocks.len(), 2);
        assert_eq!(section.blocks[0], source);
        assert_ne!(section.blocks[1].id, source.id);
        assert_eq!(section.blocks[1].content, source.content);
        assert!(updated.validate().is_ok());
    }

    #[test]
    fn remove_block_by_id() {
        let original = sheet();
        let source = original.blocks().next().cloned().expect("block");
        let updated = original.remove_block(&source.id).expect("remove");
        assert_eq!(updated.blocks().count(), 0);
        assert!(matches!(
            updated.remove_block(&source.id),
            Err(DomainError::NotFound { entity_type: "Block", .. })
        ));
    }
}

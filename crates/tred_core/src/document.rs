//! Plain-text document with paragraph blocks.
//!
//! Offsets are counted in `char`s. A block is one `\n`-separated paragraph;
//! the separator belongs to the block it terminates, so every offset from
//! `0` to `char_len()` inclusive resolves to exactly one block. An empty
//! document still has one empty block.

use std::ops::Range;

use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub number: usize,
    /// Offset of the first char of the block in the document.
    pub position: usize,
    /// Chars in the block, separator excluded.
    pub len: usize,
}

impl Block {
    pub fn contains(&self, position: usize) -> bool {
        position >= self.position && position <= self.position + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockSpan {
    position: usize,
    len: usize,
    byte_start: usize,
    byte_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    char_len: usize,
    blocks: Vec<BlockSpan>,
    dirty: Vec<Range<usize>>,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDocument {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        let mut doc = Self {
            text: String::new(),
            char_len: 0,
            blocks: Vec::new(),
            dirty: Vec::new(),
        };
        doc.set_plain_text(text);
        doc.dirty.clear();
        doc
    }

    pub fn plain_text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the whole content and relayouts every block.
    pub fn set_plain_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.relayout();
        self.mark_contents_dirty(0, self.char_len);
    }

    /// Replaces `[position, position + length)` with `replacement`.
    /// Ranges reaching past the end are rejected and leave the text as is.
    pub fn replace_range(
        &mut self,
        position: usize,
        length: usize,
        replacement: &str,
    ) -> Result<(), PanelError> {
        let end = self.checked_end(position, length)?;
        let start_byte = self.byte_offset(position);
        let end_byte = self.byte_offset(end);
        self.text.replace_range(start_byte..end_byte, replacement);
        self.relayout();
        self.mark_contents_dirty(position, self.char_len - position);
        Ok(())
    }

    /// Returns the end of `[position, position + length)` if it lies inside
    /// the document.
    pub fn checked_end(&self, position: usize, length: usize) -> Result<usize, PanelError> {
        position
            .checked_add(length)
            .filter(|end| *end <= self.char_len)
            .ok_or(PanelError::InvalidRange {
                position,
                length,
                text_len: self.char_len,
            })
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, number: usize) -> Option<Block> {
        self.blocks.get(number).map(|span| Block {
            number,
            position: span.position,
            len: span.len,
        })
    }

    pub fn block_text(&self, number: usize) -> Option<&str> {
        let span = self.blocks.get(number)?;
        self.text.get(span.byte_start..span.byte_start + span.byte_len)
    }

    /// Block holding `position`, or `None` past the end of the document.
    pub fn find_block(&self, position: usize) -> Option<Block> {
        if position > self.char_len {
            return None;
        }
        let number = self
            .blocks
            .partition_point(|span| span.position <= position)
            .saturating_sub(1);
        self.block(number)
    }

    /// Byte offset of the char at `position`, clamped to the text length.
    pub fn byte_offset(&self, position: usize) -> usize {
        self.text
            .char_indices()
            .nth(position)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    pub fn mark_contents_dirty(&mut self, position: usize, length: usize) {
        self.dirty.push(position..position + length);
    }

    pub fn mark_block_dirty(&mut self, number: usize) {
        if let Some(block) = self.block(number) {
            self.mark_contents_dirty(block.position, block.len + 1);
        }
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Char ranges that need repainting since the last call.
    pub fn take_dirty(&mut self) -> Vec<Range<usize>> {
        std::mem::take(&mut self.dirty)
    }

    fn relayout(&mut self) {
        self.blocks.clear();
        let mut position = 0usize;
        let mut byte_start = 0usize;
        for line in self.text.split('\n') {
            let len = line.chars().count();
            self.blocks.push(BlockSpan {
                position,
                len,
                byte_start,
                byte_len: line.len(),
            });
            position += len + 1;
            byte_start += line.len() + 1;
        }
        self.char_len = position.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn t_doc_001_empty_document_has_one_block() {
        let doc = TextDocument::new();
        assert_eq!(doc.block_count(), 1);
        assert_eq!(
            doc.find_block(0),
            Some(Block {
                number: 0,
                position: 0,
                len: 0
            })
        );
        assert_eq!(doc.find_block(1), None);
    }

    #[test]
    fn t_doc_002_find_block_across_paragraphs() {
        let doc = TextDocument::from_text("ab\ncdé\n\nf");
        assert_eq!(doc.block_count(), 4);
        assert_eq!(doc.char_len(), 9);
        assert_eq!(doc.find_block(2).map(|b| b.number), Some(0));
        assert_eq!(doc.find_block(3).map(|b| b.number), Some(1));
        assert_eq!(doc.find_block(6).map(|b| b.number), Some(1));
        assert_eq!(doc.find_block(7).map(|b| b.number), Some(2));
        assert_eq!(doc.find_block(8).map(|b| b.number), Some(3));
        assert_eq!(doc.block_text(1), Some("cdé"));
        assert_eq!(doc.block_text(2), Some(""));
    }

    #[test]
    fn t_doc_003_replace_range_and_insert() {
        let mut doc = TextDocument::from_text("abcdef");
        doc.replace_range(2, 3, "XY").expect("replace");
        assert_eq!(doc.plain_text(), "abXYf");
        doc.replace_range(0, 0, ">").expect("insert");
        assert_eq!(doc.plain_text(), ">abXYf");
        doc.replace_range(6, 0, "\nz").expect("append");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.block_text(1), Some("z"));
    }

    #[test]
    fn t_doc_004_replace_out_of_range_is_rejected() {
        let mut doc = TextDocument::from_text("abc");
        let err = doc.replace_range(2, 5, "x").expect_err("reject");
        assert_eq!(
            err,
            PanelError::InvalidRange {
                position: 2,
                length: 5,
                text_len: 3
            }
        );
        assert_eq!(doc.plain_text(), "abc");
        assert!(doc.replace_range(usize::MAX, 1, "x").is_err());
    }

    #[test]
    fn t_doc_005_multibyte_offsets_are_chars() {
        let mut doc = TextDocument::from_text("こんにちは世界");
        doc.replace_range(5, 2, "world").expect("replace");
        assert_eq!(doc.plain_text(), "こんにちはworld");
    }

    #[test]
    fn t_doc_006_dirty_ranges_drain() {
        let mut doc = TextDocument::from_text("one\ntwo");
        assert!(doc.take_dirty().is_empty());
        doc.mark_block_dirty(1);
        assert_eq!(doc.dirty_count(), 1);
        assert_eq!(doc.take_dirty(), vec![4..8]);
        assert_eq!(doc.dirty_count(), 0);
    }

    proptest! {
        #[test]
        fn t_doc_007_every_offset_maps_into_its_block(text in "[a-c\n]{0,24}") {
            let doc = TextDocument::from_text(&text);
            prop_assert_eq!(doc.char_len(), text.chars().count());
            for position in 0..=doc.char_len() {
                let block = doc.find_block(position).expect("block");
                prop_assert!(block.contains(position));
            }
        }
    }
}

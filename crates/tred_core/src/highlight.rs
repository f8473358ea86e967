use std::ops::Range;

use tracing::trace;

use crate::appearance::Rgb;
use crate::document::TextDocument;
use crate::error::PanelError;
use crate::field::FieldId;

/// A rendered search highlight, anchored to a block of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    pub block: usize,
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    pub bold: bool,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            bold: true,
            foreground: Rgb::WHITE,
            background: Rgb::DARK_MAGENTA,
        }
    }
}

/// Holds at most one highlight run for the panel that owns `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    field: FieldId,
    current: Option<HighlightRange>,
    style: HighlightStyle,
}

impl Highlighter {
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            current: None,
            style: HighlightStyle::default(),
        }
    }

    pub fn current(&self) -> Option<HighlightRange> {
        self.current
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Handles one broadcast search-match event. Events for other fields,
    /// or without a position, clear this panel's run.
    pub fn route(
        &mut self,
        doc: &mut TextDocument,
        field: FieldId,
        position: Option<usize>,
        length: usize,
    ) -> Result<(), PanelError> {
        let position = match position {
            Some(position) if field == self.field => position,
            _ => {
                self.clear(doc);
                return Ok(());
            }
        };
        doc.checked_end(position, length)?;
        let block = doc.find_block(position).ok_or(PanelError::InvalidRange {
            position,
            length,
            text_len: doc.char_len(),
        })?;
        self.clear(doc);
        let range = HighlightRange {
            block: block.number,
            offset: position - block.position,
            length,
        };
        trace!(field = %self.field, ?range, "highlight search match");
        self.current = Some(range);
        doc.mark_block_dirty(block.number);
        Ok(())
    }

    pub fn clear(&mut self, doc: &mut TextDocument) {
        if let Some(previous) = self.current.take() {
            trace!(field = %self.field, block = previous.block, "clear highlight");
            doc.mark_block_dirty(previous.block);
        }
    }

    /// Char range of the run in `doc`, cut at the end of its block.
    pub fn visible_run(&self, doc: &TextDocument) -> Option<Range<usize>> {
        let range = self.current?;
        let block = doc.block(range.block)?;
        if range.offset > block.len {
            return None;
        }
        let start = block.position + range.offset;
        let end = start + range.length.min(block.len - range.offset);
        Some(start..end)
    }
}

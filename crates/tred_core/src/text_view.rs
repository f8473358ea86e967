use std::ops::Range;

use tracing::{debug, warn};

use crate::document::TextDocument;
use crate::error::PanelError;
use crate::event::PanelEvent;
use crate::field::FieldId;
use crate::highlight::{HighlightRange, Highlighter};
use crate::panel::SearchTarget;

/// Source or target text panel, the comment dock's sibling in the search
/// protocol.
pub struct TextPanel {
    field: FieldId,
    editor: TextDocument,
    highlighter: Highlighter,
    modified: bool,
    events: Vec<PanelEvent>,
}

impl TextPanel {
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            editor: TextDocument::new(),
            highlighter: Highlighter::new(field),
            modified: false,
            events: Vec::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.editor.set_plain_text(text);
        self.modified = false;
    }

    pub fn text(&self) -> &str {
        self.editor.plain_text()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn highlight_run(&self) -> Option<Range<usize>> {
        self.highlighter.visible_run(&self.editor)
    }

    pub fn document(&self) -> &TextDocument {
        &self.editor
    }

    pub fn take_repaint(&mut self) -> Vec<Range<usize>> {
        self.editor.take_dirty()
    }
}

impl SearchTarget for TextPanel {
    fn field(&self) -> FieldId {
        self.field
    }

    fn highlight_search_match(
        &mut self,
        field: FieldId,
        position: Option<usize>,
        length: usize,
    ) -> Result<(), PanelError> {
        // A clear aimed at another field leaves this panel's match in place.
        if position.is_none() && field != self.field {
            return Ok(());
        }
        self.highlighter
            .route(&mut self.editor, field, position, length)
            .inspect_err(|err| warn!(field = %self.field, %err, "highlight rejected"))
    }

    fn replace_text(
        &mut self,
        field: FieldId,
        position: usize,
        length: usize,
        replacement: &str,
    ) -> Result<(), PanelError> {
        if field != self.field {
            return Ok(());
        }
        self.editor.replace_range(position, length, replacement)?;
        self.modified = true;
        debug!(field = %self.field, "text replaced");
        self.events.push(PanelEvent::TextChanged {
            field: self.field,
            text: self.editor.plain_text().to_string(),
        });
        Ok(())
    }

    fn highlight_range(&self) -> Option<HighlightRange> {
        self.highlighter.current()
    }

    fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }
}

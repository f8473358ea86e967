use tracing::trace;
use tred_core::appearance::CommentSettings;
use tred_core::event::PanelEvent;
use tred_core::highlight::HighlightRange;
use tred_core::panel::SearchTarget;

use crate::actions::{dispatch, HostAction};
use crate::error::DriverError;
use crate::state::{Catalog, EditorState};

pub struct EditorDriver {
    state: EditorState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub unit_count: usize,
    pub selected: Option<usize>,
    pub source_text: String,
    pub target_text: String,
    pub comment_text: String,
    pub comment_enabled: bool,
    pub comment_modified: bool,
    pub location_visible: bool,
    pub location_text: String,
    pub source_highlight: Option<HighlightRange>,
    pub target_highlight: Option<HighlightRange>,
    pub comment_highlight: Option<HighlightRange>,
    pub comment_dock_shown: bool,
    pub dirty: bool,
    pub status: String,
}

impl Default for EditorDriver {
    fn default() -> Self {
        Self::new(Catalog::default(), &CommentSettings::default())
    }
}

impl EditorDriver {
    pub fn new(catalog: Catalog, settings: &CommentSettings) -> Self {
        Self {
            state: EditorState::new(catalog, settings),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: HostAction) -> Result<(), DriverError> {
        dispatch(&mut self.state, action)
    }

    /// Panel notifications the host received since the last call.
    pub fn take_received(&mut self) -> Vec<PanelEvent> {
        self.state.take_received()
    }

    /// Drains the per-frame buffers: repaint ranges of every panel and the
    /// host's received events. Returns whether anything needs repainting.
    pub fn end_frame(&mut self) -> bool {
        let mut repaint = self.state.comment.borrow_mut().take_repaint();
        repaint.extend(self.state.source.borrow_mut().take_repaint());
        repaint.extend(self.state.target.borrow_mut().take_repaint());
        for event in self.take_received() {
            trace!(?event, "panel event handled");
        }
        !repaint.is_empty()
    }

    /// Repaint ranges and received events still held since the last frame.
    pub fn pending_buffers(&self) -> usize {
        self.state.comment.borrow().document().dirty_count()
            + self.state.source.borrow().document().dirty_count()
            + self.state.target.borrow().document().dirty_count()
            + self.state.host.borrow().received.len()
    }

    pub fn unit_labels(&self) -> Vec<String> {
        (0..self.state.catalog.len())
            .filter_map(|index| self.state.catalog.label(index))
            .collect()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let comment = self.state.comment.borrow();
        let source = self.state.source.borrow();
        let target = self.state.target.borrow();
        let host = self.state.host.borrow();

        EditorSnapshot {
            unit_count: self.state.catalog.len(),
            selected: host.selected,
            source_text: source.text().to_string(),
            target_text: target.text().to_string(),
            comment_text: comment.text().to_string(),
            comment_enabled: comment.is_editor_enabled(),
            comment_modified: comment.is_modified(),
            location_visible: comment.location().is_visible(),
            location_text: comment.location().text().to_string(),
            source_highlight: source.highlight_range(),
            target_highlight: target.highlight_range(),
            comment_highlight: comment.highlight_range(),
            comment_dock_shown: host.comment_dock_shown,
            dirty: host.dirty,
            status: host.status.clone(),
        }
    }
}

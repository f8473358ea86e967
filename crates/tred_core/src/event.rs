use crate::field::FieldId;

/// "This field matched a search" broadcast. `position: None` clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub field: FieldId,
    pub position: Option<usize>,
    pub length: usize,
}

impl SearchMatch {
    pub fn at(field: FieldId, position: usize, length: usize) -> Self {
        Self {
            field,
            position: Some(position),
            length,
        }
    }

    pub fn clear(field: FieldId) -> Self {
        Self {
            field,
            position: None,
            length: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceRequest {
    pub field: FieldId,
    pub position: usize,
    pub length: usize,
    pub text: String,
}

/// Notifications panels hand back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Full comment text after a deliberate modified check.
    CommentChanged(String),
    /// The document needs saving; fired on every raw text change.
    ReadyForSave(bool),
    /// The comment dock was shown or hidden.
    VisibilityChanged(bool),
    /// A source or target panel's text was replaced.
    TextChanged { field: FieldId, text: String },
}

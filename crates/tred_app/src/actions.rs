use tracing::debug;
use tred_core::appearance::CommentSettings;
use tred_core::event::{ReplaceRequest, SearchMatch};
use tred_core::field::FieldId;
use tred_core::search::{find_next, SearchScope};

use crate::error::DriverError;
use crate::state::EditorState;

pub enum HostAction {
    SelectUnit(Option<usize>),
    /// Broadcasts a search match to every panel.
    Highlight(SearchMatch),
    /// Broadcasts a replace request to every panel.
    Replace(ReplaceRequest),
    /// Finds the next occurrence in the active unit and highlights it.
    FindNext { query: String, scope: SearchScope },
    /// Keystroke-level edit in the comment editor.
    EditComment {
        position: usize,
        length: usize,
        text: String,
    },
    /// The comment widget now holds this text.
    SetCommentText(String),
    /// Focus left the comment editor.
    CommitComment,
    ApplySettings(CommentSettings),
    CloseCommentPanel,
    ShowCommentPanel,
    MarkSaved,
}

pub fn dispatch(state: &mut EditorState, action: HostAction) -> Result<(), DriverError> {
    match action {
        HostAction::SelectUnit(index) => {
            state.select_unit(index)?;
        }
        HostAction::Highlight(search) => {
            state.bus.search_match.publish(search);
        }
        HostAction::Replace(request) => {
            state.bus.replace_requested.publish(request);
        }
        HostAction::FindNext { query, scope } => {
            find_and_highlight(state, &query, scope);
        }
        HostAction::EditComment {
            position,
            length,
            text,
        } => {
            state
                .comment
                .borrow_mut()
                .apply_user_edit(position, length, &text)?;
        }
        HostAction::SetCommentText(text) => {
            state.comment.borrow_mut().set_user_text(&text);
        }
        HostAction::CommitComment => {
            state.comment.borrow_mut().check_modified();
        }
        HostAction::ApplySettings(settings) => {
            state.bus.settings_changed.publish(settings);
        }
        HostAction::CloseCommentPanel => {
            state.comment.borrow_mut().close();
        }
        HostAction::ShowCommentPanel => {
            state.comment.borrow_mut().show();
        }
        HostAction::MarkSaved => {
            let mut host = state.host.borrow_mut();
            host.dirty = false;
            host.status = "saved".to_string();
        }
    }
    state.flush_panel_events();
    Ok(())
}

fn find_and_highlight(state: &mut EditorState, query: &str, scope: SearchScope) {
    let texts = state.field_texts();
    let fields: Vec<(FieldId, &str)> = texts
        .iter()
        .map(|(field, text)| (*field, text.as_str()))
        .collect();
    let after = state
        .host
        .borrow()
        .last_match
        .and_then(|found| found.position.map(|position| (found.field, position)));

    let found = find_next(&fields, query, scope, after);
    // Nothing left: clear whichever field holds the previous match.
    let event = found.unwrap_or_else(|| {
        SearchMatch::clear(after.map_or(FieldId::Comment, |(field, _)| field))
    });
    {
        let mut host = state.host.borrow_mut();
        host.last_match = found;
        host.status = match found {
            Some(found) => format!("found in {}", found.field),
            None => format!("'{query}' not found"),
        };
    }
    debug!(?event, "find next");
    state.bus.search_match.publish(event);
}

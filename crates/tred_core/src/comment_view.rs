//! The comment dock: translator comment editor plus read-only location
//! comment for the active unit.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::appearance::CommentSettings;
use crate::bus::{EditorBus, SubId};
use crate::document::TextDocument;
use crate::error::PanelError;
use crate::event::PanelEvent;
use crate::field::FieldId;
use crate::highlight::{HighlightRange, HighlightStyle, Highlighter};
use crate::model::UnitRef;
use crate::panel::{attach_search_target, SearchTarget};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDisplay {
    visible: bool,
    text: String,
}

impl LocationDisplay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn show(&mut self, text: String) {
        self.visible = true;
        self.text = text;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

pub struct CommentPanel {
    active_unit: Option<UnitRef>,
    editor: TextDocument,
    editor_enabled: bool,
    location: LocationDisplay,
    programmatic_update: bool,
    user_edited: bool,
    force_dirty: bool,
    highlighter: Highlighter,
    appearance: CommentSettings,
    visible: bool,
    events: Vec<PanelEvent>,
}

impl Default for CommentPanel {
    fn default() -> Self {
        Self::new(&CommentSettings::default())
    }
}

impl CommentPanel {
    pub fn new(settings: &CommentSettings) -> Self {
        let mut panel = Self {
            active_unit: None,
            editor: TextDocument::new(),
            editor_enabled: false,
            location: LocationDisplay::default(),
            programmatic_update: false,
            user_edited: false,
            force_dirty: false,
            highlighter: Highlighter::new(FieldId::Comment),
            appearance: CommentSettings::default(),
            visible: true,
            events: Vec::new(),
        };
        panel.apply_settings(settings);
        panel
    }

    /// Wires the panel to every inbound topic it listens to.
    pub fn attach(panel: &Rc<RefCell<CommentPanel>>, bus: &EditorBus) -> Vec<SubId> {
        let mut subs = attach_search_target(panel, bus);

        let selected = panel.clone();
        subs.push(bus.unit_selected.subscribe(move |unit| {
            selected.borrow_mut().on_unit_selected(unit.clone());
        }));

        let settings = panel.clone();
        subs.push(bus.settings_changed.subscribe(move |changed| {
            settings.borrow_mut().apply_settings(changed);
        }));
        subs
    }

    pub fn on_unit_selected(&mut self, unit: Option<UnitRef>) {
        let Some(unit) = unit else {
            debug!("comment panel: no active unit");
            self.active_unit = None;
            self.editor_enabled = false;
            self.location.hide();
            self.set_text_programmatically("");
            return;
        };

        self.editor_enabled = true;
        let location = unit.location_comment();
        if location.is_empty() {
            self.location.hide();
        } else {
            self.location.show(location);
        }
        let comment = unit.translator_comment();
        self.active_unit = Some(unit);
        debug!(
            comment_chars = comment.chars().count(),
            location = self.location.is_visible(),
            "comment panel: bound unit"
        );
        self.set_text_programmatically(&comment);
    }

    /// A user edit of `[position, position + length)`. Dropped while the
    /// editor is disabled.
    pub fn apply_user_edit(
        &mut self,
        position: usize,
        length: usize,
        inserted: &str,
    ) -> Result<(), PanelError> {
        if !self.editor_enabled {
            trace!("comment panel: edit ignored, editor disabled");
            return Ok(());
        }
        self.editor.replace_range(position, length, inserted)?;
        self.user_edited = true;
        self.on_contents_changed();
        Ok(())
    }

    /// The user's widget now holds `text`.
    pub fn set_user_text(&mut self, text: &str) {
        if !self.editor_enabled || self.editor.plain_text() == text {
            return;
        }
        self.editor.set_plain_text(text);
        self.user_edited = true;
        self.on_contents_changed();
    }

    /// Emits `CommentChanged` with the full text when the editor is
    /// modified. The flags stay set; the host clears them.
    pub fn check_modified(&mut self) -> bool {
        if !self.is_modified() {
            return false;
        }
        let text = self.editor.plain_text().to_string();
        debug!(chars = text.chars().count(), "comment changed");
        self.events.push(PanelEvent::CommentChanged(text));
        true
    }

    pub fn is_modified(&self) -> bool {
        self.user_edited || self.force_dirty
    }

    pub fn clear_modified(&mut self) {
        self.user_edited = false;
        self.force_dirty = false;
    }

    pub fn apply_settings(&mut self, settings: &CommentSettings) {
        if let Some(color) = settings.text_color {
            self.appearance.text_color = Some(color);
        }
        if let Some(font) = &settings.font {
            self.appearance.font = Some(font.clone());
        }
        trace!(appearance = ?self.appearance, "comment panel: settings applied");
    }

    /// Hides the dock; the host flips its "shown" indicator on the event.
    pub fn close(&mut self) {
        if self.visible {
            self.visible = false;
            self.events.push(PanelEvent::VisibilityChanged(false));
        }
    }

    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.events.push(PanelEvent::VisibilityChanged(true));
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        self.editor.plain_text()
    }

    pub fn document(&self) -> &TextDocument {
        &self.editor
    }

    pub fn is_editor_enabled(&self) -> bool {
        self.editor_enabled
    }

    pub fn location(&self) -> &LocationDisplay {
        &self.location
    }

    pub fn active_unit(&self) -> Option<&UnitRef> {
        self.active_unit.as_ref()
    }

    pub fn appearance(&self) -> &CommentSettings {
        &self.appearance
    }

    pub fn highlight_style(&self) -> &HighlightStyle {
        self.highlighter.style()
    }

    /// Char range of the rendered highlight, if any.
    pub fn highlight_run(&self) -> Option<Range<usize>> {
        self.highlighter.visible_run(&self.editor)
    }

    pub fn take_repaint(&mut self) -> Vec<Range<usize>> {
        self.editor.take_dirty()
    }

    fn set_text_programmatically(&mut self, text: &str) {
        self.programmatic_update = true;
        self.editor.set_plain_text(text);
        self.on_contents_changed();
        self.clear_modified();
        self.programmatic_update = false;
    }

    // Raw content-changed notification of the editor.
    fn on_contents_changed(&mut self) {
        if self.programmatic_update {
            return;
        }
        self.events.push(PanelEvent::ReadyForSave(true));
    }
}

impl SearchTarget for CommentPanel {
    fn field(&self) -> FieldId {
        FieldId::Comment
    }

    fn highlight_search_match(
        &mut self,
        field: FieldId,
        position: Option<usize>,
        length: usize,
    ) -> Result<(), PanelError> {
        self.highlighter
            .route(&mut self.editor, field, position, length)
            .inspect_err(|err| warn!(%err, "comment panel: highlight rejected"))
    }

    fn replace_text(
        &mut self,
        field: FieldId,
        position: usize,
        length: usize,
        replacement: &str,
    ) -> Result<(), PanelError> {
        if field != FieldId::Comment {
            return Ok(());
        }
        self.editor.replace_range(position, length, replacement)?;
        self.on_contents_changed();
        self.force_dirty = true;
        self.check_modified();
        Ok(())
    }

    fn highlight_range(&self) -> Option<HighlightRange> {
        self.highlighter.current()
    }

    fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};
use tred_core::appearance::CommentSettings;
use tred_core::bus::{EditorBus, SubId};
use tred_core::comment_view::CommentPanel;
use tred_core::event::{PanelEvent, SearchMatch};
use tred_core::field::FieldId;
use tred_core::formats::AnyUnit;
use tred_core::model::UnitRef;
use tred_core::panel::{attach_search_target, SearchTarget};
use tred_core::text_view::TextPanel;

use crate::error::DriverError;

pub type SharedUnit = Rc<RefCell<AnyUnit>>;

/// The host's document: units stay owned here, panels only see handles.
#[derive(Default)]
pub struct Catalog {
    units: Vec<SharedUnit>,
}

impl Catalog {
    pub fn new(units: Vec<AnyUnit>) -> Self {
        Self {
            units: units
                .into_iter()
                .map(|unit| Rc::new(RefCell::new(unit)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<SharedUnit> {
        self.units.get(index).cloned()
    }

    pub fn label(&self, index: usize) -> Option<String> {
        let unit = self.units.get(index)?;
        let unit = unit.borrow();
        Some(unit.source_text().lines().next().unwrap_or("").to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostState {
    pub selected: Option<usize>,
    pub dirty: bool,
    pub comment_dock_shown: bool,
    pub last_match: Option<SearchMatch>,
    pub status: String,
    pub received: Vec<PanelEvent>,
}

pub struct EditorState {
    pub bus: EditorBus,
    pub catalog: Rc<Catalog>,
    pub comment: Rc<RefCell<CommentPanel>>,
    pub source: Rc<RefCell<TextPanel>>,
    pub target: Rc<RefCell<TextPanel>>,
    pub host: Rc<RefCell<HostState>>,
    subscriptions: Vec<SubId>,
}

impl EditorState {
    pub fn new(catalog: Catalog, settings: &CommentSettings) -> Self {
        let bus = EditorBus::new();
        let catalog = Rc::new(catalog);
        let comment = Rc::new(RefCell::new(CommentPanel::new(settings)));
        let source = Rc::new(RefCell::new(TextPanel::new(FieldId::Source)));
        let target = Rc::new(RefCell::new(TextPanel::new(FieldId::Target)));
        let host = Rc::new(RefCell::new(HostState {
            comment_dock_shown: true,
            ..HostState::default()
        }));

        let mut subscriptions = CommentPanel::attach(&comment, &bus);
        subscriptions.extend(attach_search_target(&source, &bus));
        subscriptions.extend(attach_search_target(&target, &bus));
        subscriptions.push(subscribe_host(&bus, &host, &catalog, &comment));

        info!(units = catalog.len(), "editor state ready");
        Self {
            bus,
            catalog,
            comment,
            source,
            target,
            host,
            subscriptions,
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Commits the pending comment of the outgoing unit, then rebinds every
    /// panel to `index`.
    pub fn select_unit(&mut self, index: Option<usize>) -> Result<(), DriverError> {
        let unit = match index {
            Some(i) => Some(self.catalog.get(i).ok_or(DriverError::UnknownUnit(i))?),
            None => None,
        };

        self.comment.borrow_mut().check_modified();
        self.flush_panel_events();

        self.host.borrow_mut().selected = index;
        self.host.borrow_mut().last_match = None;
        let (source_text, target_text) = unit
            .as_ref()
            .map(|unit| {
                let unit = unit.borrow();
                (unit.source_text().to_string(), unit.target_text().to_string())
            })
            .unwrap_or_default();
        self.source.borrow_mut().set_text(&source_text);
        self.target.borrow_mut().set_text(&target_text);

        debug!(?index, "unit selected");
        self.bus
            .unit_selected
            .publish(unit.map(|unit| unit as UnitRef));
        self.flush_panel_events();
        Ok(())
    }

    /// Field texts in search order.
    pub fn field_texts(&self) -> Vec<(FieldId, String)> {
        vec![
            (FieldId::Source, self.source.borrow().text().to_string()),
            (FieldId::Target, self.target.borrow().text().to_string()),
            (FieldId::Comment, self.comment.borrow().text().to_string()),
        ]
    }

    /// Moves queued panel notifications onto the bus until none are left.
    pub fn flush_panel_events(&mut self) {
        loop {
            let mut events = self.comment.borrow_mut().take_events();
            events.extend(self.source.borrow_mut().take_events());
            events.extend(self.target.borrow_mut().take_events());
            if events.is_empty() {
                break;
            }
            for event in events {
                self.bus.panel_events.publish(event);
            }
        }
    }

    pub fn take_received(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.host.borrow_mut().received)
    }
}

fn subscribe_host(
    bus: &EditorBus,
    host: &Rc<RefCell<HostState>>,
    catalog: &Rc<Catalog>,
    comment: &Rc<RefCell<CommentPanel>>,
) -> SubId {
    let host = host.clone();
    let catalog = catalog.clone();
    let comment = comment.clone();
    bus.panel_events.subscribe(move |event| {
        let mut host = host.borrow_mut();
        host.received.push(event.clone());
        let active = host.selected.and_then(|index| catalog.get(index));
        match event {
            PanelEvent::ReadyForSave(flag) => host.dirty |= *flag,
            PanelEvent::CommentChanged(text) => {
                if let Some(unit) = active {
                    unit.borrow_mut().set_translator_comment(text);
                    host.dirty = true;
                }
                comment.borrow_mut().clear_modified();
            }
            PanelEvent::VisibilityChanged(shown) => host.comment_dock_shown = *shown,
            PanelEvent::TextChanged { field, text } => {
                if let Some(unit) = active {
                    match field {
                        FieldId::Source => unit.borrow_mut().set_source_text(text),
                        FieldId::Target => unit.borrow_mut().set_target_text(text),
                        FieldId::Comment => {}
                    }
                    host.dirty = true;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tred_core::formats::po::PoUnit;
    use tred_core::model::TranslationUnit;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            PoUnit::new("Open\nfile", "Ouvrir")
                .with_translator_note("menu")
                .into(),
            PoUnit::new("Close", "").into(),
        ])
    }

    #[test]
    fn t_state_001_wires_every_panel() {
        let state = EditorState::new(catalog(), &CommentSettings::default());
        // comment: match, replace, unit, settings; two text panels: match, replace; host.
        assert_eq!(state.subscription_count(), 9);
        assert_eq!(state.bus.search_match.subscriber_count(), 3);
        assert_eq!(state.catalog.label(0).as_deref(), Some("Open"));
    }

    #[test]
    fn t_state_002_comment_changed_written_back_on_switch() {
        let mut state = EditorState::new(catalog(), &CommentSettings::default());
        state.select_unit(Some(0)).expect("select");
        state.comment.borrow_mut().set_user_text("menu entry");
        state.flush_panel_events();
        state.select_unit(Some(1)).expect("switch");

        let first = state.catalog.get(0).expect("unit");
        assert_eq!(first.borrow().translator_comment(), "menu entry");
        assert!(state.host.borrow().dirty);
        assert!(!state.comment.borrow().is_modified());
        assert_eq!(state.comment.borrow().text(), "");
    }

    #[test]
    fn t_state_003_unknown_unit_is_rejected() {
        let mut state = EditorState::new(catalog(), &CommentSettings::default());
        assert!(matches!(
            state.select_unit(Some(9)),
            Err(DriverError::UnknownUnit(9))
        ));
        assert_eq!(state.host.borrow().selected, None);
    }
}

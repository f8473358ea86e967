use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::bus::{EditorBus, SubId};
use crate::error::PanelError;
use crate::event::PanelEvent;
use crate::field::FieldId;
use crate::highlight::HighlightRange;

/// A panel taking part in the broadcast search protocol. Every panel gets
/// every event and ignores the ones not addressed to its field.
pub trait SearchTarget {
    fn field(&self) -> FieldId;

    fn highlight_search_match(
        &mut self,
        field: FieldId,
        position: Option<usize>,
        length: usize,
    ) -> Result<(), PanelError>;

    fn replace_text(
        &mut self,
        field: FieldId,
        position: usize,
        length: usize,
        replacement: &str,
    ) -> Result<(), PanelError>;

    fn highlight_range(&self) -> Option<HighlightRange>;

    fn take_events(&mut self) -> Vec<PanelEvent>;
}

/// Subscribes `panel` to the search-match and replace topics.
pub fn attach_search_target<P>(panel: &Rc<RefCell<P>>, bus: &EditorBus) -> Vec<SubId>
where
    P: SearchTarget + 'static,
{
    let matches = panel.clone();
    let on_match = bus.search_match.subscribe(move |event| {
        // Rejections are logged by the panel itself.
        let _ = matches
            .borrow_mut()
            .highlight_search_match(event.field, event.position, event.length);
    });

    let replaces = panel.clone();
    let on_replace = bus.replace_requested.subscribe(move |request| {
        let mut panel = replaces.borrow_mut();
        if let Err(err) =
            panel.replace_text(request.field, request.position, request.length, &request.text)
        {
            warn!(panel = %panel.field(), field = %request.field, %err, "replace rejected");
        }
    });

    vec![on_match, on_replace]
}

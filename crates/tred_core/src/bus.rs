//! Typed in-process publish/subscribe.
//!
//! Every event kind is its own [`Topic`]. Delivery is synchronous and in
//! subscription order. Events published from inside a handler are queued and
//! delivered once the current round is done, so a handler never runs
//! re-entrantly. Routing by field happens inside the handlers; topics do not
//! filter.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::trace;

use crate::appearance::CommentSettings;
use crate::event::{PanelEvent, ReplaceRequest, SearchMatch};
use crate::model::UnitRef;

pub type SubId = u64;

type Handler<E> = Box<dyn FnMut(&E)>;

struct TopicInner<E> {
    next_id: SubId,
    handlers: Vec<(SubId, Handler<E>)>,
    pending: VecDeque<E>,
    removed: Vec<SubId>,
    delivering: bool,
}

pub struct Topic<E> {
    name: &'static str,
    inner: RefCell<TopicInner<E>>,
}

impl<E> Topic<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RefCell::new(TopicInner {
                next_id: 1,
                handlers: Vec::new(),
                pending: VecDeque::new(),
                removed: Vec::new(),
                delivering: false,
            }),
        }
    }

    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> SubId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) {
        let mut inner = self.inner.borrow_mut();
        inner.handlers.retain(|(sub, _)| *sub != id);
        if inner.delivering {
            inner.removed.push(id);
        }
    }

    /// Subscribers outside of a delivery round.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    pub fn publish(&self, event: E) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.pending.push_back(event);
            if inner.delivering {
                trace!(topic = self.name, "queued event published during delivery");
                return;
            }
            inner.delivering = true;
        }
        loop {
            let (event, mut handlers) = {
                let mut inner = self.inner.borrow_mut();
                let Some(event) = inner.pending.pop_front() else {
                    inner.delivering = false;
                    break;
                };
                let handlers = std::mem::take(&mut inner.handlers);
                (event, handlers)
            };
            trace!(topic = self.name, subscribers = handlers.len(), "deliver");
            for (id, handler) in handlers.iter_mut() {
                if self.inner.borrow().removed.contains(id) {
                    continue;
                }
                handler(&event);
            }
            let mut inner = self.inner.borrow_mut();
            let added = std::mem::take(&mut inner.handlers);
            handlers.extend(added);
            let removed = std::mem::take(&mut inner.removed);
            handlers.retain(|(id, _)| !removed.contains(id));
            inner.handlers = handlers;
        }
    }
}

/// The application-wide channels shared by the host and its panels.
pub struct EditorBus {
    pub unit_selected: Topic<Option<UnitRef>>,
    pub search_match: Topic<SearchMatch>,
    pub replace_requested: Topic<ReplaceRequest>,
    pub settings_changed: Topic<CommentSettings>,
    pub panel_events: Topic<PanelEvent>,
}

impl Default for EditorBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBus {
    pub fn new() -> Self {
        Self {
            unit_selected: Topic::new("unit_selected"),
            search_match: Topic::new("search_match"),
            replace_requested: Topic::new("replace_requested"),
            settings_changed: Topic::new("settings_changed"),
            panel_events: Topic::new("panel_events"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn t_bus_001_delivers_in_subscription_order() {
        let topic = Topic::<u32>::new("numbers");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = seen.clone();
        topic.subscribe(move |n| a.borrow_mut().push(("a", *n)));
        let b = seen.clone();
        topic.subscribe(move |n| b.borrow_mut().push(("b", *n)));
        topic.publish(7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn t_bus_002_publish_from_handler_is_queued() {
        let topic = Rc::new(Topic::<u32>::new("chain"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner_topic = Rc::downgrade(&topic);
        let log = seen.clone();
        topic.subscribe(move |n| {
            log.borrow_mut().push(*n);
            if *n < 3 {
                if let Some(topic) = inner_topic.upgrade() {
                    topic.publish(n + 1);
                }
            }
        });
        topic.publish(1);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn t_bus_003_unsubscribe_stops_delivery() {
        let topic = Topic::<u32>::new("numbers");
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let id = topic.subscribe(move |_| *c.borrow_mut() += 1);
        topic.publish(1);
        topic.unsubscribe(id);
        topic.publish(2);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(topic.subscriber_count(), 0);
    }

    #[test]
    fn t_bus_004_subscribe_during_delivery_joins_next_round() {
        let topic = Rc::new(Topic::<u32>::new("late"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let weak = Rc::downgrade(&topic);
        let log = seen.clone();
        topic.subscribe(move |n| {
            if *n == 1 {
                if let Some(topic) = weak.upgrade() {
                    let late = log.clone();
                    topic.subscribe(move |n| late.borrow_mut().push(*n));
                }
            }
        });
        topic.publish(1);
        topic.publish(2);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(topic.subscriber_count(), 2);
    }
}

#![forbid(unsafe_code)]

//! Lifecycle notifications.
//!
//! Four event kinds flow out of the engine: `start`, `move`, `end`,
//! `change`. Delivery is synchronous, in listener registration order,
//! within the same call that handled the underlying pointer event.
//! Per session the order is fixed: one `start`, zero or more `move`s
//! (only on actual resolved-index changes), exactly one `end`, then
//! zero or one `change`.

use sortable_core::geometry::Point;

/// Payload of a `start` notification.
#[derive(Debug, Clone, PartialEq)]
pub struct StartEvent {
    /// Id of the item being dragged.
    pub item_id: String,
    /// Index the item occupied at gesture start.
    pub index: usize,
    /// Pointer position at gesture start.
    pub pos: Point,
}

/// Payload of a `move` notification. Fires only when the resolved index
/// actually changes, not on every pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEvent {
    /// Id of the item being dragged.
    pub item_id: String,
    /// Resolved index before this move.
    pub previous: Option<usize>,
    /// Resolved index after this move. `None` when the cursor has no
    /// valid target.
    pub resolved: Option<usize>,
    /// Pointer position of the triggering sample.
    pub pos: Point,
}

/// Payload of an `end` notification: the final session snapshot. Fires
/// exactly once per session, on every exit path.
#[derive(Debug, Clone, PartialEq)]
pub struct EndEvent {
    /// Id of the item that was dragged.
    pub item_id: String,
    /// Index the item occupied at gesture start.
    pub start_index: usize,
    /// Resolved index at release, before any commit.
    pub final_index: Option<usize>,
    /// Last pointer position of the session.
    pub pos: Point,
    /// True when the session ended through the cancel path.
    pub cancelled: bool,
}

/// Payload of a `change` notification. Fires only when a mutation was
/// committed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Id of the moved item.
    pub item_id: String,
    /// Index the item was removed from.
    pub from_index: usize,
    /// Index the item was inserted at.
    pub to_index: usize,
    /// Container order snapshot after the commit.
    pub order: Vec<String>,
}

/// A lifecycle notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderEvent {
    Start(StartEvent),
    Move(MoveEvent),
    End(EndEvent),
    Change(ChangeEvent),
}

impl ReorderEvent {
    /// Id of the affected item.
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            ReorderEvent::Start(e) => &e.item_id,
            ReorderEvent::Move(e) => &e.item_id,
            ReorderEvent::End(e) => &e.item_id,
            ReorderEvent::Change(e) => &e.item_id,
        }
    }
}

/// External listener for lifecycle notifications.
///
/// All hooks default to no-ops; implement the ones you care about.
pub trait ReorderListener {
    /// A drag session started.
    fn on_start(&mut self, _event: &StartEvent) {}

    /// The resolved index changed during a drag.
    fn on_move(&mut self, _event: &MoveEvent) {}

    /// A drag session ended (committed or cancelled).
    fn on_end(&mut self, _event: &EndEvent) {}

    /// A reorder was committed to the item list.
    fn on_change(&mut self, _event: &ChangeEvent) {}
}

/// Synchronous fan-out to registered listeners.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<Box<dyn ReorderListener>>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Notifier {
    /// Notifier with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are invoked in registration order.
    pub fn subscribe(&mut self, listener: Box<dyn ReorderListener>) {
        self.listeners.push(listener);
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an event to every listener, synchronously.
    pub fn emit(&mut self, event: &ReorderEvent) {
        for listener in &mut self.listeners {
            match event {
                ReorderEvent::Start(e) => listener.on_start(e),
                ReorderEvent::Move(e) => listener.on_move(e),
                ReorderEvent::End(e) => listener.on_end(e),
                ReorderEvent::Change(e) => listener.on_change(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Listener fixture that records a line per notification.
    pub(crate) struct RecordingListener {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingListener {
        pub(crate) fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            (Self { log: Rc::clone(&log) }, log)
        }
    }

    impl ReorderListener for RecordingListener {
        fn on_start(&mut self, event: &StartEvent) {
            self.log
                .borrow_mut()
                .push(format!("start:{}@{}", event.item_id, event.index));
        }

        fn on_move(&mut self, event: &MoveEvent) {
            self.log.borrow_mut().push(format!(
                "move:{}:{:?}->{:?}",
                event.item_id, event.previous, event.resolved
            ));
        }

        fn on_end(&mut self, event: &EndEvent) {
            self.log.borrow_mut().push(format!(
                "end:{}:{:?} cancelled={}",
                event.item_id, event.final_index, event.cancelled
            ));
        }

        fn on_change(&mut self, event: &ChangeEvent) {
            self.log.borrow_mut().push(format!(
                "change:{}:{}->{}",
                event.item_id, event.from_index, event.to_index
            ));
        }
    }

    #[test]
    fn emit_dispatches_to_matching_hook() {
        let mut notifier = Notifier::new();
        let (listener, log) = RecordingListener::new();
        notifier.subscribe(Box::new(listener));

        notifier.emit(&ReorderEvent::Start(StartEvent {
            item_id: "a".into(),
            index: 1,
            pos: Point::default(),
        }));
        notifier.emit(&ReorderEvent::Change(ChangeEvent {
            item_id: "a".into(),
            from_index: 1,
            to_index: 3,
            order: vec!["b".into(), "a".into()],
        }));

        assert_eq!(*log.borrow(), vec!["start:a@1", "change:a:1->3"]);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let mut notifier = Notifier::new();
        let (first, first_log) = RecordingListener::new();
        let (second, second_log) = RecordingListener::new();
        let shared = Rc::new(RefCell::new(Vec::new()));

        struct Tagged {
            tag: &'static str,
            shared: Rc<RefCell<Vec<&'static str>>>,
        }
        impl ReorderListener for Tagged {
            fn on_end(&mut self, _event: &EndEvent) {
                self.shared.borrow_mut().push(self.tag);
            }
        }

        notifier.subscribe(Box::new(Tagged {
            tag: "one",
            shared: Rc::clone(&shared),
        }));
        notifier.subscribe(Box::new(first));
        notifier.subscribe(Box::new(Tagged {
            tag: "two",
            shared: Rc::clone(&shared),
        }));
        notifier.subscribe(Box::new(second));

        notifier.emit(&ReorderEvent::End(EndEvent {
            item_id: "x".into(),
            start_index: 0,
            final_index: Some(2),
            pos: Point::default(),
            cancelled: false,
        }));

        assert_eq!(*shared.borrow(), vec!["one", "two"]);
        assert_eq!(first_log.borrow().len(), 1);
        assert_eq!(second_log.borrow().len(), 1);
    }

    #[test]
    fn event_item_id_accessor() {
        let event = ReorderEvent::Move(MoveEvent {
            item_id: "tab-3".into(),
            previous: Some(0),
            resolved: Some(1),
            pos: Point::default(),
        });
        assert_eq!(event.item_id(), "tab-3");
    }

    #[test]
    fn default_hooks_are_noops() {
        struct Inert;
        impl ReorderListener for Inert {}

        let mut notifier = Notifier::new();
        notifier.subscribe(Box::new(Inert));
        // Must not panic or require any hook implementation.
        notifier.emit(&ReorderEvent::End(EndEvent {
            item_id: "a".into(),
            start_index: 0,
            final_index: None,
            pos: Point::default(),
            cancelled: true,
        }));
        assert_eq!(notifier.len(), 1);
    }
}

#![forbid(unsafe_code)]

//! The drag-to-reorder engine.
//!
//! [`SortableList`] owns the authoritative item order and the drag
//! lifecycle for one container. Hosts feed it native pointer events,
//! a layout snapshot, and a ~16 ms tick, and read back order changes
//! through [`ReorderListener`] notifications and the [`order`] query.
//!
//! # Lifecycle
//!
//! A qualifying pointer-down on an enabled item opens the session
//! (`start` fires); every unified move re-resolves the drop index
//! (`move` fires on actual index changes); pointer-up closes the
//! session (`end` fires, then `change` if an order mutation was
//! committed). [`cancel`] is the explicit abort path: the order
//! reverts to its pre-drag state and no `change` fires.
//!
//! Session-scoped resources — the listener grab, the autoscroll
//! controller, the visual proxy — are acquired on `Dragging` entry and
//! released on every exit path by one internal exit funnel, so no exit
//! can leak them.
//!
//! [`order`]: SortableList::order
//! [`cancel`]: SortableList::cancel

use std::fmt;

use sortable_core::config::SortableConfig;
use sortable_core::pointer::{self, PointerEvent, PointerPhase, PointerSample};

use crate::autoscroll::{AutoscrollController, ScrollDelta, ScrollPort};
use crate::item::{Item, ItemError, ItemList};
use crate::mutator;
use crate::notify::{
    ChangeEvent, EndEvent, MoveEvent, Notifier, ReorderEvent, ReorderListener, StartEvent,
};
use crate::persist::{KeyValueStore, PersistenceAdapter};
use crate::proxy::{DragProxy, ProxyConfig, ProxyFrame};
use crate::resolver::{self, LayoutSnapshot};
use crate::session::{DragSession, DragState, ListenerGrab};

/// Drag-to-reorder engine for one container.
pub struct SortableList<T = ()> {
    config: SortableConfig,
    items: ItemList<T>,
    layout: LayoutSnapshot,
    state: DragState,
    notifier: Notifier,
    autoscroll: AutoscrollController,
    persistence: Option<PersistenceAdapter>,
    scroll_port: Option<Box<dyn ScrollPort>>,
    grab_factory: Option<Box<dyn FnMut() -> ListenerGrab>>,
    proxy: Option<DragProxy>,
}

impl<T> fmt::Debug for SortableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableList")
            .field("items", &self.items.len())
            .field("dragging", &self.state.is_dragging())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> SortableList<T> {
    /// Engine with the given configuration and no items.
    ///
    /// The configuration is sanitized on the way in; out-of-range
    /// options degrade to their defaults rather than failing.
    #[must_use]
    pub fn new(config: SortableConfig) -> Self {
        let config = config.sanitized();
        let autoscroll = AutoscrollController::new(config.direction, config.scroll_speed);
        Self {
            config,
            items: ItemList::new(),
            layout: LayoutSnapshot::default(),
            state: DragState::Idle,
            notifier: Notifier::new(),
            autoscroll,
            persistence: None,
            scroll_port: None,
            grab_factory: None,
            proxy: None,
        }
    }

    /// Supply the initial item list. Fails on duplicate ids.
    pub fn with_items(mut self, items: Vec<Item<T>>) -> Result<Self, ItemError> {
        self.items = ItemList::from_items(items)?;
        Ok(self)
    }

    /// Attach a key-value store.
    ///
    /// Only takes effect when `persist_state` is configured; the saved
    /// order is loaded once, here, and applied to the current items —
    /// call this after [`with_items`](Self::with_items).
    #[must_use]
    pub fn with_storage(mut self, store: Box<dyn KeyValueStore>) -> Self {
        if !self.config.persist_state {
            tracing::debug!(store = store.name(), "storage ignored: persistence not configured");
            return self;
        }
        let adapter = PersistenceAdapter::new(store, self.config.storage_key.clone());
        if let Some(saved) = adapter.load() {
            self.items.apply_saved_order(&saved);
            tracing::debug!(items = saved.len(), "seeded item order from storage");
        }
        self.persistence = Some(adapter);
        self
    }

    /// Attach the host's scroll port; autoscroll deltas are applied
    /// through it.
    #[must_use]
    pub fn with_scroll_port(mut self, port: Box<dyn ScrollPort>) -> Self {
        self.scroll_port = Some(port);
        self
    }

    /// Register the host's global-listener hook.
    ///
    /// Called once per drag session at start; the returned grab's
    /// teardown runs exactly once when the session exits, whichever
    /// path it exits through.
    #[must_use]
    pub fn with_listener_hook(mut self, hook: impl FnMut() -> ListenerGrab + 'static) -> Self {
        self.grab_factory = Some(Box::new(hook));
        self
    }

    /// Register a lifecycle listener.
    pub fn subscribe(&mut self, listener: Box<dyn ReorderListener>) {
        self.notifier.subscribe(listener);
    }

    /// Install a fresh host-measured layout snapshot. Call on scroll,
    /// resize, and item insertion; safe mid-drag.
    pub fn set_layout(&mut self, layout: LayoutSnapshot) {
        self.layout = layout;
    }

    /// The current layout snapshot.
    #[must_use]
    pub fn layout(&self) -> &LayoutSnapshot {
        &self.layout
    }

    /// Replace the item list. Fails on duplicate ids; the current list
    /// is kept on failure. Tolerated mid-drag: the live session
    /// re-locates its item by id at commit time.
    pub fn set_items(&mut self, items: Vec<Item<T>>) -> Result<(), ItemError> {
        self.items = ItemList::from_items(items)?;
        Ok(())
    }

    /// Items in authoritative display order.
    #[must_use]
    pub fn items(&self) -> &[Item<T>] {
        self.items.as_slice()
    }

    /// Item ids in authoritative display order.
    #[must_use]
    pub fn order(&self) -> Vec<String> {
        self.items.order()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// Whether a drag session is alive. Hosts hang styling off this.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The live drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.state.session()
    }

    /// Diagnostic access to the autoscroll controller.
    #[must_use]
    pub fn autoscroll(&self) -> &AutoscrollController {
        &self.autoscroll
    }

    /// Route a native pointer event through the engine.
    ///
    /// Malformed events (no coordinates) are dropped without advancing
    /// any session. Secondary mouse buttons neither start nor end
    /// sessions.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let Some((phase, sample)) = pointer::unify(event) else {
            return;
        };
        match phase {
            PointerPhase::Down => {
                if event.primary() {
                    self.pointer_down(sample);
                }
            }
            PointerPhase::Move => self.pointer_move(sample),
            PointerPhase::Up => {
                if event.primary() {
                    self.pointer_up(sample);
                }
            }
        }
    }

    /// Drive autoscroll for one timer tick (~16 ms cadence).
    ///
    /// Returns the delta applied this tick, if any. No adjustment
    /// happens while idle.
    pub fn tick(&mut self) -> Option<ScrollDelta> {
        let session = self.state.session()?;
        let delta = self
            .autoscroll
            .poll(session.current_pos, self.layout.container)?;
        if let Some(port) = self.scroll_port.as_mut() {
            port.scroll_by(delta);
        }
        Some(delta)
    }

    /// Geometry for the floating clone and drop indicator this frame.
    /// `None` while idle or with previews disabled.
    #[must_use]
    pub fn proxy_frame(&self) -> Option<ProxyFrame> {
        let session = self.state.session()?;
        let proxy = self.proxy.as_ref()?;
        Some(proxy.frame(
            session.current_pos,
            self.layout.viewport,
            &self.layout.items,
            session.current_index,
            self.config.direction,
        ))
    }

    /// Abort the live session: revert to the start order, emit `end`
    /// with the cancelled flag, never `change`. Hosts map Escape,
    /// pointer-capture loss, and window blur here. No-op while idle.
    pub fn cancel(&mut self) {
        if self.state.is_dragging() {
            self.finish_session(true);
        }
    }

    fn pointer_down(&mut self, sample: PointerSample) {
        // The active session owns the pointer stream until it resolves.
        if self.state.is_dragging() {
            tracing::debug!("pointer-down ignored: session already active");
            return;
        }
        let Some(index) = resolver::hit_test(sample.pos, &self.layout.items) else {
            return;
        };
        let Some(item) = self.items.get(index) else {
            // Layout snapshot is ahead of the item list; nothing to drag.
            return;
        };
        if item.disabled {
            tracing::debug!(id = %item.id, "drag refused: item disabled");
            return;
        }
        let item_id = item.id.clone();
        let layout = self.layout.items[index];
        if self.config.handle {
            // An item with no declared handle falls back to its full
            // bounds.
            if let Some(handle) = layout.handle {
                if !handle.contains(sample.pos) {
                    return;
                }
            }
        }

        let grab = match self.grab_factory.as_mut() {
            Some(hook) => hook(),
            None => ListenerGrab::noop(),
        };
        if self.config.show_preview {
            self.proxy = Some(DragProxy::new(
                ProxyConfig::default().with_opacity(self.config.drag_opacity),
                layout.bounds,
            ));
        }
        if self.config.auto_scroll {
            self.autoscroll.start();
        }
        self.state = DragState::Dragging(DragSession::new(
            item_id.clone(),
            index,
            sample.pos,
            grab,
        ));
        tracing::debug!(id = %item_id, index, "drag session started");
        self.notifier.emit(&ReorderEvent::Start(StartEvent {
            item_id,
            index,
            pos: sample.pos,
        }));
    }

    fn pointer_move(&mut self, sample: PointerSample) {
        let in_container = self.layout.container.contains(sample.pos);
        let resolved = if in_container && !self.items.is_empty() {
            let index = resolver::resolve(sample.pos, &self.layout.items);
            Some(index.min(self.items.len() - 1))
        } else {
            None
        };

        // Phantom moves while idle are dropped here; the state machine
        // never sees them.
        let Some(session) = self.state.session_mut() else {
            return;
        };
        session.update_position(sample);
        let previous = session.current_index;
        if !session.set_resolved(resolved) {
            return;
        }
        let event = MoveEvent {
            item_id: session.dragging_id.clone(),
            previous,
            resolved,
            pos: sample.pos,
        };
        self.notifier.emit(&ReorderEvent::Move(event));
    }

    fn pointer_up(&mut self, sample: PointerSample) {
        let Some(session) = self.state.session_mut() else {
            return;
        };
        session.update_position(sample);
        self.finish_session(false);
    }

    /// The single session-exit funnel. Releases session resources,
    /// emits `end`, and — on the commit path — applies and announces
    /// the order mutation.
    fn finish_session(&mut self, cancelled: bool) {
        let Some(mut session) = self.state.take() else {
            return;
        };
        // Exit hooks run on every path: grab released exactly once,
        // autoscroll stopped exactly once, proxy destroyed.
        session.release_grab();
        self.autoscroll.stop();
        self.proxy = None;

        self.notifier.emit(&ReorderEvent::End(EndEvent {
            item_id: session.dragging_id.clone(),
            start_index: session.start_index,
            final_index: session.current_index,
            pos: session.current_pos,
            cancelled,
        }));

        if cancelled {
            tracing::debug!(id = %session.dragging_id, "drag cancelled, order reverted");
            return;
        }
        let Some(target) = session.current_index else {
            tracing::debug!(id = %session.dragging_id, "drag released with no target");
            return;
        };
        // Re-locate by id: the host may have mutated the list mid-drag.
        let Some(from) = self.items.position_of(&session.dragging_id) else {
            tracing::debug!(id = %session.dragging_id, "dragged item removed mid-drag");
            return;
        };
        let Some(committed) = mutator::commit(self.items.items_mut(), from, target) else {
            return;
        };
        tracing::debug!(
            id = %session.dragging_id,
            from = committed.from,
            to = committed.to,
            "reorder committed"
        );
        let order = self.items.order();
        if let Some(adapter) = self.persistence.as_mut() {
            adapter.save(&order);
        }
        self.notifier.emit(&ReorderEvent::Change(ChangeEvent {
            item_id: session.dragging_id,
            from_index: committed.from,
            to_index: committed.to,
            order,
        }));
    }
}

#![forbid(unsafe_code)]

//! Drag-to-reorder engine for sortable lists and draggable tab strips.
//!
//! The engine unifies mouse and touch input into one coordinate stream,
//! tracks a single drag session per container, resolves the nearest
//! drop position from live cursor geometry, drives edge-triggered
//! autoscroll, and commits order mutations with event notification and
//! optional persistence. Rendering stays with the host: geometry comes
//! in as an injected [`LayoutSnapshot`](resolver::LayoutSnapshot) and
//! visuals go out as plain rectangles.
//!
//! ```
//! use sortable_core::SortableConfig;
//! use sortable_core::geometry::Rect;
//! use sortable_core::pointer::PointerEvent;
//! use sortable_engine::item::Item;
//! use sortable_engine::resolver::{ItemLayout, LayoutSnapshot};
//! use sortable_engine::SortableList;
//!
//! let mut list = SortableList::new(SortableConfig::list())
//!     .with_items(vec![Item::bare("a"), Item::bare("b")])
//!     .unwrap();
//! list.set_layout(
//!     LayoutSnapshot::new(Rect::new(0.0, 0.0, 100.0, 200.0)).with_items(vec![
//!         ItemLayout::new(Rect::new(0.0, 0.0, 100.0, 20.0)),
//!         ItemLayout::new(Rect::new(0.0, 20.0, 100.0, 20.0)),
//!     ]),
//! );
//!
//! list.handle_pointer(&PointerEvent::mouse_down(50.0, 10.0, 0.0));
//! list.handle_pointer(&PointerEvent::mouse_move(50.0, 30.0, 16.0));
//! list.handle_pointer(&PointerEvent::mouse_up(50.0, 30.0, 32.0));
//! assert_eq!(list.order(), ["b", "a"]);
//! ```

pub mod autoscroll;
pub mod engine;
pub mod item;
pub mod mutator;
pub mod notify;
pub mod persist;
pub mod proxy;
pub mod resolver;
pub mod session;

pub use autoscroll::{AutoscrollController, ScrollDelta, ScrollPort};
pub use engine::SortableList;
pub use item::{Item, ItemError, ItemList};
pub use notify::{ReorderEvent, ReorderListener};
pub use persist::{FileStore, KeyValueStore, MemoryStore, PersistenceAdapter};
pub use proxy::{DragProxy, ProxyFrame};
pub use resolver::{ItemLayout, LayoutSnapshot};
pub use session::{DragSession, DragState, ListenerGrab};

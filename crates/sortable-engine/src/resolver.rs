#![forbid(unsafe_code)]

//! Position resolution.
//!
//! The resolver is pure geometry: given the live cursor and an injected
//! snapshot of item bounding rectangles, it answers "which index would
//! the dragged item land at if released now". The host refreshes the
//! snapshot on scroll and resize; nothing here queries a rendering
//! environment.
//!
//! # Algorithm
//!
//! Nearest center: Euclidean distance from the cursor to the center of
//! every rendered item rectangle, minimum wins. Ties go to the
//! first-encountered item in scan order, which for axis-aligned layouts
//! is the visually earlier item. An empty snapshot resolves to index 0.
//! The comparison uses strict `<` on squared distances, so the
//! tie-break is a property of the scan, not of float rounding.

use sortable_core::geometry::{Point, Rect};

/// Layout of one rendered item, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemLayout {
    /// The item's bounding rectangle in viewport space.
    pub bounds: Rect,
    /// Optional handle sub-region. Only consulted in handle mode.
    pub handle: Option<Rect>,
}

impl ItemLayout {
    /// Layout with no handle sub-region.
    #[must_use]
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            handle: None,
        }
    }

    /// Declare a handle sub-region.
    #[must_use]
    pub const fn with_handle(mut self, handle: Rect) -> Self {
        self.handle = Some(handle);
        self
    }
}

/// A host-measured snapshot of container and item geometry.
///
/// Refreshed by the host whenever layout changes (scroll, resize, item
/// insertion). Stale snapshots degrade drop accuracy but never break
/// the engine: resolved indices are clamped against the live item list
/// at commit time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutSnapshot {
    /// The scrollable container's bounding rectangle.
    pub container: Rect,
    /// The viewport the drag preview is clamped into.
    pub viewport: Rect,
    /// Item layouts in display order.
    pub items: Vec<ItemLayout>,
}

impl LayoutSnapshot {
    /// Snapshot with the viewport defaulting to the container bounds.
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            viewport: container,
            items: Vec::new(),
        }
    }

    /// Set an explicit viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the item layouts.
    #[must_use]
    pub fn with_items(mut self, items: Vec<ItemLayout>) -> Self {
        self.items = items;
        self
    }
}

/// Resolve the nearest insertion index for the cursor.
///
/// Deterministic for fixed inputs and stateless; call it on every move
/// sample.
#[must_use]
pub fn resolve(cursor: Point, items: &[ItemLayout]) -> usize {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (index, layout) in items.iter().enumerate() {
        let distance = cursor.distance_sq(layout.bounds.center());
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

/// Index of the first item whose bounds contain the cursor.
///
/// Used to identify the pressed item on pointer-down.
#[must_use]
pub fn hit_test(cursor: Point, items: &[ItemLayout]) -> Option<usize> {
    items
        .iter()
        .position(|layout| layout.bounds.contains(cursor))
}

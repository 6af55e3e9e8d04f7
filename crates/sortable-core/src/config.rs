#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! All options have documented defaults; out-of-range values are clamped
//! back into range rather than rejected, so a bad host-supplied record
//! can degrade behavior but never fail construction.

use crate::geometry::Axis;

/// Default scroll speed in pixels per autoscroll tick.
pub const DEFAULT_SCROLL_SPEED: f64 = 10.0;

/// Default opacity applied to the dragged item's floating clone.
pub const DEFAULT_DRAG_OPACITY: f64 = 0.7;

/// Default storage key for persisted item order.
pub const DEFAULT_STORAGE_KEY: &str = "sortable:order";

/// Configuration for a sortable container.
#[derive(Debug, Clone, PartialEq)]
pub struct SortableConfig {
    /// Axis the container reorders and scrolls along (default: vertical).
    pub direction: Axis,
    /// When true, drags may only start inside an item's declared handle
    /// sub-region (default: false).
    pub handle: bool,
    /// Whether edge-proximity autoscroll runs during drags (default: true).
    pub auto_scroll: bool,
    /// Scroll offset adjustment per autoscroll tick, in pixels
    /// (default: 10.0; clamped positive).
    pub scroll_speed: f64,
    /// Opacity of the floating drag clone, 0.0..=1.0 (default: 0.7).
    pub drag_opacity: f64,
    /// Whether the floating clone and drop indicator are produced
    /// (default: true).
    pub show_preview: bool,
    /// Whether the committed order is saved to the key-value store
    /// (default: false).
    pub persist_state: bool,
    /// Key the order is stored under (default: `"sortable:order"`).
    pub storage_key: String,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            direction: Axis::Vertical,
            handle: false,
            auto_scroll: true,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            drag_opacity: DEFAULT_DRAG_OPACITY,
            show_preview: true,
            persist_state: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl SortableConfig {
    /// Preset for a vertical sortable list container.
    #[must_use]
    pub fn list() -> Self {
        Self::default()
    }

    /// Preset for a horizontal draggable tab strip.
    #[must_use]
    pub fn tab_strip() -> Self {
        Self {
            direction: Axis::Horizontal,
            ..Self::default()
        }
    }

    /// Set the reorder/scroll axis.
    #[must_use]
    pub fn with_direction(mut self, direction: Axis) -> Self {
        self.direction = direction;
        self
    }

    /// Restrict drag initiation to item handle sub-regions.
    #[must_use]
    pub fn with_handle(mut self) -> Self {
        self.handle = true;
        self
    }

    /// Enable or disable edge autoscroll.
    #[must_use]
    pub fn with_auto_scroll(mut self, enabled: bool) -> Self {
        self.auto_scroll = enabled;
        self
    }

    /// Set the autoscroll speed (non-finite or non-positive values fall
    /// back to the default).
    #[must_use]
    pub fn with_scroll_speed(mut self, speed: f64) -> Self {
        self.scroll_speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_SCROLL_SPEED
        };
        self
    }

    /// Set the drag clone opacity (clamped to 0.0..=1.0; non-finite
    /// values fall back to the default).
    #[must_use]
    pub fn with_drag_opacity(mut self, opacity: f64) -> Self {
        self.drag_opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_DRAG_OPACITY
        };
        self
    }

    /// Enable or disable the drag preview and drop indicator.
    #[must_use]
    pub fn with_preview(mut self, enabled: bool) -> Self {
        self.show_preview = enabled;
        self
    }

    /// Persist the committed order under the given storage key.
    #[must_use]
    pub fn with_persistence(mut self, storage_key: impl Into<String>) -> Self {
        self.persist_state = true;
        self.storage_key = storage_key.into();
        self
    }

    /// Clamp every field back into its documented range.
    ///
    /// Host-supplied configuration records pass through here once at
    /// attach time; construction via the `with_*` builders is already
    /// clamped on set.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(self.scroll_speed.is_finite() && self.scroll_speed > 0.0) {
            self.scroll_speed = DEFAULT_SCROLL_SPEED;
        }
        if self.drag_opacity.is_finite() {
            self.drag_opacity = self.drag_opacity.clamp(0.0, 1.0);
        } else {
            self.drag_opacity = DEFAULT_DRAG_OPACITY;
        }
        if self.storage_key.is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        self
    }
}

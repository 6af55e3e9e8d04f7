#![forbid(unsafe_code)]

//! Drag visual proxy.
//!
//! While a session is alive (and previews are enabled) the engine keeps
//! one [`DragProxy`]: it turns the cursor position into the geometry of
//! a floating clone of the dragged item and a drop indicator at the
//! resolved insertion boundary. The host paints both; the proxy only
//! computes rectangles. The proxy is created on `Dragging` entry and
//! dropped unconditionally on every session exit.

use crate::resolver::ItemLayout;
use sortable_core::config::DEFAULT_DRAG_OPACITY;
use sortable_core::geometry::{Axis, Point, Rect};

/// Visual configuration for the floating clone.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    /// Horizontal offset of the clone from the cursor, in pixels.
    /// Default: 8.0.
    pub offset_x: f64,
    /// Vertical offset of the clone from the cursor, in pixels.
    /// Default: 8.0.
    pub offset_y: f64,
    /// Clone opacity, 0.0..=1.0. Default: 0.7.
    pub opacity: f64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            offset_x: 8.0,
            offset_y: 8.0,
            opacity: DEFAULT_DRAG_OPACITY,
        }
    }
}

impl ProxyConfig {
    /// Set the cursor offset.
    #[must_use]
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the clone opacity (clamped to 0.0..=1.0).
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_DRAG_OPACITY
        };
        self
    }
}

/// A line marking the insertion boundary of the resolved target index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropIndicator {
    /// Top-left end of the line.
    pub start: Point,
    /// Length of the line in pixels.
    pub length: f64,
    /// Direction the line runs: `Horizontal` above items in a vertical
    /// list, `Vertical` beside items in a horizontal strip. Never
    /// `Both`.
    pub orientation: Axis,
}

impl DropIndicator {
    /// Indicator at the insertion boundary of `index`.
    ///
    /// `index == items.len()` marks the trailing boundary after the
    /// last item; larger indices clamp to it. Returns `None` when no
    /// items are rendered.
    #[must_use]
    pub fn at_boundary(items: &[ItemLayout], index: usize, axis: Axis) -> Option<Self> {
        let last = items.last()?.bounds;
        let trailing = index >= items.len();
        let bounds = if trailing {
            last
        } else {
            items[index].bounds
        };
        // Grids fall back to the vertical-list convention.
        if axis.vertical() {
            let y = if trailing { last.bottom() } else { bounds.y };
            Some(Self {
                start: Point::new(bounds.x, y),
                length: bounds.width,
                orientation: Axis::Horizontal,
            })
        } else {
            let x = if trailing { last.right() } else { bounds.x };
            Some(Self {
                start: Point::new(x, bounds.y),
                length: bounds.height,
                orientation: Axis::Vertical,
            })
        }
    }
}

/// Geometry the host paints for one frame of an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyFrame {
    /// Where to paint the floating clone, or `None` when it would fall
    /// fully outside the viewport.
    pub preview: Option<Rect>,
    /// The drop indicator, or `None` when there is no valid target.
    pub indicator: Option<DropIndicator>,
    /// Opacity for the clone.
    pub opacity: f64,
}

/// Per-session proxy for one dragged item.
#[derive(Debug, Clone, PartialEq)]
pub struct DragProxy {
    config: ProxyConfig,
    /// Size of the dragged item's rendered representation; the clone
    /// keeps it.
    source_width: f64,
    source_height: f64,
}

impl DragProxy {
    /// Proxy cloning an item whose bounds were `source` at drag start.
    #[must_use]
    pub fn new(config: ProxyConfig, source: Rect) -> Self {
        Self {
            config,
            source_width: source.width,
            source_height: source.height,
        }
    }

    /// Compute the clone rectangle for the cursor, clamped into the
    /// viewport. `None` when the viewport or clone has no area.
    #[must_use]
    pub fn preview_rect(&self, cursor: Point, viewport: Rect) -> Option<Rect> {
        if viewport.is_empty() || self.source_width <= 0.0 || self.source_height <= 0.0 {
            return None;
        }
        let raw_x = cursor.x + self.config.offset_x;
        let raw_y = cursor.y + self.config.offset_y;

        let max_x = (viewport.right() - self.source_width).max(viewport.x);
        let max_y = (viewport.bottom() - self.source_height).max(viewport.y);
        let x = raw_x.clamp(viewport.x, max_x);
        let y = raw_y.clamp(viewport.y, max_y);

        let width = self.source_width.min(viewport.right() - x);
        let height = self.source_height.min(viewport.bottom() - y);
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Rect::new(x, y, width, height))
    }

    /// Geometry for one frame of the drag.
    #[must_use]
    pub fn frame(
        &self,
        cursor: Point,
        viewport: Rect,
        items: &[ItemLayout],
        resolved: Option<usize>,
        axis: Axis,
    ) -> ProxyFrame {
        ProxyFrame {
            preview: self.preview_rect(cursor, viewport),
            indicator: resolved.and_then(|index| DropIndicator::at_boundary(items, index, axis)),
            opacity: self.config.opacity,
        }
    }
}

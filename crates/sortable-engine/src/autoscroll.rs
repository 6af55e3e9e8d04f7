#![forbid(unsafe_code)]

//! Edge-proximity autoscroll.
//!
//! While a drag is alive, the host drives [`AutoscrollController::poll`]
//! from its timer (~16 ms cadence). When the cursor sits within
//! [`EDGE_THRESHOLD`] of a container edge on the configured axis, the
//! poll yields a speed-sized [`ScrollDelta`] toward that edge, which the
//! engine pushes through the host's [`ScrollPort`].
//!
//! The controller never owns a timer. The session state machine starts
//! it on `Dragging` entry and stops it on session exit; both operations
//! are idempotent, and the start/stop counters exist so a stuck
//! interval shows up in diagnostics instead of in the field.

use sortable_core::geometry::{Axis, Point, Rect};

/// Distance from a container edge, in pixels, inside which autoscroll
/// engages.
pub const EDGE_THRESHOLD: f64 = 50.0;

/// A scroll offset adjustment for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ScrollDelta {
    /// Whether this delta scrolls at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Host-owned scrolling. The engine adjusts the container's scroll
/// offset only through this port.
pub trait ScrollPort {
    /// Adjust the container scroll offset by the given delta.
    fn scroll_by(&mut self, delta: ScrollDelta);
}

/// Polled edge-proximity scroll controller.
#[derive(Debug)]
pub struct AutoscrollController {
    axis: Axis,
    speed: f64,
    running: bool,
    starts: u64,
    stops: u64,
}

impl AutoscrollController {
    /// Controller scrolling along `axis` at `speed` pixels per tick.
    #[must_use]
    pub fn new(axis: Axis, speed: f64) -> Self {
        Self {
            axis,
            speed,
            running: false,
            starts: 0,
            stops: 0,
        }
    }

    /// Begin polling. Starting an already-running controller is a no-op
    /// and does not count a second start.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.starts += 1;
        tracing::debug!(starts = self.starts, "autoscroll started");
    }

    /// Stop polling. Stopping an already-stopped controller is a no-op.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.stops += 1;
        tracing::debug!(stops = self.stops, "autoscroll stopped");
    }

    /// Whether the controller is currently polling.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Diagnostic: number of times the controller transitioned to
    /// running.
    #[must_use]
    pub fn start_count(&self) -> u64 {
        self.starts
    }

    /// Diagnostic: number of times the controller transitioned to
    /// stopped.
    #[must_use]
    pub fn stop_count(&self) -> u64 {
        self.stops
    }

    /// Compute this tick's scroll adjustment.
    ///
    /// Returns `None` while stopped, outside the edge threshold, or for
    /// an empty container. When a container is shorter than two
    /// thresholds the top/left edge wins, so behavior stays
    /// deterministic.
    #[must_use]
    pub fn poll(&self, cursor: Point, container: Rect) -> Option<ScrollDelta> {
        if !self.running || container.is_empty() {
            return None;
        }
        let mut delta = ScrollDelta::default();
        if self.axis.horizontal() {
            if cursor.x < container.left() + EDGE_THRESHOLD {
                delta.dx = -self.speed;
            } else if cursor.x > container.right() - EDGE_THRESHOLD {
                delta.dx = self.speed;
            }
        }
        if self.axis.vertical() {
            if cursor.y < container.top() + EDGE_THRESHOLD {
                delta.dy = -self.speed;
            } else if cursor.y > container.bottom() - EDGE_THRESHOLD {
                delta.dy = self.speed;
            }
        }
        if delta.is_zero() { None } else { Some(delta) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(axis: Axis) -> AutoscrollController {
        let mut c = AutoscrollController::new(axis, 10.0);
        c.start();
        c
    }

    // Tall container: middle is well clear of both thresholds.
    const CONTAINER: Rect = Rect::new(0.0, 0.0, 200.0, 400.0);

    #[test]
    fn no_delta_in_container_middle() {
        let c = controller(Axis::Vertical);
        assert!(c.poll(Point::new(100.0, 200.0), CONTAINER).is_none());
    }

    #[test]
    fn scrolls_up_near_top_edge() {
        let c = controller(Axis::Vertical);
        let delta = c.poll(Point::new(100.0, 10.0), CONTAINER).unwrap();
        assert_eq!(delta, ScrollDelta { dx: 0.0, dy: -10.0 });
    }

    #[test]
    fn scrolls_down_near_bottom_edge() {
        let c = controller(Axis::Vertical);
        let delta = c.poll(Point::new(100.0, 390.0), CONTAINER).unwrap();
        assert_eq!(delta, ScrollDelta { dx: 0.0, dy: 10.0 });
    }

    #[test]
    fn cursor_beyond_edge_still_scrolls() {
        let c = controller(Axis::Vertical);
        let delta = c.poll(Point::new(100.0, 450.0), CONTAINER).unwrap();
        assert_eq!(delta.dy, 10.0);
    }

    #[test]
    fn vertical_axis_ignores_horizontal_edges() {
        let c = controller(Axis::Vertical);
        assert!(c.poll(Point::new(5.0, 200.0), CONTAINER).is_none());
    }

    #[test]
    fn horizontal_axis_scrolls_along_x() {
        let c = controller(Axis::Horizontal);
        let delta = c.poll(Point::new(5.0, 200.0), CONTAINER).unwrap();
        assert_eq!(delta, ScrollDelta { dx: -10.0, dy: 0.0 });
    }

    #[test]
    fn both_axes_can_scroll_diagonally() {
        let c = controller(Axis::Both);
        let delta = c.poll(Point::new(5.0, 10.0), CONTAINER).unwrap();
        assert_eq!(delta, ScrollDelta { dx: -10.0, dy: -10.0 });
    }

    #[test]
    fn stopped_controller_never_scrolls() {
        let mut c = controller(Axis::Both);
        c.stop();
        assert!(c.poll(Point::new(5.0, 10.0), CONTAINER).is_none());
    }

    #[test]
    fn empty_container_never_scrolls() {
        let c = controller(Axis::Both);
        assert!(c.poll(Point::new(0.0, 0.0), Rect::default()).is_none());
    }

    #[test]
    fn start_stop_are_idempotent() {
        let mut c = AutoscrollController::new(Axis::Vertical, 10.0);
        c.stop();
        assert_eq!(c.stop_count(), 0, "stopping while stopped is a no-op");

        c.start();
        c.start();
        assert_eq!(c.start_count(), 1, "double start must not count twice");
        assert!(c.is_running());

        c.stop();
        c.stop();
        assert_eq!(c.stop_count(), 1);
        assert!(!c.is_running());
    }

    #[test]
    fn sequential_sessions_balance_starts_and_stops() {
        let mut c = AutoscrollController::new(Axis::Vertical, 10.0);
        for _ in 0..5 {
            c.start();
            c.stop();
        }
        assert_eq!(c.start_count(), 5);
        assert_eq!(c.stop_count(), 5);
    }

    #[test]
    fn short_container_prefers_top_edge() {
        let c = controller(Axis::Vertical);
        let short = Rect::new(0.0, 0.0, 100.0, 60.0);
        let delta = c.poll(Point::new(50.0, 30.0), short).unwrap();
        assert_eq!(delta.dy, -10.0);
    }
}

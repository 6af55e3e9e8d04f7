#![forbid(unsafe_code)]

//! Drag session lifecycle.
//!
//! The engine's lifecycle is the tagged state `Idle | Dragging(session)`:
//! a second pointer-down while a session is alive is a checked non-event,
//! not a runtime flag test scattered across handlers.
//!
//! # Invariants
//!
//! 1. A session is well-formed: one start, zero or more moves, exactly
//!    one end (commit or cancel).
//! 2. At most one session exists per container at any time.
//! 3. `current_index` is a valid index into the live item list, or
//!    `None` when the cursor has no valid target (outside the container).
//! 4. The session's [`ListenerGrab`] is released exactly once, on every
//!    exit path.

use sortable_core::geometry::Point;
use sortable_core::pointer::PointerSample;

/// Scoped acquisition of the host's document-level move/up listeners.
///
/// The host installs its global listeners when it builds the grab and
/// packs their removal into the teardown closure. The engine releases
/// the grab on every session exit path; if a grab is dropped without an
/// explicit release, the teardown still runs, so listeners can never
/// outlive the session.
pub struct ListenerGrab {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for ListenerGrab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGrab")
            .field("released", &self.teardown.is_none())
            .finish()
    }
}

impl ListenerGrab {
    /// Grab with a teardown to run on release.
    #[must_use]
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Grab for hosts with no listener wiring (tests, headless use).
    #[must_use]
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    /// Run the teardown. Idempotent; only the first call has an effect.
    pub fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Whether the teardown has already run (or never existed).
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.teardown.is_none()
    }
}

impl Drop for ListenerGrab {
    fn drop(&mut self) {
        self.release();
    }
}

/// The transient record of one in-progress reorder gesture.
#[derive(Debug)]
pub struct DragSession {
    /// Id of the item being dragged.
    pub dragging_id: String,
    /// Index the item occupied when the gesture started.
    pub start_index: usize,
    /// Index the item would land at if released now; `None` when the
    /// cursor has no valid target.
    pub current_index: Option<usize>,
    /// Pointer position at gesture start, viewport space.
    pub start_pos: Point,
    /// Most recent pointer position.
    pub current_pos: Point,
    /// Scoped global-listener acquisition for this session.
    grab: ListenerGrab,
}

impl DragSession {
    /// Open a session for the item at `start_index`.
    #[must_use]
    pub fn new(
        dragging_id: impl Into<String>,
        start_index: usize,
        start_pos: Point,
        grab: ListenerGrab,
    ) -> Self {
        Self {
            dragging_id: dragging_id.into(),
            start_index,
            current_index: Some(start_index),
            start_pos,
            current_pos: start_pos,
            grab,
        }
    }

    /// Record a new pointer sample.
    pub fn update_position(&mut self, sample: PointerSample) {
        self.current_pos = sample.pos;
    }

    /// Update the resolved index. Returns `true` when it changed.
    pub fn set_resolved(&mut self, index: Option<usize>) -> bool {
        if self.current_index == index {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Delta from start to current position as `(dx, dy)`.
    #[must_use]
    pub fn delta(&self) -> (f64, f64) {
        self.current_pos.delta(self.start_pos)
    }

    /// Release the session's listener grab. Idempotent.
    pub fn release_grab(&mut self) {
        self.grab.release();
    }

    /// Whether the listener grab has been released.
    #[must_use]
    pub fn grab_released(&self) -> bool {
        self.grab.is_released()
    }
}

/// Engine lifecycle state.
#[derive(Debug, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// One gesture owns the pointer stream.
    Dragging(DragSession),
}

impl DragState {
    /// Whether a session is alive. This is the flag hosts use for
    /// styling hooks.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Mutable access to the live session, if any.
    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Take the session out, leaving `Idle`. Exit paths use this so the
    /// state machine can never observe a half-ended session.
    pub fn take(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }
}

#![forbid(unsafe_code)]

//! Normalized pointer input.
//!
//! Hosts deliver native mouse and touch events as [`PointerEvent`]s; the
//! engine consumes them through [`unify`], which collapses both families
//! into one stream of `{x, y, timestamp}` samples tagged with a
//! down/move/up phase.
//!
//! # Design Notes
//!
//! - Coordinates are viewport-space pixels, 0-indexed at top-left.
//! - Touch events use the first listed touch point; additional fingers
//!   are ignored.
//! - `TouchEnd` carries the touch points that *ended* (the lifted
//!   fingers), not the points still on the surface.
//! - A touch event with no touch points has no coordinates and is
//!   malformed: [`unify`] returns `None` and the event must be dropped
//!   without advancing any session.

use crate::geometry::Point;
use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// A single touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned contact identifier, stable for the contact's lifetime.
    pub id: u64,
    /// X coordinate in viewport space.
    pub x: f64,
    /// Y coordinate in viewport space.
    pub y: f64,
}

impl TouchPoint {
    /// Create a new touch point.
    #[must_use]
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// A native input event as delivered by the host environment.
///
/// Timestamps are host-supplied milliseconds on an arbitrary but
/// monotonic clock.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse button pressed.
    MouseDown {
        x: f64,
        y: f64,
        button: MouseButton,
        modifiers: Modifiers,
        timestamp: f64,
    },
    /// Mouse moved, with or without a button held.
    MouseMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
        timestamp: f64,
    },
    /// Mouse button released.
    MouseUp {
        x: f64,
        y: f64,
        button: MouseButton,
        modifiers: Modifiers,
        timestamp: f64,
    },
    /// Touch contact(s) placed.
    TouchStart {
        touches: Vec<TouchPoint>,
        timestamp: f64,
    },
    /// Touch contact(s) moved.
    TouchMove {
        touches: Vec<TouchPoint>,
        timestamp: f64,
    },
    /// Touch contact(s) lifted. `touches` holds the ended contacts.
    TouchEnd {
        touches: Vec<TouchPoint>,
        timestamp: f64,
    },
}

impl PointerEvent {
    /// Left-button mouse-down at the given position.
    #[must_use]
    pub const fn mouse_down(x: f64, y: f64, timestamp: f64) -> Self {
        Self::MouseDown {
            x,
            y,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            timestamp,
        }
    }

    /// Mouse-move at the given position.
    #[must_use]
    pub const fn mouse_move(x: f64, y: f64, timestamp: f64) -> Self {
        Self::MouseMove {
            x,
            y,
            modifiers: Modifiers::NONE,
            timestamp,
        }
    }

    /// Left-button mouse-up at the given position.
    #[must_use]
    pub const fn mouse_up(x: f64, y: f64, timestamp: f64) -> Self {
        Self::MouseUp {
            x,
            y,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            timestamp,
        }
    }

    /// Whether this event can initiate a drag: any touch, or the left
    /// mouse button. Secondary buttons never start a session.
    #[must_use]
    pub fn primary(&self) -> bool {
        match self {
            Self::MouseDown { button, .. } | Self::MouseUp { button, .. } => {
                *button == MouseButton::Left
            }
            _ => true,
        }
    }

    /// Map a crossterm mouse event into a pointer event.
    ///
    /// Terminal cells have no sub-cell precision, so cell coordinates map
    /// 1:1 onto viewport pixels. Scroll events have no pointer phase and
    /// map to `None`.
    #[cfg(all(feature = "crossterm-events", not(target_arch = "wasm32")))]
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::MouseEvent, timestamp: f64) -> Option<Self> {
        use crossterm::event as cte;

        let x = f64::from(event.column);
        let y = f64::from(event.row);
        let modifiers = map_crossterm_modifiers(event.modifiers);
        match event.kind {
            cte::MouseEventKind::Down(button) => Some(Self::MouseDown {
                x,
                y,
                button: map_crossterm_button(button),
                modifiers,
                timestamp,
            }),
            cte::MouseEventKind::Drag(_) | cte::MouseEventKind::Moved => Some(Self::MouseMove {
                x,
                y,
                modifiers,
                timestamp,
            }),
            cte::MouseEventKind::Up(button) => Some(Self::MouseUp {
                x,
                y,
                button: map_crossterm_button(button),
                modifiers,
                timestamp,
            }),
            _ => None,
        }
    }
}

#[cfg(all(feature = "crossterm-events", not(target_arch = "wasm32")))]
fn map_crossterm_button(button: crossterm::event::MouseButton) -> MouseButton {
    use crossterm::event as cte;
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(all(feature = "crossterm-events", not(target_arch = "wasm32")))]
fn map_crossterm_modifiers(modifiers: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event as cte;
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

/// Where a unified sample sits in the press/drag/release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer-down / touch-start.
    Down,
    /// Pointer-move / touch-move.
    Move,
    /// Pointer-up / touch-end.
    Up,
}

/// A normalized pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Position in viewport space.
    pub pos: Point,
    /// Host-supplied timestamp in milliseconds.
    pub timestamp: f64,
}

impl PointerSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(pos: Point, timestamp: f64) -> Self {
        Self { pos, timestamp }
    }
}

/// Collapse a native event into a normalized sample and phase.
///
/// Touch events use the first listed touch point. Returns `None` for
/// events with no usable coordinates; callers drop those silently.
#[must_use]
pub fn unify(event: &PointerEvent) -> Option<(PointerPhase, PointerSample)> {
    let (phase, x, y, timestamp) = match event {
        PointerEvent::MouseDown { x, y, timestamp, .. } => (PointerPhase::Down, *x, *y, *timestamp),
        PointerEvent::MouseMove { x, y, timestamp, .. } => (PointerPhase::Move, *x, *y, *timestamp),
        PointerEvent::MouseUp { x, y, timestamp, .. } => (PointerPhase::Up, *x, *y, *timestamp),
        PointerEvent::TouchStart { touches, timestamp } => {
            let first = touches.first()?;
            (PointerPhase::Down, first.x, first.y, *timestamp)
        }
        PointerEvent::TouchMove { touches, timestamp } => {
            let first = touches.first()?;
            (PointerPhase::Move, first.x, first.y, *timestamp)
        }
        PointerEvent::TouchEnd { touches, timestamp } => {
            let first = touches.first()?;
            (PointerPhase::Up, first.x, first.y, *timestamp)
        }
    };
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some((phase, PointerSample::new(Point::new(x, y), timestamp)))
}

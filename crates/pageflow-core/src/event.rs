#![forbid(unsafe_code)]

//! Canonical pointer events.
//!
//! The pager consumes one logical pointer stream. Multi-touch is reduced to
//! what the paging gesture needs: the first pointer down starts a session,
//! further pointers are tracked only so that the session can move on to a
//! remaining pointer when the tracked one lifts.
//!
//! # Invariants
//!
//! 1. A session is `Down` → zero or more `Move` / `SecondaryUp` → `Up` or
//!    `Cancel`.
//! 2. `Up` carries an optional release velocity in px/s (positive = the
//!    pointer moved toward +x). When absent the consumer derives one from
//!    its own tracker.

use web_time::Instant;

use crate::geometry::Point;

/// Identifier of a physical pointer (finger, stylus, mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u32);

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    /// First pointer touched down.
    Down,
    /// A pointer moved.
    Move,
    /// The last pointer lifted.
    Up {
        /// Release velocity along x in px/s, if the platform measured one.
        velocity: Option<f32>,
    },
    /// The platform took the gesture away (e.g. a parent intercepted it).
    Cancel,
    /// A non-final pointer lifted; `replacement` is a pointer still down.
    SecondaryUp {
        replacement: PointerId,
        replacement_pos: Point,
    },
}

/// A pointer event with the position of the pointer it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub kind: PointerEventKind,
    pub pos: Point,
    pub time: Instant,
}

impl PointerEvent {
    /// Create a new event.
    #[must_use]
    pub const fn new(pointer: PointerId, kind: PointerEventKind, pos: Point, time: Instant) -> Self {
        Self {
            pointer,
            kind,
            pos,
            time,
        }
    }

    /// Primary-pointer down at `pos`.
    #[must_use]
    pub fn down(pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(PointerId(0), PointerEventKind::Down, pos.into(), time)
    }

    /// Primary-pointer move to `pos`.
    #[must_use]
    pub fn moved(pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(PointerId(0), PointerEventKind::Move, pos.into(), time)
    }

    /// Primary-pointer up at `pos` with an optional measured velocity.
    #[must_use]
    pub fn up(pos: impl Into<Point>, velocity: Option<f32>, time: Instant) -> Self {
        Self::new(
            PointerId(0),
            PointerEventKind::Up { velocity },
            pos.into(),
            time,
        )
    }

    /// Cancellation of the current session.
    #[must_use]
    pub fn cancel(time: Instant) -> Self {
        Self::new(
            PointerId(0),
            PointerEventKind::Cancel,
            Point::default(),
            time,
        )
    }

    /// Whether this event ends the pointer session.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Up { .. } | PointerEventKind::Cancel
        )
    }
}

/// Horizontal direction of a discrete navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

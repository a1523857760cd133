#![forbid(unsafe_code)]

//! Gesture classification: turns a pointer stream into paging decisions.
//!
//! [`GestureClassifier`] owns the live touch session. It decides when a press
//! becomes a scroll, accumulates drag deltas with sub-pixel carry, tracks
//! release velocity, and on release picks a destination. It does not touch
//! scroll state itself: each call returns the [`GestureAction`]s the pager
//! should carry out, in order.
//!
//! # State Machine
//!
//! ```text
//!            press in edge strip          move > slop
//!   REST ──────────────────────► EDGE ─────────────────┐
//!    │ ▲                                               ▼
//!    │ └──────── up / cancel ◄──────────────────── SCROLLING
//!    │                                                 ▲
//!    │ move > slop, or press while a snap is in flight │
//!    └─────────────────────────────────────────────────┘
//!   REST ── long press ──► REORDERING ── up / cancel ──► REST
//! ```
//!
//! # Invariants
//!
//! 1. At most one touch session is live. A second `Down` without a terminal
//!    event replaces it.
//! 2. `ScrollBy` deltas are whole pixels; the fractional remainder is carried
//!    into the next move, so no motion is lost.
//! 3. A tap (`Tap`) is only reported from REST and never after a long press.
//! 4. After `Up` or `Cancel` the classifier is back at REST with an empty
//!    velocity history.
//!
//! # Failure Modes
//!
//! - Events for a pointer other than the tracked one are ignored.
//! - A `Move` with no live session is ignored (the `Down` was missed).
//! - A press outside the viewport widened by half a viewport on each side
//!   never becomes a scroll; it can only end as a tap.

use pageflow_core::event::{PointerEvent, PointerEventKind, PointerId};
use pageflow_core::geometry::{Insets, Point, Rect};
use pageflow_core::velocity::VelocityTracker;
use web_time::Instant;

use crate::config::PagerConfig;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Where the touch session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Rest,
    Scrolling,
    /// Pressed in the strip that leads to the previous page.
    EdgePrev,
    /// Pressed in the strip that leads to the next page.
    EdgeNext,
    Reordering,
}

/// How a released scroll should settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseDecision {
    /// Snap to `page` with a duration derived from `velocity` (px/s).
    SnapWithVelocity { page: usize, velocity: f32 },
    /// Snap to whichever page is closest to the viewport centre.
    SnapToNearest,
    /// Snap to `page` with the default duration.
    SnapTo(usize),
    /// Free-scroll fling; `velocity` is in offset units per second.
    Fling { velocity: f32 },
}

/// Work the pager performs on behalf of the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    /// A snap was in flight but nearly done: make its destination current.
    SettleSnap,
    /// Stop the snap in flight where it is. Its destination stays pending.
    CatchSnap,
    /// The session became a scroll.
    BeginScroll,
    /// Move the scroll offset by this many pixels.
    ScrollBy(i32),
    /// The dragged page's pointer moved.
    Drag(Point),
    /// The pointer lifted; settle as decided.
    Release(ReleaseDecision),
    /// The scroll interaction is over.
    EndScroll,
    /// End an active reorder.
    EndReorder,
    /// A press and release that never became anything else.
    Tap(Point),
}

/// Left and right tap strips, in container x coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeZones {
    /// Presses with `x` below this fall in the left strip.
    pub left: f32,
    /// Presses with `x` above this fall in the right strip.
    pub right: f32,
    pub rtl: bool,
}

impl EdgeZones {
    #[must_use]
    pub fn new(viewport: Rect, insets: Insets, spacing: i32, margin: i32, rtl: bool) -> Self {
        Self {
            left: (viewport.left() + insets.left + spacing + margin) as f32,
            right: (viewport.right() - insets.right - spacing - margin) as f32,
            rtl,
        }
    }

    /// Strips that never match.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            left: f32::NEG_INFINITY,
            right: f32::INFINITY,
            rtl: false,
        }
    }

    /// Edge state for a press at `x`, if it lands in a strip.
    #[must_use]
    pub fn classify(&self, x: f32) -> Option<TouchState> {
        let (on_left, on_right) = (x < self.left, x > self.right);
        match (on_left, on_right, self.rtl) {
            (true, _, false) | (_, true, true) => Some(TouchState::EdgePrev),
            (_, true, false) | (true, _, true) => Some(TouchState::EdgeNext),
            _ => None,
        }
    }
}

/// Snapshot of pager state the classifier needs to decide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub scroll_offset: i32,
    /// A snap or fling is in flight.
    pub snap_in_flight: bool,
    /// Distance the in-flight motion has left to travel.
    pub snap_remaining: f32,
    pub viewport: Rect,
    pub edges: EdgeZones,
    pub current_page: usize,
    pub page_count: usize,
    /// Width of the current page.
    pub page_width: i32,
    pub rtl: bool,
    pub free_scroll: bool,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct TouchSession {
    pointer: PointerId,
    down: Point,
    down_scroll: i32,
    last: Point,
    remainder: f32,
    total_motion: f32,
    state: TouchState,
    /// The press landed inside the viewport widened by half its width.
    in_buffer: bool,
}

/// Tracks one touch session at a time.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    touch_slop: f32,
    touch_slop_scale: f32,
    min_length_for_fling: f32,
    fling_threshold: f32,
    max_velocity: f32,
    significant_move: f32,
    return_to_original: f32,
    session: Option<TouchSession>,
    velocity: VelocityTracker,
    cancel_tap: bool,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(config: &PagerConfig) -> Self {
        Self {
            touch_slop: config.touch_slop_px(),
            touch_slop_scale: 1.0,
            min_length_for_fling: config.min_length_for_fling_px(),
            fling_threshold: config.fling_threshold_px(),
            max_velocity: config.max_fling_velocity_px(),
            significant_move: config.significant_move_threshold,
            return_to_original: config.return_to_original_threshold,
            session: None,
            velocity: VelocityTracker::new(),
            cancel_tap: false,
        }
    }

    /// Current state; REST when no pointer is down.
    #[inline]
    #[must_use]
    pub fn state(&self) -> TouchState {
        self.session.map_or(TouchState::Rest, |s| s.state)
    }

    /// Whether a pointer is down.
    #[inline]
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Where the tracked pointer went down and the offset at that moment.
    #[must_use]
    pub fn anchor(&self) -> Option<(Point, i32)> {
        self.session.map(|s| (s.down, s.down_scroll))
    }

    /// Last position of the tracked pointer.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.session.map(|s| s.last)
    }

    /// Scale the touch slop for subsequent scroll-start checks.
    pub fn set_touch_slop_scale(&mut self, scale: f32) {
        self.touch_slop_scale = scale.max(0.0);
    }

    /// Suppress the tap for the current session (a long press fired).
    pub fn cancel_tap(&mut self) {
        self.cancel_tap = true;
    }

    /// Move a resting session into REORDERING.
    ///
    /// Returns `false` unless a pointer is down and the session is at REST.
    pub fn enter_reordering(&mut self) -> bool {
        match &mut self.session {
            Some(s) if s.state == TouchState::Rest => {
                s.state = TouchState::Reordering;
                true
            }
            _ => false,
        }
    }

    /// Drop the session without producing any actions.
    pub fn reset(&mut self) {
        self.session = None;
        self.velocity.clear();
        self.cancel_tap = false;
    }

    /// Classify one pointer event.
    pub fn process(&mut self, event: &PointerEvent, ctx: &GestureContext) -> Vec<GestureAction> {
        let mut out = Vec::new();
        match event.kind {
            PointerEventKind::Down => self.on_down(event, ctx, &mut out),
            PointerEventKind::Move => self.on_move(event, &mut out),
            PointerEventKind::Up { velocity } => self.on_up(event, velocity, ctx, &mut out),
            PointerEventKind::Cancel => self.on_cancel(&mut out),
            PointerEventKind::SecondaryUp {
                replacement,
                replacement_pos,
            } => self.on_secondary_up(event.pointer, replacement, replacement_pos),
        }
        out
    }

    // --- Handlers -----------------------------------------------------------

    fn on_down(&mut self, event: &PointerEvent, ctx: &GestureContext, out: &mut Vec<GestureAction>) {
        self.velocity.clear();
        self.velocity.add(event.time, event.pos.x);
        self.cancel_tap = false;

        let in_buffer = ctx
            .viewport
            .expand_x(ctx.viewport.width / 2)
            .contains(event.pos);
        let state = if ctx.snap_in_flight && ctx.snap_remaining >= self.touch_slop / 3.0 {
            out.push(GestureAction::CatchSnap);
            if in_buffer {
                out.push(GestureAction::BeginScroll);
                TouchState::Scrolling
            } else {
                TouchState::Rest
            }
        } else {
            if ctx.snap_in_flight {
                out.push(if ctx.free_scroll {
                    GestureAction::CatchSnap
                } else {
                    GestureAction::SettleSnap
                });
            }
            ctx.edges
                .classify(event.pos.x)
                .filter(|_| in_buffer)
                .unwrap_or(TouchState::Rest)
        };

        tracing::trace!(
            target: "pageflow.gesture",
            x = event.pos.x,
            ?state,
            in_buffer,
            "pointer down"
        );
        self.session = Some(TouchSession {
            pointer: event.pointer,
            down: event.pos,
            down_scroll: ctx.scroll_offset,
            last: event.pos,
            remainder: 0.0,
            total_motion: 0.0,
            state,
            in_buffer,
        });
    }

    fn on_move(&mut self, event: &PointerEvent, out: &mut Vec<GestureAction>) {
        let slop = (self.touch_slop * self.touch_slop_scale).round();
        let Some(s) = self.session.as_mut().filter(|s| s.pointer == event.pointer) else {
            return;
        };
        self.velocity.add(event.time, event.pos.x);
        let x = event.pos.x;

        match s.state {
            TouchState::Scrolling => {
                let delta = s.last.x + s.remainder - x;
                s.total_motion += delta.abs();
                if delta.abs() >= 1.0 {
                    out.push(GestureAction::ScrollBy(delta as i32));
                    s.last = event.pos;
                    s.remainder = delta - delta.trunc();
                }
            }
            TouchState::Reordering => {
                s.last = event.pos;
                out.push(GestureAction::Drag(event.pos));
            }
            TouchState::Rest | TouchState::EdgePrev | TouchState::EdgeNext => {
                if s.in_buffer && s.last.dx_abs(event.pos) > slop {
                    s.state = TouchState::Scrolling;
                    s.total_motion += s.last.dx_abs(event.pos);
                    s.last = event.pos;
                    s.remainder = 0.0;
                    tracing::debug!(target: "pageflow.gesture", x, "scroll started");
                    out.push(GestureAction::BeginScroll);
                }
            }
        }
    }

    fn on_up(
        &mut self,
        event: &PointerEvent,
        velocity: Option<f32>,
        ctx: &GestureContext,
        out: &mut Vec<GestureAction>,
    ) {
        let Some(s) = self.session.filter(|s| s.pointer == event.pointer) else {
            self.reset();
            return;
        };
        match s.state {
            TouchState::Scrolling => {
                let velocity = match velocity {
                    Some(v) if v.is_finite() => v.clamp(-self.max_velocity, self.max_velocity),
                    _ => {
                        self.velocity.add(event.time, event.pos.x);
                        self.velocity.velocity_with_max(self.max_velocity)
                    }
                };
                let total_motion = s.total_motion + (s.last.x + s.remainder - event.pos.x).abs();
                let decision = self.decide_release(s.down, event.pos, velocity, total_motion, ctx);
                tracing::debug!(
                    target: "pageflow.gesture",
                    velocity,
                    total_motion,
                    ?decision,
                    "scroll released"
                );
                out.push(GestureAction::Release(decision));
                out.push(GestureAction::EndScroll);
            }
            TouchState::EdgePrev => {
                let page = ctx.current_page.saturating_sub(1);
                out.push(GestureAction::Release(if page != ctx.current_page {
                    ReleaseDecision::SnapTo(page)
                } else {
                    ReleaseDecision::SnapToNearest
                }));
            }
            TouchState::EdgeNext => {
                let page = ctx.current_page + 1;
                out.push(GestureAction::Release(if page < ctx.page_count {
                    ReleaseDecision::SnapTo(page)
                } else {
                    ReleaseDecision::SnapToNearest
                }));
            }
            TouchState::Reordering => {
                out.push(GestureAction::Drag(event.pos));
                out.push(GestureAction::EndReorder);
            }
            TouchState::Rest => {
                if !self.cancel_tap {
                    out.push(GestureAction::Tap(event.pos));
                }
            }
        }
        self.reset();
    }

    fn on_cancel(&mut self, out: &mut Vec<GestureAction>) {
        match self.state() {
            TouchState::Scrolling => {
                out.push(GestureAction::Release(ReleaseDecision::SnapToNearest));
                out.push(GestureAction::EndScroll);
            }
            TouchState::Reordering => out.push(GestureAction::EndReorder),
            _ => {}
        }
        tracing::trace!(target: "pageflow.gesture", "pointer cancelled");
        self.reset();
    }

    fn on_secondary_up(&mut self, lifted: PointerId, replacement: PointerId, pos: Point) {
        let Some(s) = self.session.as_mut() else {
            return;
        };
        if s.pointer != lifted {
            return;
        }
        s.pointer = replacement;
        s.down = pos;
        s.last = pos;
        s.remainder = 0.0;
        self.velocity.clear();
        tracing::trace!(target: "pageflow.gesture", pointer = replacement.0, "tracking moved to remaining pointer");
    }

    // --- Release ------------------------------------------------------------

    fn decide_release(
        &self,
        down: Point,
        up: Point,
        velocity: f32,
        total_motion: f32,
        ctx: &GestureContext,
    ) -> ReleaseDecision {
        if ctx.free_scroll {
            return ReleaseDecision::Fling {
                velocity: -velocity,
            };
        }

        let delta_x = (up.x - down.x) as i32;
        let page_width = ctx.page_width as f32;
        let significant = delta_x.abs() as f32 > page_width * self.significant_move;
        let is_fling =
            total_motion > self.min_length_for_fling && velocity.abs() > self.fling_threshold;
        let return_to_original = delta_x.abs() as f32 > page_width * self.return_to_original
            && sign(velocity) != sign(delta_x as f32)
            && is_fling;

        // "Left" is toward higher page indices: finger moving left in LTR.
        let (drag_left, fling_left) = if ctx.rtl {
            (delta_x > 0, velocity > 0.0)
        } else {
            (delta_x < 0, velocity < 0.0)
        };

        let current = ctx.current_page;
        let to_prev = (significant && !drag_left && !is_fling) || (is_fling && !fling_left);
        let to_next = (significant && drag_left && !is_fling) || (is_fling && fling_left);

        if to_prev && current > 0 {
            ReleaseDecision::SnapWithVelocity {
                page: if return_to_original { current } else { current - 1 },
                velocity,
            }
        } else if to_next && current + 1 < ctx.page_count {
            ReleaseDecision::SnapWithVelocity {
                page: if return_to_original { current } else { current + 1 },
                velocity,
            }
        } else {
            ReleaseDecision::SnapToNearest
        }
    }
}

/// Sign of `v` with zero mapping to zero.
fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#![forbid(unsafe_code)]

//! Drag-to-reorder.
//!
//! [`ReorderController`] lifts one page, follows the pointer, and once the
//! dragged page has hovered over another slot for a short, stable interval,
//! moves it there while its neighbours slide over to close the gap.
//!
//! # State Machine
//!
//! ```text
//!   IDLE ──start_drag──► DRAGGING ──end_drag──► SETTLING ──(2 done)──► IDLE
//!                          │    ▲
//!                          └────┘ reposition
//! ```
//!
//! SETTLING waits for two things: the settle snap of the scroll offset and
//! the drop animation of the dragged page. Whichever finishes last ends the
//! session.
//!
//! # Invariants
//!
//! 1. At most one session. `start_drag` while not IDLE is refused.
//! 2. A reposition is atomic: neighbour shifts are computed from the layout
//!    before the move, the host moves the page, and the dragged index is
//!    updated in one call.
//! 3. A reposition only fires when no scroll animation is in flight.
//! 4. `end_drag` without a drag in progress does nothing.

use pageflow_core::animation::{Tween, ease_out, linear};
use pageflow_core::geometry::Point;
use web_time::Instant;

use crate::config::ReorderConfig;
use crate::error::ReorderRejected;
use crate::events::{DragTransform, PagerEvent};
use crate::host::PageHost;
use crate::scroll_model::ScrollModel;

/// Where the drag is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Pointer position when the touch went down.
    pub down: Point,
    /// Scroll offset when the touch went down.
    pub down_scroll: i32,
    /// Latest pointer position.
    pub pointer: Point,
}

#[derive(Debug, Clone, Copy)]
struct PendingHover {
    index: usize,
    due: Instant,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    index: usize,
    range: (usize, usize),
    anchor: DragAnchor,
    baseline_left: i32,
    lift: Tween,
    hover: Option<PendingHover>,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Settling { index: usize, remaining: u8 },
}

#[derive(Debug, Clone, Copy)]
struct Landing {
    index: usize,
    from: DragTransform,
    tween: Tween,
}

/// Drives one drag-to-reorder session at a time.
#[derive(Debug, Clone)]
pub struct ReorderController {
    config: ReorderConfig,
    phase: Phase,
    /// Per-slot neighbour shift, keyed by current slot.
    shifts: Vec<Option<Tween>>,
    drop: Option<Landing>,
}

impl ReorderController {
    #[must_use]
    pub fn new(config: &ReorderConfig) -> Self {
        Self {
            config: config.clone(),
            phase: Phase::Idle,
            shifts: Vec::new(),
            drop: None,
        }
    }

    /// A session is in progress (dragging or settling).
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Slot of the page being dragged or settled.
    #[must_use]
    pub fn dragged_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Idle => None,
            Phase::Dragging(s) => Some(s.index),
            Phase::Settling { index, .. } => Some(index),
        }
    }

    /// Whether any neighbour shift or drop animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.drop.is_some() || self.shifts.iter().any(Option::is_some)
    }

    /// Match the shift table to a new page count.
    pub fn resize(&mut self, count: usize) {
        self.shifts.resize(count, None);
    }

    /// Lift the page at `index`.
    pub fn start_drag(
        &mut self,
        index: usize,
        range: (usize, usize),
        anchor: DragAnchor,
        model: &ScrollModel,
        now: Instant,
    ) -> Result<(), ReorderRejected> {
        if self.is_active() {
            return Err(ReorderRejected::Busy);
        }
        let (first, last) = range;
        if index < first || index > last || index >= model.page_count() {
            return Err(ReorderRejected::OutOfRange { index, first, last });
        }
        self.shifts.resize(model.page_count(), None);
        let lift = Tween::new(
            1.0,
            self.config.pickup_scale,
            self.config.pickup_duration(),
            now,
        )
        .easing(ease_out);
        self.phase = Phase::Dragging(DragSession {
            index,
            range,
            anchor,
            baseline_left: model.page_left(index),
            lift,
            hover: None,
        });
        tracing::debug!(target: "pageflow.reorder", index, first, last, "drag started");
        Ok(())
    }

    /// Follow the pointer.
    pub fn drag_to(&mut self, pos: Point) {
        if let Phase::Dragging(s) = &mut self.phase {
            s.anchor.pointer = pos;
        }
    }

    /// Transform of the dragged page at `now`.
    #[must_use]
    pub fn drag_transform(&self, model: &ScrollModel, now: Instant) -> Option<DragTransform> {
        let Phase::Dragging(s) = &self.phase else {
            return None;
        };
        Some(Self::transform_of(s, model, now))
    }

    fn transform_of(s: &DragSession, model: &ScrollModel, now: Instant) -> DragTransform {
        let a = &s.anchor;
        let scrolled = (model.offset() - a.down_scroll) as f32;
        let slot_moved = (s.baseline_left - model.page_left(s.index)) as f32;
        DragTransform {
            translate_x: a.pointer.x - a.down.x + scrolled + slot_moved,
            translate_y: a.pointer.y - a.down.y,
            scale: s.lift.value_at(now),
        }
    }

    /// Re-evaluate which slot the dragged page hovers over.
    ///
    /// A new candidate starts the hover timer, but only while no scroll
    /// animation is in flight.
    pub fn update_hover(&mut self, model: &ScrollModel, animating: bool, now: Instant) {
        let timeout = self.config.hover_timeout();
        let Phase::Dragging(s) = &mut self.phase else {
            return;
        };
        let tx = Self::transform_of(s, model, now).translate_x;
        let drag_center =
            model.page_left(s.index) as f32 + model.page_width(s.index) as f32 / 2.0 + tx;

        let (first, last) = s.range;
        let last = last.min(model.page_count().saturating_sub(1));
        let hovered = (first..=last)
            .min_by(|&a, &b| {
                let da = (page_center(model, a) - drag_center).abs();
                let db = (page_center(model, b) - drag_center).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(s.index);

        if hovered == s.index {
            s.hover = None;
            return;
        }
        match s.hover {
            Some(p) if p.index == hovered => {}
            _ if !animating => {
                tracing::trace!(target: "pageflow.reorder", hovered, "hover candidate");
                s.hover = Some(PendingHover {
                    index: hovered,
                    due: now + timeout,
                });
            }
            _ => s.hover = None,
        }
    }

    /// The slot the dragged page should move to, once the hover timer has
    /// run out with no scroll animation in flight.
    pub fn take_due_hover(&mut self, animating: bool, now: Instant) -> Option<usize> {
        let Phase::Dragging(s) = &mut self.phase else {
            return None;
        };
        match s.hover {
            Some(p) if p.due <= now && !animating => {
                s.hover = None;
                Some(p.index)
            }
            _ => None,
        }
    }

    /// Move the dragged page to slot `to`.
    ///
    /// Pages between the two slots start sliding from where they were
    /// toward their new slot. The caller must re-run layout afterwards.
    pub fn reposition<H: PageHost>(
        &mut self,
        host: &mut H,
        model: &ScrollModel,
        to: usize,
        now: Instant,
    ) -> Option<(usize, usize)> {
        let Phase::Dragging(s) = &mut self.phase else {
            return None;
        };
        let from = s.index;
        let n = model.page_count();
        if from == to || to >= n {
            return None;
        }
        self.shifts.resize(n, None);

        let (lower, upper, toward): (usize, usize, isize) = if from < to {
            (from + 1, to, -1)
        } else {
            (to, from - 1, 1)
        };
        let duration = self.config.reposition_duration();
        for i in lower..=upper {
            let dest = i.saturating_add_signed(toward);
            let dx = (model.page_left(i) - model.page_left(dest)) as f32;
            self.shifts[i] = Some(Tween::new(dx, 0.0, duration, now).easing(ease_out));
        }
        let moved = self.shifts.remove(from);
        self.shifts.insert(to, moved);

        host.move_page(from, to);
        s.index = to;
        s.hover = None;
        tracing::debug!(target: "pageflow.reorder", from, to, "page repositioned");
        Some((from, to))
    }

    /// Drop the dragged page. Returns the slot the scroll should settle on.
    pub fn end_drag(&mut self, model: &ScrollModel, now: Instant) -> Option<usize> {
        let Phase::Dragging(s) = self.phase else {
            return None;
        };
        let from = Self::transform_of(&s, model, now);
        self.drop = Some(Landing {
            index: s.index,
            from,
            tween: Tween::new(0.0, 1.0, self.config.drop_duration(), now).easing(linear),
        });
        self.phase = Phase::Settling {
            index: s.index,
            remaining: 2,
        };
        tracing::debug!(target: "pageflow.reorder", index = s.index, "drag ended, settling");
        Some(s.index)
    }

    /// The settle snap finished. Returns `true` if that ended the session.
    pub fn on_settle_snap_done(&mut self) -> bool {
        self.count_down()
    }

    fn count_down(&mut self) -> bool {
        let Phase::Settling { index, remaining } = &mut self.phase else {
            return false;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return false;
        }
        tracing::debug!(target: "pageflow.reorder", index = *index, "reorder finished");
        self.phase = Phase::Idle;
        true
    }

    /// Emit this frame's shift and drag transforms. Returns `true` if the
    /// drop animation finishing ended the session.
    pub fn tick(&mut self, model: &ScrollModel, now: Instant, out: &mut Vec<PagerEvent>) -> bool {
        for (index, slot) in self.shifts.iter_mut().enumerate() {
            let Some(tween) = slot else { continue };
            out.push(PagerEvent::PageTranslated {
                index,
                dx: tween.value_at(now),
            });
            if tween.status_at(now).is_done() {
                *slot = None;
            }
        }

        if let Phase::Dragging(s) = &self.phase {
            out.push(PagerEvent::DraggedPage {
                index: s.index,
                transform: Self::transform_of(s, model, now),
            });
        }

        let Some(drop) = self.drop else {
            return false;
        };
        let t = drop.tween.value_at(now);
        out.push(PagerEvent::DraggedPage {
            index: drop.index,
            transform: drop.from.lerp(DragTransform::IDENTITY, ease_out(t)),
        });
        if !drop.tween.status_at(now).is_done() {
            return false;
        }
        self.drop = None;
        self.count_down()
    }
}

fn page_center(model: &ScrollModel, index: usize) -> f32 {
    model.page_left(index) as f32 + model.page_width(index) as f32 / 2.0
}

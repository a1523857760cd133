#![forbid(unsafe_code)]

//! The pager: one object the host feeds with input and frames.
//!
//! [`Pager`] wires the components together. Pointer events go through the
//! [`GestureClassifier`], whose actions drive the [`ScrollModel`], the
//! [`SnapAnimator`], and the [`ReorderController`]. Frames (`tick`) advance
//! every animation from wall-clock time and report what changed.
//!
//! # Event delivery
//!
//! Every mutation queues [`PagerEvent`]s. [`Pager::on_pointer`] and
//! [`Pager::tick`] return the queue drained; other entry points leave events
//! queued for the next drain or an explicit [`Pager::take_events`].
//!
//! # Invariants
//!
//! 1. With no pages or a zero-width viewport the pager is inert: input and
//!    navigation requests are ignored.
//! 2. `PageBeginMoving` and `PageEndMoving` alternate, starting with begin.
//! 3. Page indicator updates are held back while a reorder is in progress,
//!    except for the explicit update after each reposition.
//!
//! # Example
//!
//! ```
//! use pageflow::{MemoryHost, Pager, PagerConfig, PagerEvent};
//! use web_time::{Duration, Instant};
//!
//! let mut pager = Pager::new(PagerConfig::default(), MemoryHost::uniform(3, 1000, 800)).unwrap();
//! let t0 = Instant::now();
//! pager.snap_to_page(1, t0);
//! let events = pager.tick(t0 + Duration::from_millis(750));
//! assert!(events.contains(&PagerEvent::PageSettled { page: 1 }));
//! assert_eq!(pager.current_page(), 1);
//! ```

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use pageflow_core::event::{Direction, PointerEvent};
use web_time::{Duration, Instant};

use crate::accessibility::{
    AccessibilityAction, AccessibilityBridge, AccessibilityInfo, AccessibilitySink, ScrollEvent,
};
use crate::config::PagerConfig;
use crate::error::{PagerError, ReorderRejected, Result};
use crate::events::PagerEvent;
use crate::gesture::{
    EdgeZones, GestureAction, GestureClassifier, GestureContext, ReleaseDecision, TouchState,
};
use crate::host::{PageExtent, PageHost};
use crate::indicator::{PageIndicator, PageIndicatorSync};
use crate::reorder::{DragAnchor, ReorderController};
use crate::scroll_model::ScrollModel;
use crate::snap::{SnapAnimator, SnapTick};

/// State worth keeping across a rebuild of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
pub struct SavedState {
    pub current_page: usize,
}

#[derive(Debug, Clone, Copy)]
enum SnapRequest {
    Default,
    Duration(Duration),
    Velocity(f32),
}

/// Horizontally paged container engine.
#[derive(Debug)]
pub struct Pager<H: PageHost> {
    config: PagerConfig,
    host: H,
    model: ScrollModel,
    snap: SnapAnimator,
    gesture: GestureClassifier,
    reorder: ReorderController,
    indicator: PageIndicatorSync,
    a11y: AccessibilityBridge,
    events: Vec<PagerEvent>,

    page_moving: bool,
    first_layout: bool,
    last_page_count: usize,
    restore_page: Option<usize>,
    last_center: Option<i32>,
    force_scrolled: bool,
    last_overscroll: f32,
}

impl<H: PageHost> Pager<H> {
    /// Validate `config`, take ownership of `host`, and run the first layout.
    pub fn new(config: PagerConfig, host: H) -> Result<Self> {
        let problems = config.validate();
        if !problems.is_empty() {
            tracing::warn!(target: "pageflow.pager", ?problems, "rejecting pager configuration");
            return Err(PagerError::InvalidConfig { problems });
        }
        let mut pager = Self {
            model: ScrollModel::new(config.overscroll.allow, config.overscroll.damp_factor),
            snap: SnapAnimator::new(&config),
            gesture: GestureClassifier::new(&config),
            reorder: ReorderController::new(&config.reorder),
            indicator: PageIndicatorSync::new(),
            a11y: AccessibilityBridge::new(),
            events: Vec::new(),
            page_moving: false,
            first_layout: true,
            last_page_count: 0,
            restore_page: None,
            last_center: None,
            force_scrolled: true,
            last_overscroll: 0.0,
            config,
            host,
        };
        pager.layout();
        Ok(pager)
    }

    /// Attach a page indicator (builder pattern).
    #[must_use]
    pub fn with_indicator(mut self, indicator: Box<dyn PageIndicator>) -> Self {
        self.set_indicator(indicator);
        self
    }

    /// Attach an accessibility sink (builder pattern).
    #[must_use]
    pub fn with_accessibility(mut self, sink: Box<dyn AccessibilitySink>) -> Self {
        self.a11y.attach(sink);
        self
    }

    /// Attach a page indicator and bring it up to date.
    pub fn set_indicator(&mut self, indicator: Box<dyn PageIndicator>) {
        let description = self.describe(self.model.next_page());
        self.indicator.attach(
            indicator,
            self.model.page_count(),
            self.model.next_page(),
            &description,
        );
    }

    pub fn take_indicator(&mut self) -> Option<Box<dyn PageIndicator>> {
        self.indicator.detach()
    }

    pub fn take_accessibility(&mut self) -> Option<Box<dyn AccessibilitySink>> {
        self.a11y.detach()
    }

    // --- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Call [`layout`](Self::layout) after changing
    /// geometry, or the `on_page_*` hooks after changing the page list.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &ScrollModel {
        &self.model
    }

    #[inline]
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.model.current_page()
    }

    /// Destination of the snap in flight, else the current page.
    #[inline]
    #[must_use]
    pub fn next_page(&self) -> usize {
        self.model.next_page()
    }

    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.model.page_count()
    }

    #[inline]
    #[must_use]
    pub fn scroll_offset(&self) -> i32 {
        self.model.offset()
    }

    #[inline]
    #[must_use]
    pub fn touch_state(&self) -> TouchState {
        self.gesture.state()
    }

    /// A reorder session is dragging or settling.
    #[inline]
    #[must_use]
    pub fn is_reordering(&self) -> bool {
        self.reorder.is_active()
    }

    #[inline]
    #[must_use]
    pub fn is_free_scroll(&self) -> bool {
        self.model.is_free_scroll()
    }

    /// A snap or fling is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.snap.is_animating()
    }

    #[inline]
    #[must_use]
    pub fn is_page_moving(&self) -> bool {
        self.page_moving
    }

    /// Signed progress of `page` relative to the viewport centre.
    #[must_use]
    pub fn scroll_progress(&self, page: usize) -> f32 {
        self.model.scroll_progress(page)
    }

    #[must_use]
    pub fn nearest_page_to_center(&self) -> Option<usize> {
        self.model.nearest_page_to_center()
    }

    #[must_use]
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        self.model.visible_range()
    }

    /// Accessibility description of `page`.
    #[must_use]
    pub fn describe(&self, page: usize) -> String {
        self.config.describe_page(page, self.model.page_count())
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<PagerEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Layout -------------------------------------------------------------

    /// Re-measure the host and rebuild scroll targets.
    pub fn layout(&mut self) {
        let count = self.host.page_count();
        let pages: Vec<PageExtent> = (0..count).map(|i| self.host.page_extent(i)).collect();
        let viewport = self.host.viewport();
        self.model.update_layout(
            &pages,
            viewport.width,
            self.host.insets(),
            self.config.page_spacing,
            self.host.is_rtl(),
        );
        self.model.update_free_bounds(self.host.free_scroll_range());
        self.reorder.resize(count);
        self.force_scrolled = true;
        tracing::trace!(
            target: "pageflow.scroll",
            pages = count,
            viewport = viewport.width,
            max_scroll = self.model.max_scroll(),
            "layout"
        );
        if count == 0 {
            self.last_page_count = 0;
            return;
        }

        if self.first_layout {
            self.first_layout = false;
            self.model.scroll_to(self.model.page_offset(self.model.current_page()));
        }
        if !self.snap.is_animating() {
            if let Some(page) = self.restore_page.take() {
                self.set_current_page(page);
            } else if count != self.last_page_count {
                self.set_current_page(self.model.next_page());
            }
        }
        self.last_page_count = count;
    }

    /// A page was inserted at `index` in the host.
    pub fn on_page_added(&mut self, index: usize) {
        self.indicator
            .on_page_added(index, self.reorder.is_active());
        self.layout();
    }

    /// The page at `index` was removed from the host.
    pub fn on_page_removed(&mut self, index: usize) {
        self.indicator
            .on_page_removed(index, self.reorder.is_active());
        self.layout();
    }

    /// The host dropped all of its pages.
    pub fn on_pages_cleared(&mut self) {
        self.indicator.on_pages_cleared();
        self.layout();
    }

    // --- Saved state --------------------------------------------------------

    #[must_use]
    pub fn saved_state(&self) -> SavedState {
        SavedState {
            current_page: self.model.current_page(),
        }
    }

    /// Restore `state` on the next layout pass that finds the pager idle.
    pub fn restore(&mut self, state: SavedState) {
        self.restore_page = Some(state.current_page);
    }

    // --- Pointer input ------------------------------------------------------

    /// Feed one pointer event.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Vec<PagerEvent> {
        if self.model.is_degenerate() {
            if event.is_terminal() {
                self.gesture.reset();
            }
            return self.take_events();
        }
        let ctx = self.gesture_context();
        for action in self.gesture.process(&event, &ctx) {
            self.apply(action, event.time);
        }
        if event.is_terminal() {
            self.model
                .release_overscroll(self.config.overscroll.release_duration(), event.time);
        }
        self.take_events()
    }

    /// Scale the touch slop for subsequent scroll-start checks.
    pub fn set_touch_slop_scale(&mut self, scale: f32) {
        self.gesture.set_touch_slop_scale(scale);
    }

    fn gesture_context(&self) -> GestureContext {
        let viewport = self.host.viewport();
        let current = self.model.current_page();
        GestureContext {
            scroll_offset: self.model.offset(),
            snap_in_flight: self.snap.is_animating(),
            snap_remaining: self.snap.remaining(&self.model),
            viewport,
            edges: EdgeZones::new(
                viewport,
                self.host.insets(),
                self.config.page_spacing,
                self.config.edge_tap_margin_px(),
                self.model.is_rtl(),
            ),
            current_page: current,
            page_count: self.model.page_count(),
            page_width: self.model.page_width(current),
            rtl: self.model.is_rtl(),
            free_scroll: self.model.is_free_scroll(),
        }
    }

    fn apply(&mut self, action: GestureAction, now: Instant) {
        match action {
            GestureAction::SettleSnap => {
                self.set_current_page(self.model.next_page());
                self.page_end_moving();
            }
            GestureAction::CatchSnap => self.snap.abort(&mut self.model, false),
            GestureAction::BeginScroll => {
                self.events.push(PagerEvent::ScrollInteractionBegin);
                self.page_begin_moving();
            }
            GestureAction::ScrollBy(dx) => {
                let result = self.model.scroll_by(dx);
                if result.exceeded_free_bounds && self.snap.is_animating() {
                    let tick = self.snap.force_finish(&mut self.model);
                    self.handle_snap_tick(tick);
                }
            }
            GestureAction::Drag(pos) => {
                self.reorder.drag_to(pos);
                self.reorder
                    .update_hover(&self.model, self.snap.is_animating(), now);
            }
            GestureAction::Release(decision) => self.settle(decision, now),
            GestureAction::EndScroll => self.events.push(PagerEvent::ScrollInteractionEnd),
            GestureAction::EndReorder => self.end_reordering(now),
            GestureAction::Tap(pos) => {
                tracing::trace!(target: "pageflow.pager", x = pos.x, y = pos.y, "unhandled tap");
                self.events.push(PagerEvent::UnhandledTap { pos });
            }
        }
    }

    fn settle(&mut self, decision: ReleaseDecision, now: Instant) {
        match decision {
            ReleaseDecision::SnapWithVelocity { page, velocity } => {
                self.begin_snap(page, SnapRequest::Velocity(velocity), now);
            }
            ReleaseDecision::SnapToNearest => self.snap_to_destination(now),
            ReleaseDecision::SnapTo(page) => self.snap_to_page(page, now),
            ReleaseDecision::Fling { velocity } => {
                self.snap.fling(&mut self.model, velocity, now);
                self.page_begin_moving();
            }
        }
    }

    // --- Navigation ---------------------------------------------------------

    /// Animate to `page` with the default duration.
    pub fn snap_to_page(&mut self, page: usize, now: Instant) {
        self.begin_snap(page, SnapRequest::Default, now);
    }

    /// Animate to `page` over `duration`.
    pub fn snap_to_page_with_duration(&mut self, page: usize, duration: Duration, now: Instant) {
        self.begin_snap(page, SnapRequest::Duration(duration), now);
    }

    /// Animate to `page` with a duration derived from `velocity` (px/s).
    pub fn snap_to_page_with_velocity(&mut self, page: usize, velocity: f32, now: Instant) {
        self.begin_snap(page, SnapRequest::Velocity(velocity), now);
    }

    /// Jump to `page` through the snap path, committing at once.
    pub fn snap_to_page_immediately(&mut self, page: usize, now: Instant) {
        self.begin_snap(page, SnapRequest::Duration(Duration::ZERO), now);
        let tick = self.snap.tick(&mut self.model, now);
        self.handle_snap_tick(tick);
    }

    /// Snap to the page closest to the viewport centre.
    pub fn snap_to_destination(&mut self, now: Instant) {
        if let Some(page) = self.model.nearest_page_to_center() {
            self.snap_to_page(page, now);
        }
    }

    /// Make `page` current without animating.
    pub fn set_current_page(&mut self, page: usize) {
        self.snap.abort(&mut self.model, true);
        if self.model.page_count() == 0 {
            return;
        }
        self.force_scrolled = true;
        self.model.set_current_page(page);
        self.model
            .scroll_to(self.model.page_offset(self.model.current_page()));
        self.notify_page_switch();
    }

    /// Step to the page before the next page. Returns whether it moved.
    pub fn scroll_left(&mut self, now: Instant) -> bool {
        let next = self.model.next_page();
        if self.model.is_degenerate() || next == 0 {
            return false;
        }
        self.snap_to_page(next - 1, now);
        true
    }

    /// Step to the page after the next page. Returns whether it moved.
    pub fn scroll_right(&mut self, now: Instant) -> bool {
        let next = self.model.next_page();
        if self.model.is_degenerate() || next + 1 >= self.model.page_count() {
            return false;
        }
        self.snap_to_page(next + 1, now);
        true
    }

    /// One mouse-wheel step. `shift` turns vertical motion horizontal.
    ///
    /// Positive values mean "forward" (right or down). Returns whether the
    /// step was consumed.
    pub fn on_wheel(&mut self, horizontal: f32, vertical: f32, shift: bool, now: Instant) -> bool {
        let (h, v) = if shift {
            (vertical, 0.0)
        } else {
            (horizontal, vertical)
        };
        if h == 0.0 && v == 0.0 {
            return false;
        }
        let forward = if self.model.is_rtl() {
            h < 0.0 || v < 0.0
        } else {
            h > 0.0 || v > 0.0
        };
        if forward {
            self.scroll_right(now);
        } else {
            self.scroll_left(now);
        }
        true
    }

    /// Keyboard or D-pad focus left the current page. Returns whether the
    /// pager moved to handle it.
    pub fn on_focus_move(&mut self, direction: Direction, now: Instant) -> bool {
        let toward_next = matches!(
            (direction, self.model.is_rtl()),
            (Direction::Right, false) | (Direction::Left, true)
        );
        let current = self.model.current_page();
        if self.model.is_degenerate() {
            return false;
        }
        if toward_next && current + 1 < self.model.page_count() {
            self.snap_to_page(current + 1, now);
            true
        } else if !toward_next && current > 0 {
            self.snap_to_page(current - 1, now);
            true
        } else {
            false
        }
    }

    /// Enter or leave free-scroll mode over the host's free-scroll range.
    pub fn set_free_scroll(&mut self, enabled: bool) {
        self.model
            .set_free_scroll(enabled, self.host.free_scroll_range());
        if enabled {
            let current = self.model.current_page();
            let clamped = self.model.validate_page(current);
            if clamped != current {
                self.set_current_page(clamped);
            }
        }
        tracing::debug!(target: "pageflow.pager", enabled, "free scroll");
    }

    fn begin_snap(&mut self, page: usize, request: SnapRequest, now: Instant) {
        if self.model.is_degenerate() {
            tracing::debug!(target: "pageflow.pager", page, "snap ignored: nothing to page");
            return;
        }
        let m = &mut self.model;
        let page = match request {
            SnapRequest::Default => self.snap.snap_to_page(m, page, now),
            SnapRequest::Duration(d) => self.snap.snap_to_page_with_duration(m, page, d, now),
            SnapRequest::Velocity(v) => self.snap.snap_to_page_with_velocity(m, page, v, now),
        };
        self.page_begin_moving();
        self.force_scrolled = true;
        self.events.push(PagerEvent::NextPageChanged { page });
        let description = self.describe(page);
        self.indicator
            .on_page_changed(page, &description, self.reorder.is_active());
    }

    // --- Reorder ------------------------------------------------------------

    /// Long press on the page at `index`: suppresses the tap and tries to
    /// start a reorder.
    pub fn on_long_press(&mut self, index: usize, now: Instant) -> bool {
        self.gesture.cancel_tap();
        self.start_reordering(index, now)
    }

    /// Start dragging the page at `index`. Returns whether it started.
    pub fn start_reordering(&mut self, index: usize, now: Instant) -> bool {
        match self.try_start_reordering(index, now) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(target: "pageflow.pager", index, %reason, "reorder refused");
                false
            }
        }
    }

    /// [`start_reordering`](Self::start_reordering) with the reason for a
    /// refusal.
    pub fn try_start_reordering(
        &mut self,
        index: usize,
        now: Instant,
    ) -> std::result::Result<(), ReorderRejected> {
        if self.reorder.is_active() {
            return Err(ReorderRejected::Busy);
        }
        if self.gesture.state() != TouchState::Rest {
            return Err(ReorderRejected::NotAtRest);
        }
        // The drag is anchored to the live touch, so a reorder also needs a
        // pointer down. Without one there is nothing to follow.
        let (Some((down, down_scroll)), Some(pointer)) =
            (self.gesture.anchor(), self.gesture.last_position())
        else {
            return Err(ReorderRejected::NoActiveTouch);
        };
        let n = self.model.page_count();
        let (first, last) = self.host.free_scroll_range();
        let range = (first.min(n.saturating_sub(1)), last.min(n.saturating_sub(1)));
        let anchor = DragAnchor {
            down,
            down_scroll,
            pointer,
        };
        self.reorder
            .start_drag(index, range, anchor, &self.model, now)?;
        self.gesture.enter_reordering();
        self.set_free_scroll(true);
        if let Some(nearest) = self.model.nearest_page_to_center() {
            self.snap_to_page(nearest, now);
        }
        self.events.push(PagerEvent::ReorderStarted { index });
        Ok(())
    }

    fn reposition_dragged(&mut self, to: usize, now: Instant) {
        let Some((from, to)) = self
            .reorder
            .reposition(&mut self.host, &self.model, to, now)
        else {
            return;
        };
        self.layout();
        self.snap_to_page(to, now);
        self.events.push(PagerEvent::PageRepositioned { from, to });
        self.indicator.on_repositioned(self.model.next_page());
    }

    fn end_reordering(&mut self, now: Instant) {
        if let Some(index) = self.reorder.end_drag(&self.model, now) {
            self.begin_snap(index, SnapRequest::Duration(Duration::ZERO), now);
        }
    }

    fn finish_reorder(&mut self) {
        self.set_free_scroll(false);
        self.force_scrolled = true;
        self.events.push(PagerEvent::ReorderEnded);
    }

    // --- Accessibility ------------------------------------------------------

    #[must_use]
    pub fn accessibility_info(&self) -> AccessibilityInfo {
        AccessibilityInfo::for_page(self.model.current_page(), self.model.page_count())
    }

    /// Perform `action`. Returns whether it was handled.
    pub fn perform_accessibility_action(&mut self, action: AccessibilityAction, now: Instant) -> bool {
        if !self.accessibility_info().supports(action) {
            return false;
        }
        match action {
            AccessibilityAction::ScrollForward => self.scroll_right(now),
            AccessibilityAction::ScrollBackward => self.scroll_left(now),
        }
    }

    // --- Frames -------------------------------------------------------------

    /// Advance every animation to `now` and report the frame.
    pub fn tick(&mut self, now: Instant) -> Vec<PagerEvent> {
        let tick = self.snap.tick(&mut self.model, now);
        self.handle_snap_tick(tick);

        if self.reorder.is_dragging() {
            let animating = self.snap.is_animating();
            self.reorder.update_hover(&self.model, animating, now);
            if let Some(to) = self.reorder.take_due_hover(animating, now) {
                self.reposition_dragged(to, now);
            }
        }
        if self.reorder.tick(&self.model, now, &mut self.events) {
            self.finish_reorder();
        }
        self.model.tick_overscroll(now);
        self.emit_presentation();
        self.take_events()
    }

    fn handle_snap_tick(&mut self, tick: SnapTick) {
        let SnapTick::Settled { page, previous } = tick else {
            return;
        };
        self.a11y.on_settling(ScrollEvent {
            scroll_x: self.model.offset(),
            max_scroll_x: self.model.max_scroll(),
            from_page: previous,
            to_page: page,
        });
        self.notify_page_switch();
        if self.gesture.state() == TouchState::Rest {
            self.page_end_moving();
        }
        if self.reorder.on_settle_snap_done() {
            self.finish_reorder();
        }
        let description = self.describe(page);
        self.a11y.announce(&description);
    }

    fn notify_page_switch(&mut self) {
        let current = self.model.current_page();
        self.events.push(PagerEvent::PageSettled { page: current });
        let next = self.model.next_page();
        let description = self.describe(next);
        self.indicator
            .on_page_changed(next, &description, self.reorder.is_active());
    }

    fn page_begin_moving(&mut self) {
        if !self.page_moving {
            self.page_moving = true;
            self.events.push(PagerEvent::PageBeginMoving);
        }
    }

    fn page_end_moving(&mut self) {
        if self.page_moving {
            self.page_moving = false;
            self.events.push(PagerEvent::PageEndMoving);
        }
    }

    fn emit_presentation(&mut self) {
        if !self.model.is_degenerate() {
            let center = self.model.screen_center();
            if self.force_scrolled || self.last_center != Some(center) {
                self.force_scrolled = false;
                self.last_center = Some(center);
                self.events.push(PagerEvent::ScreenScrolled { center });
            }
        }
        let pull = self.model.overscroll_pull();
        if pull != self.last_overscroll {
            self.last_overscroll = pull;
            self.events.push(PagerEvent::Overscroll {
                pull,
                stretch: self.model.overscroll_stretch(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use pageflow_core::geometry::Rect;

    const MS_750: Duration = Duration::from_millis(750);

    fn pager(pages: usize) -> Pager<MemoryHost> {
        let mut p = Pager::new(PagerConfig::default(), MemoryHost::uniform(pages, 1000, 800))
            .expect("default config is valid");
        p.take_events();
        p
    }

    fn moving_events(events: &[PagerEvent]) -> Vec<PagerEvent> {
        events
            .iter()
            .copied()
            .filter(|e| matches!(e, PagerEvent::PageBeginMoving | PagerEvent::PageEndMoving))
            .collect()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PagerConfig {
            density: 0.0,
            ..PagerConfig::default()
        };
        let err = Pager::new(config, MemoryHost::uniform(3, 1000, 800)).unwrap_err();
        assert!(matches!(err, PagerError::InvalidConfig { .. }));
    }

    #[test]
    fn first_layout_settles_on_first_page() {
        let mut p = Pager::new(PagerConfig::default(), MemoryHost::uniform(3, 1000, 800)).unwrap();
        assert_eq!(p.take_events(), vec![PagerEvent::PageSettled { page: 0 }]);
        assert_eq!(p.scroll_offset(), 0);
        assert_eq!(p.model().max_scroll(), 2000);
    }

    #[test]
    fn moving_notifications_alternate() {
        let mut p = pager(3);
        let t0 = Instant::now();
        p.snap_to_page(1, t0);
        p.snap_to_page(2, t0 + Duration::from_millis(100));
        let mut events = p.take_events();
        events.extend(p.tick(t0 + Duration::from_millis(100) + MS_750));
        assert_eq!(
            moving_events(&events),
            vec![PagerEvent::PageBeginMoving, PagerEvent::PageEndMoving]
        );
        assert_eq!(p.current_page(), 2);
        assert!(!p.is_page_moving());
    }

    #[test]
    fn next_page_tracks_snap_destination() {
        let mut p = pager(4);
        let t0 = Instant::now();
        p.snap_to_page(3, t0);
        assert_eq!(p.next_page(), 3);
        assert_eq!(p.current_page(), 0);
        assert!(p.is_animating());
        assert!(p.take_events().contains(&PagerEvent::NextPageChanged { page: 3 }));
    }

    #[test]
    fn snap_index_is_clamped() {
        let mut p = pager(3);
        let t0 = Instant::now();
        p.snap_to_page(9, t0);
        assert_eq!(p.next_page(), 2);
        p.tick(t0 + MS_750);
        assert_eq!(p.scroll_offset(), 2000);
    }

    #[test]
    fn immediate_snap_commits_synchronously() {
        let mut p = pager(3);
        p.snap_to_page_immediately(2, Instant::now());
        assert_eq!(p.current_page(), 2);
        assert_eq!(p.scroll_offset(), 2000);
        assert!(!p.is_animating());
        let events = p.take_events();
        assert!(events.contains(&PagerEvent::PageSettled { page: 2 }));
        assert_eq!(
            moving_events(&events),
            vec![PagerEvent::PageBeginMoving, PagerEvent::PageEndMoving]
        );
    }

    #[test]
    fn set_current_page_jumps_without_moving_events() {
        let mut p = pager(3);
        p.set_current_page(1);
        assert_eq!(p.scroll_offset(), 1000);
        assert_eq!(p.take_events(), vec![PagerEvent::PageSettled { page: 1 }]);
    }

    #[test]
    fn screen_scrolled_only_on_change() {
        let mut p = pager(3);
        let t0 = Instant::now();
        assert!(p.tick(t0).contains(&PagerEvent::ScreenScrolled { center: 500 }));
        assert!(p.tick(t0).is_empty());
    }

    #[test]
    fn empty_pager_is_inert() {
        let mut p = pager(0);
        let t0 = Instant::now();
        p.snap_to_page(0, t0);
        assert!(!p.is_animating());
        assert!(!p.scroll_right(t0));
        assert!(!p.on_focus_move(Direction::Right, t0));
        assert!(p.on_pointer(PointerEvent::down((500.0, 400.0), t0)).is_empty());
        assert!(p.on_pointer(PointerEvent::up((100.0, 400.0), None, t0)).is_empty());
        assert!(p.tick(t0).is_empty());
    }

    #[test]
    fn zero_width_viewport_is_inert() {
        let mut p = pager(3);
        p.host_mut().set_viewport(Rect::from_size(0, 800));
        p.layout();
        p.take_events();
        let t0 = Instant::now();
        assert!(p.on_pointer(PointerEvent::down((0.0, 0.0), t0)).is_empty());
        assert_eq!(p.touch_state(), TouchState::Rest);
    }

    #[test]
    fn free_scroll_clamps_current_page() {
        let host = MemoryHost::uniform(6, 1000, 800).with_free_scroll_range(2, 4);
        let mut p = Pager::new(PagerConfig::default(), host).unwrap();
        p.take_events();
        p.set_free_scroll(true);
        assert!(p.is_free_scroll());
        assert_eq!(p.current_page(), 2);
        assert_eq!(p.scroll_offset(), 2000);
        p.set_free_scroll(false);
        assert!(!p.is_free_scroll());
    }

    #[test]
    fn reorder_needs_a_resting_touch() {
        let mut p = pager(3);
        let t0 = Instant::now();
        assert_eq!(
            p.try_start_reordering(1, t0),
            Err(ReorderRejected::NoActiveTouch)
        );
        p.on_pointer(PointerEvent::down((500.0, 400.0), t0));
        p.on_pointer(PointerEvent::moved((300.0, 400.0), t0 + Duration::from_millis(8)));
        assert_eq!(p.touch_state(), TouchState::Scrolling);
        assert!(!p.start_reordering(1, t0 + Duration::from_millis(16)));
        assert!(!p.is_reordering());
    }

    #[test]
    fn saved_state_round_trips_through_layout() {
        let mut p = pager(5);
        p.set_current_page(3);
        let state = p.saved_state();

        let mut fresh = pager(5);
        fresh.restore(state);
        assert_eq!(fresh.current_page(), 0);
        fresh.layout();
        assert_eq!(fresh.current_page(), 3);
        assert_eq!(fresh.scroll_offset(), 3000);
    }

    #[test]
    fn restore_is_clamped_to_page_count() {
        let mut p = pager(2);
        p.restore(SavedState { current_page: 7 });
        p.layout();
        assert_eq!(p.current_page(), 1);
    }
}

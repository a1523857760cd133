#![forbid(unsafe_code)]

//! Scroll geometry and page bookkeeping.
//!
//! [`ScrollModel`] owns the horizontal offset, the per-page scroll targets,
//! and the current / next page indices. It knows nothing about time except
//! for the overscroll release, which is a plain [`Tween`].
//!
//! # Invariants
//!
//! 1. Outside free-scroll, the offset stays in `[0, max_scroll]`. Positions
//!    requested past either end are pinned to the end and the excess is
//!    converted into an overscroll stretch.
//! 2. In free-scroll mode the offset stays inside the scroll targets of the
//!    free-scroll page range, and no overscroll is produced.
//! 3. `page_offsets` is recomputed in one pass whenever the layout changes,
//!    so lookups during a drag are O(1).
//! 4. `current_page` is always a valid index when there is at least one page.
//!
//! # Coordinates
//!
//! Offset `0` shows the leftmost slot. In RTL the leftmost slot holds the
//! last page, so page 0 has the largest scroll target.

use pageflow_core::animation::{AnimationStatus, Tween, decelerate};
use pageflow_core::geometry::Insets;
use web_time::{Duration, Instant};

use crate::host::PageExtent;

/// Side effects of [`ScrollModel::scroll_to`] the caller may need to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollResult {
    /// The requested position lay outside the free-scroll bounds.
    pub exceeded_free_bounds: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Overscroll {
    /// Signed, saturating pull in `[-1, 1]`. Negative is the left edge.
    pull: f32,
    release: Option<Tween>,
}

/// Horizontal scroll state for a row of pages.
#[derive(Debug, Clone)]
pub struct ScrollModel {
    offset: i32,
    max_scroll: i32,
    page_offsets: Vec<i32>,
    page_lefts: Vec<i32>,
    page_widths: Vec<i32>,
    viewport_width: i32,
    page_spacing: i32,
    rtl: bool,

    current_page: usize,
    next_page: Option<usize>,

    free_scroll: bool,
    free_range: (usize, usize),
    free_bounds: (i32, i32),

    allow_overscroll: bool,
    damp_factor: f32,
    overscroll: Overscroll,
}

impl ScrollModel {
    /// Empty model. Call [`update_layout`](Self::update_layout) before use.
    #[must_use]
    pub fn new(allow_overscroll: bool, damp_factor: f32) -> Self {
        Self {
            offset: 0,
            max_scroll: 0,
            page_offsets: Vec::new(),
            page_lefts: Vec::new(),
            page_widths: Vec::new(),
            viewport_width: 0,
            page_spacing: 0,
            rtl: false,
            current_page: 0,
            next_page: None,
            free_scroll: false,
            free_range: (0, 0),
            free_bounds: (0, 0),
            allow_overscroll,
            damp_factor,
            overscroll: Overscroll::default(),
        }
    }

    // --- Layout -------------------------------------------------------------

    /// Recompute every page's position and scroll target.
    pub fn update_layout(
        &mut self,
        pages: &[PageExtent],
        viewport_width: i32,
        insets: Insets,
        page_spacing: i32,
        rtl: bool,
    ) {
        let n = pages.len();
        self.viewport_width = viewport_width.max(0);
        self.page_spacing = page_spacing;
        self.rtl = rtl;
        self.page_offsets = vec![0; n];
        self.page_lefts = vec![0; n];
        self.page_widths = vec![0; n];

        // Full-bleed pages sit flush with the viewport edge. The gap after
        // one is the left inset, and the gap before one is the right inset.
        let order = |step: usize| if rtl { n - 1 - step } else { step };
        let lead = |extent: PageExtent| if extent.full_bleed { 0 } else { insets.left };
        let mut child_left = if n == 0 { 0 } else { lead(pages[order(0)]) };
        for step in 0..n {
            let i = order(step);
            let extent = pages[i];
            self.page_lefts[i] = child_left;
            self.page_offsets[i] = child_left - lead(extent);
            self.page_widths[i] = extent.width.max(0);

            let next_full_bleed = step + 1 < n && pages[order(step + 1)].full_bleed;
            let gap = if extent.full_bleed {
                insets.left
            } else if next_full_bleed {
                insets.right
            } else {
                page_spacing
            };
            child_left += self.page_widths[i] + gap;
        }

        self.max_scroll = match n {
            0 => 0,
            _ if rtl => self.page_offsets[0],
            _ => self.page_offsets[n - 1],
        };

        if n == 0 {
            self.current_page = 0;
            self.next_page = None;
        } else {
            self.current_page = self.current_page.min(n - 1);
            self.next_page = self.next_page.map(|p| p.min(n - 1));
        }
        self.update_free_bounds(self.free_range);
    }

    /// Number of laid-out pages.
    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_offsets.len()
    }

    #[inline]
    #[must_use]
    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    #[inline]
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    /// No pages or no viewport: nothing can scroll.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.page_offsets.is_empty() || self.viewport_width <= 0
    }

    /// Scroll offset that brings `page` into view, or 0 for an unknown page.
    #[inline]
    #[must_use]
    pub fn page_offset(&self, page: usize) -> i32 {
        self.page_offsets.get(page).copied().unwrap_or(0)
    }

    /// Left edge of `page` in content coordinates.
    #[inline]
    #[must_use]
    pub fn page_left(&self, page: usize) -> i32 {
        self.page_lefts.get(page).copied().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn page_width(&self, page: usize) -> i32 {
        self.page_widths.get(page).copied().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn page_offsets(&self) -> &[i32] {
        &self.page_offsets
    }

    // --- Offset -------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn max_scroll(&self) -> i32 {
        self.max_scroll
    }

    /// Move to `x`, clamping and converting any excess into overscroll.
    pub fn scroll_to(&mut self, x: i32) -> ScrollResult {
        let mut result = ScrollResult::default();
        let mut x = x;
        if self.free_scroll {
            let (lo, hi) = self.free_bounds;
            result.exceeded_free_bounds = x < lo || x > hi;
            x = x.clamp(lo, hi);
        }

        let max = self.max_scroll;
        let (before_first, after_last) = if self.rtl {
            (x > max, x < 0)
        } else {
            (x < 0, x > max)
        };

        if before_first {
            self.offset = if self.rtl { max } else { 0 };
            if self.overscroll_enabled() {
                self.apply_overscroll(if self.rtl { x - max } else { x });
            }
        } else if after_last {
            self.offset = if self.rtl { 0 } else { max };
            if self.overscroll_enabled() {
                self.apply_overscroll(if self.rtl { x } else { x - max });
            }
        } else {
            if self.overscroll.pull != 0.0 && self.overscroll.release.is_none() {
                self.apply_overscroll(0);
            }
            self.offset = x;
        }
        result
    }

    /// Move by `dx` relative to the current offset.
    pub fn scroll_by(&mut self, dx: i32) -> ScrollResult {
        self.scroll_to(self.offset.saturating_add(dx))
    }

    /// Viewport centre in content coordinates.
    #[inline]
    #[must_use]
    pub fn screen_center(&self) -> i32 {
        self.offset + self.viewport_width / 2
    }

    // --- Pages --------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Destination of the in-flight snap, if any.
    #[inline]
    #[must_use]
    pub fn pending_page(&self) -> Option<usize> {
        self.next_page
    }

    /// Destination of the in-flight snap, else the current page.
    #[inline]
    #[must_use]
    pub fn next_page(&self) -> usize {
        self.next_page.unwrap_or(self.current_page)
    }

    pub(crate) fn set_current_page(&mut self, page: usize) {
        self.current_page = self.validate_page(page);
    }

    pub(crate) fn set_pending_page(&mut self, page: Option<usize>) {
        self.next_page = page;
    }

    /// Clamp `page` into the reachable range.
    #[must_use]
    pub fn validate_page(&self, page: usize) -> usize {
        let n = self.page_count();
        if n == 0 {
            return 0;
        }
        let (lo, hi) = if self.free_scroll {
            self.free_range
        } else {
            (0, n - 1)
        };
        page.clamp(lo, hi)
    }

    /// Page whose centre is closest to the viewport centre.
    #[must_use]
    pub fn nearest_page_to_center(&self) -> Option<usize> {
        let center = self.screen_center();
        (0..self.page_count()).min_by_key(|&i| {
            let page_center = self.page_lefts[i] + self.page_widths[i] / 2;
            (page_center - center).abs()
        })
    }

    /// Signed progress of `page` relative to the viewport centre.
    ///
    /// `0` when the viewport sits on the page's scroll target, `±1` when it
    /// sits on an adjacent page's. Positive values mean the viewport centre
    /// lies to the right of the page, in either layout direction.
    #[must_use]
    pub fn scroll_progress(&self, page: usize) -> f32 {
        self.scroll_progress_at(self.screen_center(), page)
    }

    /// [`scroll_progress`](Self::scroll_progress) for an explicit centre.
    #[must_use]
    pub fn scroll_progress_at(&self, screen_center: i32, page: usize) -> f32 {
        let n = self.page_count();
        if page >= n {
            return 0.0;
        }
        let half = self.viewport_width / 2;
        let delta = screen_center - (self.page_offsets[page] + half);

        let adjacent = if (delta <= 0) == self.rtl {
            page.checked_add(1)
        } else {
            page.checked_sub(1)
        };
        let total = match adjacent {
            Some(a) if a < n => (self.page_offsets[a] - self.page_offsets[page]).abs(),
            _ => self.page_widths[page] + self.page_spacing,
        };
        if total == 0 {
            return 0.0;
        }
        (delta as f32 / total as f32).clamp(-1.0, 1.0)
    }

    /// Indices of the pages intersecting the viewport, `(first, last)`.
    #[must_use]
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        let mut range: Option<(usize, usize)> = None;
        for i in 0..self.page_count() {
            let left = self.page_lefts[i] - self.offset;
            let right = left + self.page_widths[i];
            if left < self.viewport_width && right > 0 {
                range = Some(match range {
                    None => (i, i),
                    Some((lo, hi)) => (lo.min(i), hi.max(i)),
                });
            }
        }
        range
    }

    // --- Free scroll --------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_free_scroll(&self) -> bool {
        self.free_scroll
    }

    /// Free-scroll offset bounds, `(min, max)`.
    #[inline]
    #[must_use]
    pub fn free_bounds(&self) -> (i32, i32) {
        self.free_bounds
    }

    /// Page range reachable in free-scroll mode.
    #[inline]
    #[must_use]
    pub fn free_range(&self) -> (usize, usize) {
        self.free_range
    }

    /// Enter or leave free-scroll mode over `range` (inclusive).
    pub fn set_free_scroll(&mut self, enabled: bool, range: (usize, usize)) {
        self.free_scroll = enabled;
        self.update_free_bounds(range);
        if enabled {
            self.apply_overscroll(0);
            self.overscroll.release = None;
        }
    }

    pub(crate) fn update_free_bounds(&mut self, range: (usize, usize)) {
        let n = self.page_count();
        if n == 0 {
            self.free_range = (0, 0);
            self.free_bounds = (0, 0);
            return;
        }
        let first = range.0.min(n - 1);
        let last = range.1.clamp(first, n - 1);
        self.free_range = (first, last);
        let (a, b) = (self.page_offsets[first], self.page_offsets[last]);
        self.free_bounds = (a.min(b), a.max(b));
    }

    // --- Overscroll ---------------------------------------------------------

    fn overscroll_enabled(&self) -> bool {
        self.allow_overscroll && !self.free_scroll
    }

    pub fn set_allow_overscroll(&mut self, allow: bool) {
        self.allow_overscroll = allow;
        if !allow {
            self.apply_overscroll(0);
            self.overscroll.release = None;
        }
    }

    fn apply_overscroll(&mut self, amount: i32) {
        self.overscroll.release = None;
        self.overscroll.pull = damped_pull(amount, self.viewport_width);
    }

    /// Signed edge pull in `[-1, 1]`; negative is the left edge.
    #[inline]
    #[must_use]
    pub fn overscroll_pull(&self) -> f32 {
        self.overscroll.pull
    }

    /// Stretch in pixels the presentation layer should render.
    #[inline]
    #[must_use]
    pub fn overscroll_stretch(&self) -> f32 {
        self.overscroll.pull * self.damp_factor * self.viewport_width as f32
    }

    #[inline]
    #[must_use]
    pub fn is_overscrolled(&self) -> bool {
        self.overscroll.pull != 0.0
    }

    /// Start relaxing the stretch back to zero.
    pub fn release_overscroll(&mut self, duration: Duration, now: Instant) {
        if self.overscroll.pull == 0.0 || self.overscroll.release.is_some() {
            return;
        }
        self.overscroll.release =
            Some(Tween::new(self.overscroll.pull, 0.0, duration, now).easing(decelerate));
    }

    /// Advance the release animation.
    pub fn tick_overscroll(&mut self, now: Instant) -> AnimationStatus {
        let Some(release) = self.overscroll.release else {
            return AnimationStatus::Done;
        };
        let status = release.status_at(now);
        if status.is_done() {
            self.overscroll = Overscroll::default();
        } else {
            self.overscroll.pull = release.value_at(now);
        }
        status
    }
}

/// Map an overscroll distance onto a saturating pull in `[-1, 1]`.
fn damped_pull(amount: i32, viewport_width: i32) -> f32 {
    if amount == 0 || viewport_width <= 0 {
        return 0.0;
    }
    let f = amount as f32 / viewport_width as f32;
    let t = f.abs().min(1.0) - 1.0;
    f.signum() * (t * t * t + 1.0)
}

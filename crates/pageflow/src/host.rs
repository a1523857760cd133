#![forbid(unsafe_code)]

//! The page container the engine drives.
//!
//! The pager never owns page content. It asks a [`PageHost`] for the
//! measured extents of each page and the viewport, and tells it when a
//! reorder moves a page to a new slot. Everything visual (translation,
//! scale, stretch) flows back as [`PagerEvent`](crate::PagerEvent)s.

use pageflow_core::geometry::{Insets, Rect};

/// Measured size of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageExtent {
    pub width: i32,
    pub height: i32,
    /// Full-bleed pages ignore the container's horizontal insets.
    pub full_bleed: bool,
}

impl PageExtent {
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            full_bleed: false,
        }
    }

    /// Mark the page as ignoring insets.
    #[must_use]
    pub const fn full_bleed(mut self) -> Self {
        self.full_bleed = true;
        self
    }
}

/// Container the pager lays pages out in.
///
/// Indices are slot positions: after [`move_page`](Self::move_page) the
/// page that was at `from` is reported at `to`.
pub trait PageHost {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Measured extent of the page at `index`.
    fn page_extent(&self, index: usize) -> PageExtent;

    /// Visible region in container coordinates.
    fn viewport(&self) -> Rect;

    /// Right-to-left layout.
    fn is_rtl(&self) -> bool {
        false
    }

    /// Container padding. Pages are centred inside it unless full-bleed.
    fn insets(&self) -> Insets {
        Insets::ZERO
    }

    /// Pages reachable while free-scrolling and eligible for reorder.
    ///
    /// Returned as `(first, last)`, inclusive. The pager clamps it to the
    /// page count.
    fn free_scroll_range(&self) -> (usize, usize) {
        (0, self.page_count().saturating_sub(1))
    }

    /// Move the page at `from` so that it ends up at `to`.
    fn move_page(&mut self, from: usize, to: usize);
}

/// Simple in-memory host.
///
/// Each page carries a caller-chosen id so that reorders can be observed.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryHost {
    pages: Vec<(u64, PageExtent)>,
    viewport: Rect,
    insets: Insets,
    rtl: bool,
    free_scroll_range: Option<(usize, usize)>,
}

impl MemoryHost {
    /// `count` pages filling a `width`×`height` viewport, ids `0..count`.
    #[must_use]
    pub fn uniform(count: usize, width: i32, height: i32) -> Self {
        Self {
            pages: (0..count as u64)
                .map(|id| (id, PageExtent::new(width, height)))
                .collect(),
            viewport: Rect::from_size(width, height),
            insets: Insets::ZERO,
            rtl: false,
            free_scroll_range: None,
        }
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Set insets and shrink non-full-bleed pages to fit inside them.
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        let width = self.viewport.width - insets.horizontal();
        for (_, extent) in &mut self.pages {
            if !extent.full_bleed {
                extent.width = width;
            }
        }
        self
    }

    #[must_use]
    pub fn with_free_scroll_range(mut self, first: usize, last: usize) -> Self {
        self.free_scroll_range = Some((first, last));
        self
    }

    /// Page ids in slot order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.pages.iter().map(|(id, _)| *id).collect()
    }

    /// Insert a page; returns the slot it landed in.
    pub fn insert(&mut self, index: usize, id: u64, extent: PageExtent) -> usize {
        let index = index.min(self.pages.len());
        self.pages.insert(index, (id, extent));
        index
    }

    /// Remove the page at `index`, returning its id.
    pub fn remove(&mut self, index: usize) -> Option<u64> {
        (index < self.pages.len()).then(|| self.pages.remove(index).0)
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn set_extent(&mut self, index: usize, extent: PageExtent) {
        if let Some(slot) = self.pages.get_mut(index) {
            slot.1 = extent;
        }
    }
}

impl PageHost for MemoryHost {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_extent(&self, index: usize) -> PageExtent {
        self.pages.get(index).map(|(_, e)| *e).unwrap_or_default()
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn is_rtl(&self) -> bool {
        self.rtl
    }

    fn insets(&self) -> Insets {
        self.insets
    }

    fn free_scroll_range(&self) -> (usize, usize) {
        self.free_scroll_range
            .unwrap_or((0, self.pages.len().saturating_sub(1)))
    }

    fn move_page(&mut self, from: usize, to: usize) {
        if from >= self.pages.len() || to >= self.pages.len() || from == to {
            return;
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
    }
}

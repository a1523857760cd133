#![forbid(unsafe_code)]

//! Page indicator synchronisation.
//!
//! A [`PageIndicator`] (dots, a scrubber, a text label) mirrors the page
//! list and the active page. [`PageIndicatorSync`] keeps it in step with
//! the pager and holds back marker churn while a reorder is moving pages
//! around.

/// Receiver of page-list and active-page updates.
pub trait PageIndicator {
    /// Highlight the marker for `index`.
    fn set_active_marker(&mut self, index: usize);

    /// A page was inserted at `index`.
    fn add_marker(&mut self, index: usize);

    /// The page at `index` was removed.
    fn remove_marker(&mut self, index: usize);

    fn remove_all_markers(&mut self);

    /// Spoken or displayed description of the active page.
    fn set_description(&mut self, _description: &str) {}
}

/// Forwards pager changes to an optional indicator.
#[derive(Default)]
pub struct PageIndicatorSync {
    indicator: Option<Box<dyn PageIndicator>>,
}

impl std::fmt::Debug for PageIndicatorSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIndicatorSync")
            .field("attached", &self.indicator.is_some())
            .finish()
    }
}

impl PageIndicatorSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.indicator.is_some()
    }

    /// Attach `indicator` and bring it up to date.
    pub fn attach(
        &mut self,
        mut indicator: Box<dyn PageIndicator>,
        page_count: usize,
        active: usize,
        description: &str,
    ) {
        indicator.remove_all_markers();
        for i in 0..page_count {
            indicator.add_marker(i);
        }
        if page_count > 0 {
            indicator.set_active_marker(active);
        }
        indicator.set_description(description);
        self.indicator = Some(indicator);
    }

    /// Detach and return the indicator.
    pub fn detach(&mut self) -> Option<Box<dyn PageIndicator>> {
        self.indicator.take()
    }

    /// The page the pager is heading to changed.
    pub fn on_page_changed(&mut self, page: usize, description: &str, reordering: bool) {
        let Some(ind) = self.indicator.as_mut() else {
            return;
        };
        ind.set_description(description);
        if !reordering {
            ind.set_active_marker(page);
        }
    }

    /// A reorder moved the dragged page; follow it regardless of the
    /// reorder in progress.
    pub fn on_repositioned(&mut self, page: usize) {
        if let Some(ind) = self.indicator.as_mut() {
            ind.set_active_marker(page);
        }
    }

    pub fn on_page_added(&mut self, index: usize, reordering: bool) {
        if reordering {
            return;
        }
        if let Some(ind) = self.indicator.as_mut() {
            ind.add_marker(index);
        }
    }

    pub fn on_page_removed(&mut self, index: usize, reordering: bool) {
        if reordering {
            return;
        }
        if let Some(ind) = self.indicator.as_mut() {
            ind.remove_marker(index);
        }
    }

    pub fn on_pages_cleared(&mut self) {
        if let Some(ind) = self.indicator.as_mut() {
            ind.remove_all_markers();
        }
    }
}

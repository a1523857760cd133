#![forbid(unsafe_code)]

//! Accessibility bridge.
//!
//! Exposes the pager to assistive technology: whether it can scroll forward
//! or backward, the two scroll actions, a scroll event when a snap lands on
//! a different page, and a spoken description of the page reached.

/// Receiver of accessibility notifications.
pub trait AccessibilitySink {
    /// Whether assistive technology is listening. Nothing is sent otherwise.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Speak `text`.
    fn announce(&mut self, text: &str);

    /// The pager scrolled.
    fn scroll_event(&mut self, event: ScrollEvent);
}

/// Scroll position report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub scroll_x: i32,
    pub max_scroll_x: i32,
    pub from_page: usize,
    pub to_page: usize,
}

/// Actions assistive technology may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityAction {
    ScrollForward,
    ScrollBackward,
}

/// What the pager currently allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibilityInfo {
    pub scrollable: bool,
    pub can_scroll_forward: bool,
    pub can_scroll_backward: bool,
}

impl AccessibilityInfo {
    /// Capabilities for `current` of `count` pages.
    #[must_use]
    pub fn for_page(current: usize, count: usize) -> Self {
        Self {
            scrollable: count > 1,
            can_scroll_forward: current + 1 < count,
            can_scroll_backward: current > 0 && count > 0,
        }
    }

    #[must_use]
    pub fn supports(&self, action: AccessibilityAction) -> bool {
        match action {
            AccessibilityAction::ScrollForward => self.can_scroll_forward,
            AccessibilityAction::ScrollBackward => self.can_scroll_backward,
        }
    }
}

/// Forwards page changes to an optional sink.
#[derive(Default)]
pub struct AccessibilityBridge {
    sink: Option<Box<dyn AccessibilitySink>>,
}

impl std::fmt::Debug for AccessibilityBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessibilityBridge")
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

impl AccessibilityBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, sink: Box<dyn AccessibilitySink>) {
        self.sink = Some(sink);
    }

    pub fn detach(&mut self) -> Option<Box<dyn AccessibilitySink>> {
        self.sink.take()
    }

    fn enabled_sink(&mut self) -> Option<&mut Box<dyn AccessibilitySink>> {
        self.sink.as_mut().filter(|s| s.is_enabled())
    }

    /// A snap is about to commit `to_page`. Reports a scroll event when the
    /// page actually changes.
    pub fn on_settling(&mut self, event: ScrollEvent) {
        if event.from_page == event.to_page {
            return;
        }
        if let Some(sink) = self.enabled_sink() {
            tracing::trace!(target: "pageflow.a11y", to = event.to_page, "scroll event");
            sink.scroll_event(event);
        }
    }

    /// Announce the page just reached.
    pub fn announce(&mut self, description: &str) {
        if let Some(sink) = self.enabled_sink() {
            tracing::trace!(target: "pageflow.a11y", description, "announce");
            sink.announce(description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        spoken: Vec<String>,
        scrolls: Vec<ScrollEvent>,
    }

    struct Sink {
        log: Rc<RefCell<Log>>,
        enabled: bool,
    }

    impl AccessibilitySink for Sink {
        fn is_enabled(&self) -> bool {
            self.enabled
        }
        fn announce(&mut self, text: &str) {
            self.log.borrow_mut().spoken.push(text.to_owned());
        }
        fn scroll_event(&mut self, event: ScrollEvent) {
            self.log.borrow_mut().scrolls.push(event);
        }
    }

    fn bridge(enabled: bool) -> (AccessibilityBridge, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut bridge = AccessibilityBridge::new();
        bridge.attach(Box::new(Sink {
            log: log.clone(),
            enabled,
        }));
        (bridge, log)
    }

    fn scroll(from_page: usize, to_page: usize) -> ScrollEvent {
        ScrollEvent {
            scroll_x: 1000,
            max_scroll_x: 4000,
            from_page,
            to_page,
        }
    }

    #[test]
    fn info_at_ends() {
        let first = AccessibilityInfo::for_page(0, 3);
        assert!(first.scrollable && first.can_scroll_forward && !first.can_scroll_backward);
        let last = AccessibilityInfo::for_page(2, 3);
        assert!(!last.can_scroll_forward && last.can_scroll_backward);
        assert!(last.supports(AccessibilityAction::ScrollBackward));
        let single = AccessibilityInfo::for_page(0, 1);
        assert_eq!(single, AccessibilityInfo::default());
        assert_eq!(AccessibilityInfo::for_page(0, 0), AccessibilityInfo::default());
    }

    #[test]
    fn scroll_event_only_on_page_change() {
        let (mut bridge, log) = bridge(true);
        bridge.on_settling(scroll(1, 1));
        assert!(log.borrow().scrolls.is_empty());
        bridge.on_settling(scroll(1, 2));
        assert_eq!(log.borrow().scrolls, vec![scroll(1, 2)]);
    }

    #[test]
    fn disabled_sink_hears_nothing() {
        let (mut bridge, log) = bridge(false);
        bridge.on_settling(scroll(0, 1));
        bridge.announce("Page 2 of 5");
        assert!(log.borrow().scrolls.is_empty());
        assert!(log.borrow().spoken.is_empty());
    }

    #[test]
    fn announce_forwards_text() {
        let (mut bridge, log) = bridge(true);
        bridge.announce("Page 2 of 5");
        assert_eq!(log.borrow().spoken, vec!["Page 2 of 5".to_owned()]);
    }
}

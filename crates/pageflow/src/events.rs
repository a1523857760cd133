#![forbid(unsafe_code)]

//! Outbound notifications.
//!
//! The pager reports everything the presentation layer and observers need
//! as [`PagerEvent`]s, in the order they happened. Per-frame presentation
//! events (`ScreenScrolled`, `PageTranslated`, `DraggedPage`, `Overscroll`)
//! are only produced by `tick`.

use pageflow_core::geometry::Point;

/// Visual transform of the page being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl DragTransform {
    pub const IDENTITY: DragTransform = DragTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    /// Linear blend toward `other`; `t = 0` is `self`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            translate_x: mix(self.translate_x, other.translate_x),
            translate_y: mix(self.translate_y, other.translate_y),
            scale: mix(self.scale, other.scale),
        }
    }
}

impl Default for DragTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Something observable happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    // --- Presentation -----------------------------------------------------
    /// The viewport centre (content coordinates) changed.
    ScreenScrolled { center: i32 },
    /// A page shifted by a reorder is offset from its slot by `dx`.
    PageTranslated { index: usize, dx: f32 },
    /// Transform of the page being dragged or dropped.
    DraggedPage { index: usize, transform: DragTransform },
    /// Edge stretch. `pull` is in `[-1, 1]`, `stretch` is in pixels.
    Overscroll { pull: f32, stretch: f32 },

    // --- Lifecycle --------------------------------------------------------
    /// Pages started moving (drag or animation).
    PageBeginMoving,
    /// Pages came to rest.
    PageEndMoving,
    /// The user started scrolling by touch.
    ScrollInteractionBegin,
    /// The user lifted after scrolling.
    ScrollInteractionEnd,
    /// A snap toward `page` started.
    NextPageChanged { page: usize },
    /// `page` became the current page.
    PageSettled { page: usize },

    // --- Reorder ----------------------------------------------------------
    ReorderStarted { index: usize },
    /// The dragged page moved from slot `from` to slot `to`.
    PageRepositioned { from: usize, to: usize },
    ReorderEnded,

    // --- Input ------------------------------------------------------------
    /// A tap nothing consumed.
    UnhandledTap { pos: Point },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let lifted = DragTransform {
            translate_x: 40.0,
            translate_y: -10.0,
            scale: 1.15,
        };
        assert_eq!(lifted.lerp(DragTransform::IDENTITY, 0.0), lifted);
        assert_eq!(lifted.lerp(DragTransform::IDENTITY, 1.0), DragTransform::IDENTITY);
        let mid = lifted.lerp(DragTransform::IDENTITY, 0.5);
        assert_eq!(mid.translate_x, 20.0);
        assert!((mid.scale - 1.075).abs() < 1e-6);
    }
}

#![forbid(unsafe_code)]

//! Horizontally paged container engine.
//!
//! # Role in pageflow
//! `pageflow` turns pointer input and frame ticks into scroll offsets, page
//! changes, and presentation events for a row of pages. It does not draw:
//! the host owns the pages and renders whatever the [`PagerEvent`]s say.
//!
//! # Primary responsibilities
//! - **ScrollModel**: per-page scroll targets, clamping, overscroll, RTL.
//! - **SnapAnimator**: eased snaps and free-scroll flings from wall-clock time.
//! - **GestureClassifier**: press, drag, fling, and edge-tap classification.
//! - **ReorderController**: long-press drag to reorder pages.
//! - **PageIndicatorSync** and **AccessibilityBridge**: keep indicators and
//!   assistive technology in step.
//! - **Pager**: the orchestrator hosts talk to.
//!
//! # How it fits in the system
//! The host implements [`PageHost`], feeds [`Pager::on_pointer`], and calls
//! [`Pager::tick`] once per frame. Animation and gesture primitives come from
//! `pageflow-core`.

pub mod accessibility;
pub mod config;
pub mod error;
pub mod events;
pub mod gesture;
pub mod host;
pub mod indicator;
pub mod pager;
pub mod reorder;
pub mod scroll_model;
pub mod snap;

pub use accessibility::{
    AccessibilityAction, AccessibilityBridge, AccessibilityInfo, AccessibilitySink, ScrollEvent,
};
pub use config::{FlingConfig, OverscrollConfig, PagerConfig, ReorderConfig};
pub use error::{PagerError, ReorderRejected, Result};
pub use events::{DragTransform, PagerEvent};
pub use gesture::{GestureAction, GestureClassifier, ReleaseDecision, TouchState};
pub use host::{MemoryHost, PageExtent, PageHost};
pub use indicator::{PageIndicator, PageIndicatorSync};
pub use pager::{Pager, SavedState};
pub use reorder::ReorderController;
pub use scroll_model::{ScrollModel, ScrollResult};
pub use snap::{SnapAnimator, SnapTick};

pub use pageflow_core::event::{Direction, PointerEvent, PointerEventKind, PointerId};
pub use pageflow_core::geometry::{Insets, Point, Rect};

#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and animation primitives for pageflow.
//!
//! # Role in pageflow
//! `pageflow-core` is the leaf layer. It knows nothing about pages; it owns
//! the value types the paging engine (`pageflow`) is built from.
//!
//! # Primary responsibilities
//! - **Geometry**: integer [`Rect`](geometry::Rect) / [`Insets`](geometry::Insets)
//!   for layout and float [`Point`](geometry::Point) for pointer positions.
//! - **Event**: normalized pointer events, including secondary-pointer lifts.
//! - **Animation**: wall-clock [`Tween`](animation::Tween) and
//!   [`Decay`](animation::Decay) driven by `tick(now)` rather than per-frame
//!   increments, plus the easing curves the pager uses.
//! - **Velocity**: a ring-buffer [`VelocityTracker`](velocity::VelocityTracker)
//!   for release velocity.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod velocity;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

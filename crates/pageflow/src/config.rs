#![forbid(unsafe_code)]

//! Tunable pager parameters.
//!
//! Every threshold the gesture classifier, snap animator, and reorder
//! controller consult lives in [`PagerConfig`]. Distances are given in
//! density-independent units and scaled by [`PagerConfig::density`] through
//! the `*_px` accessors; durations are whole milliseconds.
//!
//! # Loading
//!
//! With the `config-file` feature the config can be read from TOML or JSON.
//! Missing keys fall back to their defaults:
//!
//! ```toml
//! density = 2.0
//! page_snap_duration_ms = 600
//!
//! [fling]
//! min_snap_velocity = 1800.0
//!
//! [reorder]
//! pickup_scale = 1.1
//! ```
//!
//! ```rust,ignore
//! let config = PagerConfig::from_toml_file("pager.toml")?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use web_time::Duration;

use crate::error::{PagerError, Result};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Pager configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct PagerConfig {
    /// Pixels per density-independent unit.
    pub density: f32,
    /// Horizontal travel before a press becomes a scroll (dp).
    pub touch_slop: f32,
    /// Fraction of a page width past which a slow drag still advances.
    pub significant_move_threshold: f32,
    /// Fraction of a page width a reversed fling must exceed to return to
    /// the page the drag started on.
    pub return_to_original_threshold: f32,
    /// Default snap duration.
    pub page_snap_duration_ms: u64,
    /// Gap between adjacent pages (px).
    pub page_spacing: i32,
    /// Width of the tap-to-page strips at either edge (dp).
    pub edge_tap_margin: f32,
    /// Accessibility description. `{current}` is 1-based.
    pub page_description_format: String,
    pub fling: FlingConfig,
    pub reorder: ReorderConfig,
    pub overscroll: OverscrollConfig,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            touch_slop: 16.0,
            significant_move_threshold: 0.4,
            return_to_original_threshold: 0.33,
            page_snap_duration_ms: 750,
            page_spacing: 0,
            edge_tap_margin: 24.0,
            page_description_format: "Page {current} of {count}".into(),
            fling: FlingConfig::default(),
            reorder: ReorderConfig::default(),
            overscroll: OverscrollConfig::default(),
        }
    }
}

impl PagerConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Check every parameter. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.density.is_finite() && positive(self.density)) {
            errors.push(format!("density must be > 0, got {}", self.density));
        }
        if !non_negative(self.touch_slop) {
            errors.push(format!("touch_slop must be >= 0, got {}", self.touch_slop));
        }
        for (name, value) in [
            ("significant_move_threshold", self.significant_move_threshold),
            (
                "return_to_original_threshold",
                self.return_to_original_threshold,
            ),
        ] {
            if !(positive(value) && value < 1.0) {
                errors.push(format!("{name} must be in (0, 1), got {value}"));
            }
        }
        if self.page_spacing < 0 {
            errors.push(format!(
                "page_spacing must be >= 0, got {}",
                self.page_spacing
            ));
        }
        if !non_negative(self.edge_tap_margin) {
            errors.push(format!(
                "edge_tap_margin must be >= 0, got {}",
                self.edge_tap_margin
            ));
        }

        let f = &self.fling;
        for (name, value) in [
            ("fling.min_length_for_fling", f.min_length_for_fling),
            ("fling.fling_threshold_velocity", f.fling_threshold_velocity),
            ("fling.min_fling_velocity", f.min_fling_velocity),
        ] {
            if !non_negative(value) {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }
        if !positive(f.min_snap_velocity) {
            errors.push(format!(
                "fling.min_snap_velocity must be > 0, got {}",
                f.min_snap_velocity
            ));
        }
        if f.max_fling_velocity.is_nan() || f.max_fling_velocity < f.min_snap_velocity {
            errors.push(format!(
                "fling.max_fling_velocity must be >= fling.min_snap_velocity, got {}",
                f.max_fling_velocity
            ));
        }
        if f.free_scroll_time_constant_ms == 0 {
            errors.push("fling.free_scroll_time_constant_ms must be > 0".into());
        }

        let r = &self.reorder;
        if !positive(r.pickup_scale) {
            errors.push(format!(
                "reorder.pickup_scale must be > 0, got {}",
                r.pickup_scale
            ));
        }

        let o = &self.overscroll;
        if !(non_negative(o.damp_factor) && o.damp_factor <= 1.0) {
            errors.push(format!(
                "overscroll.damp_factor must be in [0, 1], got {}",
                o.damp_factor
            ));
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(PagerError::InvalidConfig { problems })
        }
    }

    // --- Scaled accessors ---------------------------------------------------

    #[inline]
    #[must_use]
    pub fn touch_slop_px(&self) -> f32 {
        self.touch_slop * self.density
    }

    #[inline]
    #[must_use]
    pub fn edge_tap_margin_px(&self) -> i32 {
        (self.edge_tap_margin * self.density).round() as i32
    }

    #[inline]
    #[must_use]
    pub fn min_length_for_fling_px(&self) -> f32 {
        // Raw pixels: not scaled by density.
        self.fling.min_length_for_fling
    }

    #[inline]
    #[must_use]
    pub fn fling_threshold_px(&self) -> f32 {
        self.fling.fling_threshold_velocity * self.density
    }

    #[inline]
    #[must_use]
    pub fn min_fling_velocity_px(&self) -> f32 {
        self.fling.min_fling_velocity * self.density
    }

    #[inline]
    #[must_use]
    pub fn min_snap_velocity_px(&self) -> f32 {
        self.fling.min_snap_velocity * self.density
    }

    #[inline]
    #[must_use]
    pub fn max_fling_velocity_px(&self) -> f32 {
        self.fling.max_fling_velocity * self.density
    }

    #[inline]
    #[must_use]
    pub fn page_snap_duration(&self) -> Duration {
        Duration::from_millis(self.page_snap_duration_ms)
    }

    /// Render the accessibility description for `page` (0-based).
    #[must_use]
    pub fn describe_page(&self, page: usize, count: usize) -> String {
        self.page_description_format
            .replace("{current}", &(page + 1).to_string())
            .replace("{count}", &count.to_string())
    }
}

// NaN fails both checks.
fn positive(v: f32) -> bool {
    v > 0.0
}

fn non_negative(v: f32) -> bool {
    v >= 0.0
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Release-velocity thresholds. Velocities are dp per second.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct FlingConfig {
    /// Total drag travel, in raw pixels, required before a release can
    /// count as a fling.
    pub min_length_for_fling: f32,
    /// Release speed above which a drag counts as a fling.
    pub fling_threshold_velocity: f32,
    /// Below this speed a velocity snap uses the default duration.
    pub min_fling_velocity: f32,
    /// Floor applied to the speed when deriving a snap duration.
    pub min_snap_velocity: f32,
    /// Clamp for tracked release velocity.
    pub max_fling_velocity: f32,
    /// Time constant of the free-scroll decay.
    pub free_scroll_time_constant_ms: u64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            min_length_for_fling: 25.0,
            fling_threshold_velocity: 500.0,
            min_fling_velocity: 250.0,
            min_snap_velocity: 1500.0,
            max_fling_velocity: 8000.0,
            free_scroll_time_constant_ms: 325,
        }
    }
}

impl FlingConfig {
    #[inline]
    #[must_use]
    pub fn free_scroll_time_constant(&self) -> Duration {
        Duration::from_millis(self.free_scroll_time_constant_ms)
    }
}

/// Drag-to-reorder timings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ReorderConfig {
    /// How long the hover target must stay put before pages shift.
    pub hover_timeout_ms: u64,
    /// Duration of the neighbour shift after a reposition.
    pub reposition_duration_ms: u64,
    /// Duration of the drop animation on release.
    pub drop_duration_ms: u64,
    /// Duration of the lift animation on pickup.
    pub pickup_duration_ms: u64,
    /// Scale of the lifted page.
    pub pickup_scale: f32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            hover_timeout_ms: 80,
            reposition_duration_ms: 300,
            drop_duration_ms: 200,
            pickup_duration_ms: 100,
            pickup_scale: 1.15,
        }
    }
}

impl ReorderConfig {
    #[inline]
    #[must_use]
    pub fn hover_timeout(&self) -> Duration {
        Duration::from_millis(self.hover_timeout_ms)
    }

    #[inline]
    #[must_use]
    pub fn reposition_duration(&self) -> Duration {
        Duration::from_millis(self.reposition_duration_ms)
    }

    #[inline]
    #[must_use]
    pub fn drop_duration(&self) -> Duration {
        Duration::from_millis(self.drop_duration_ms)
    }

    #[inline]
    #[must_use]
    pub fn pickup_duration(&self) -> Duration {
        Duration::from_millis(self.pickup_duration_ms)
    }
}

/// Edge-stretch behaviour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct OverscrollConfig {
    /// Allow dragging past the first and last page.
    pub allow: bool,
    /// Fraction of the viewport the stretch saturates at.
    pub damp_factor: f32,
    /// How long the stretch takes to relax after release.
    pub release_ms: u64,
}

impl Default for OverscrollConfig {
    fn default() -> Self {
        Self {
            allow: true,
            damp_factor: 0.14,
            release_ms: 250,
        }
    }
}

impl OverscrollConfig {
    #[inline]
    #[must_use]
    pub fn release_duration(&self) -> Duration {
        Duration::from_millis(self.release_ms)
    }
}

#![forbid(unsafe_code)]

//! Error model.
//!
//! The gesture and animation paths never fail: bad indices are clamped,
//! conflicting requests are refused with a `bool` or a [`ReorderRejected`]
//! reason. [`PagerError`] only covers constructing a pager and loading its
//! configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PagerError>;

/// Construction and configuration errors.
#[derive(Debug, Error)]
pub enum PagerError {
    /// One or more configuration values are out of range.
    #[error("invalid pager configuration: {}", problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    #[cfg(feature = "config-file")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-file")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a reorder could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReorderRejected {
    #[error("another reorder session is still active")]
    Busy,
    #[error("page {index} is outside the reorderable range {first}..={last}")]
    OutOfRange {
        index: usize,
        first: usize,
        last: usize,
    },
    #[error("touch is not at rest")]
    NotAtRest,
    #[error("no pointer is down")]
    NoActiveTouch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_problem() {
        let err = PagerError::InvalidConfig {
            problems: vec!["density must be > 0".into(), "touch_slop must be >= 0".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("density must be > 0"));
        assert!(msg.contains("touch_slop must be >= 0"));
    }

    #[test]
    fn rejection_messages() {
        let err = ReorderRejected::OutOfRange {
            index: 7,
            first: 1,
            last: 4,
        };
        assert_eq!(
            err.to_string(),
            "page 7 is outside the reorderable range 1..=4"
        );
        assert_eq!(ReorderRejected::Busy.to_string(), "another reorder session is still active");
    }
}

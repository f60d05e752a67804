//! Error types for position allocation

use thiserror::Error;

/// Result type for position operations
pub type Result<T> = std::result::Result<T, PositionError>;

/// Errors that can occur while allocating positions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    /// Target index is outside `[0, len]`
    #[error("index {index} out of range for sibling group of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// Positions are not strictly ascending
    #[error("positions not strictly ascending at index {index}: {previous} then {current}")]
    UnorderedInput {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A position is NaN or infinite
    #[error("position at index {index} is not finite: {value}")]
    InvalidPosition { index: usize, value: f64 },

    /// The gap around the target index is exhausted; the group must be renumbered
    #[error("no usable gap at index {index} between {lower} and {upper}; rebalance required")]
    RebalanceRequired { index: usize, lower: f64, upper: f64 },

    /// Allocator configuration is unusable
    #[error("invalid allocator configuration: {message}")]
    InvalidConfig { message: String },
}

impl PositionError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if the caller can recover by rebalancing and retrying once.
    ///
    /// Every other variant indicates a caller bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RebalanceRequired { .. })
    }
}

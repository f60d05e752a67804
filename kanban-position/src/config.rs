//! Allocator configuration

use crate::error::{PositionError, Result};
use serde::{Deserialize, Serialize};

/// Spacing reserved at the ends of a sibling group and between rebalanced items.
pub const DEFAULT_GAP: f64 = 65535.0;

/// Smallest gap that may still be split. `DEFAULT_GAP / 2^50`.
pub const DEFAULT_MIN_GAP: f64 = DEFAULT_GAP / (1u64 << 50) as f64;

/// Tunables for [`PositionAllocator`](crate::PositionAllocator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Buffer gap `G`: first position, tail step, and rebalance spacing
    pub gap: f64,
    /// Gaps strictly below this are treated as exhausted
    pub min_gap: f64,
}

impl AllocatorConfig {
    /// Create a config with the given gap and the default exhaustion bound
    pub fn with_gap(gap: f64) -> Self {
        Self {
            gap,
            ..Self::default()
        }
    }

    /// Override the exhaustion bound
    pub fn with_min_gap(mut self, min_gap: f64) -> Self {
        self.min_gap = min_gap;
        self
    }

    /// Reject values the allocator cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.gap.is_finite() || self.gap <= 0.0 {
            return Err(PositionError::invalid_config(format!(
                "gap must be finite and positive, got {}",
                self.gap
            )));
        }
        if !self.min_gap.is_finite() || self.min_gap <= 0.0 {
            return Err(PositionError::invalid_config(format!(
                "min_gap must be finite and positive, got {}",
                self.min_gap
            )));
        }
        if self.min_gap >= self.gap {
            return Err(PositionError::invalid_config(format!(
                "min_gap ({}) must be smaller than gap ({})",
                self.min_gap, self.gap
            )));
        }
        Ok(())
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            min_gap: DEFAULT_MIN_GAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AllocatorConfig::default();
        assert_eq!(config.gap, 65535.0);
        assert_eq!(config.min_gap * 2f64.powi(50), 65535.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AllocatorConfig::with_gap(0.0).validate().is_err());
        assert!(AllocatorConfig::with_gap(-1.0).validate().is_err());
        assert!(AllocatorConfig::with_gap(f64::INFINITY).validate().is_err());
        assert!(AllocatorConfig::default()
            .with_min_gap(f64::NAN)
            .validate()
            .is_err());

        let err = AllocatorConfig::with_gap(10.0)
            .with_min_gap(10.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PositionError::InvalidConfig { .. }));
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: AllocatorConfig = serde_json::from_str(r#"{"gap": 1024.0}"#).unwrap();
        assert_eq!(config.gap, 1024.0);
        assert_eq!(config.min_gap, DEFAULT_MIN_GAP);
    }
}

//! Position allocation for reorderable sibling groups.
//!
//! Moving or inserting one item computes a single new position from its
//! neighbours, so a drag-and-drop reorder writes one record instead of
//! renumbering the group. Repeated splits of the same gap eventually exhaust
//! floating-point resolution; the allocator reports that as
//! [`PositionError::RebalanceRequired`] and the caller renumbers the group
//! with [`PositionAllocator::rebalance`] before retrying.

use crate::config::AllocatorConfig;
use crate::error::{PositionError, Result};
use crate::position::{Position, Positioned};
use tracing::{debug, trace};

/// Stateless allocator over an ascending sequence of positions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionAllocator {
    config: AllocatorConfig,
}

impl PositionAllocator {
    /// Create an allocator, rejecting unusable configuration
    pub fn new(config: AllocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Position for an item inserted at `index` of `positions`.
    ///
    /// `positions` must be strictly ascending and `index` must lie in
    /// `[0, positions.len()]`. No other item needs a new position afterwards.
    pub fn allocate(&self, positions: &[Position], index: usize) -> Result<Position> {
        if index > positions.len() {
            return Err(PositionError::InvalidIndex {
                index,
                len: positions.len(),
            });
        }
        check_ascending(positions)?;

        let position = self.candidate(positions, index)?;
        trace!(index, len = positions.len(), %position, "allocated position");
        Ok(position)
    }

    /// Position for a brand-new item placed after every existing sibling
    pub fn append(&self, positions: &[Position]) -> Result<Position> {
        self.allocate(positions, positions.len())
    }

    /// Position for an item that already sits at `index` of `positions`.
    ///
    /// This is the drag-and-drop shape: the display list has been updated
    /// locally and the moved item's stored position is stale. Only its
    /// neighbours are consulted.
    pub fn reposition(&self, positions: &[Position], index: usize) -> Result<Position> {
        if index >= positions.len() {
            return Err(PositionError::InvalidIndex {
                index,
                len: positions.len(),
            });
        }

        let mut siblings = Vec::with_capacity(positions.len() - 1);
        siblings.extend_from_slice(&positions[..index]);
        siblings.extend_from_slice(&positions[index + 1..]);
        self.allocate(&siblings, index)
    }

    /// Renumber a group as `G, 2G, 3G, ...` in the given display order.
    ///
    /// The returned assignments must be persisted together; a partially
    /// applied rebalance leaves the group ambiguous.
    pub fn rebalance<T, I>(&self, ids: I) -> Vec<(T, Position)>
    where
        I: IntoIterator<Item = T>,
    {
        let gap = self.config.gap;
        let assignments: Vec<(T, Position)> = ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, Position::new((i + 1) as f64 * gap)))
            .collect();

        debug!(count = assignments.len(), gap, "rebalanced sibling group");
        assignments
    }

    /// [`rebalance`](Self::rebalance) over items already in display order
    pub fn rebalance_items<T: Positioned>(&self, items: &[T]) -> Vec<(T::Id, Position)> {
        self.rebalance(items.iter().map(|item| item.id().clone()))
    }

    /// Whether any insertion index of `positions` would need a rebalance.
    ///
    /// Lets a caller renumber proactively during maintenance instead of
    /// waiting for a drop to fail.
    pub fn needs_rebalance(&self, positions: &[Position]) -> Result<bool> {
        check_ascending(positions)?;

        for index in 0..=positions.len() {
            match self.candidate(positions, index) {
                Ok(_) => {}
                Err(PositionError::RebalanceRequired { .. }) => return Ok(true),
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    /// Compute the new position for a validated, ascending input
    fn candidate(&self, positions: &[Position], index: usize) -> Result<Position> {
        let len = positions.len();

        if len == 0 {
            return Ok(Position::new(self.config.gap));
        }

        if index == len {
            let last = positions[len - 1].value();
            let next = last + self.config.gap;
            if !next.is_finite() || next <= last {
                return Err(rebalance_required(index, last, f64::INFINITY));
            }
            return Ok(Position::new(next));
        }

        // Head insertion splits the gap down to an implicit zero.
        let lower = if index == 0 {
            0.0
        } else {
            positions[index - 1].value()
        };
        let upper = positions[index].value();
        self.split(index, lower, upper)
    }

    fn split(&self, index: usize, lower: f64, upper: f64) -> Result<Position> {
        let gap = upper - lower;
        if gap.is_nan() || gap < self.config.min_gap {
            return Err(rebalance_required(index, lower, upper));
        }

        let mid = (lower + upper) / 2.0;
        if !(lower < mid && mid < upper) {
            return Err(rebalance_required(index, lower, upper));
        }
        Ok(Position::new(mid))
    }
}

fn rebalance_required(index: usize, lower: f64, upper: f64) -> PositionError {
    debug!(index, lower, upper, "gap exhausted, rebalance required");
    PositionError::RebalanceRequired {
        index,
        lower,
        upper,
    }
}

/// Reject non-finite values and anything not strictly ascending
fn check_ascending(positions: &[Position]) -> Result<()> {
    for (index, position) in positions.iter().enumerate() {
        if !position.is_finite() {
            return Err(PositionError::InvalidPosition {
                index,
                value: position.value(),
            });
        }
        if index > 0 {
            let previous = positions[index - 1].value();
            if previous >= position.value() {
                return Err(PositionError::UnorderedInput {
                    index,
                    previous,
                    current: position.value(),
                });
            }
        }
    }
    Ok(())
}

/// [`PositionAllocator::allocate`] with the default configuration
pub fn allocate(positions: &[Position], index: usize) -> Result<Position> {
    PositionAllocator::default().allocate(positions, index)
}

/// [`PositionAllocator::rebalance`] with the default configuration
pub fn rebalance<T, I>(ids: I) -> Vec<(T, Position)>
where
    I: IntoIterator<Item = T>,
{
    PositionAllocator::default().rebalance(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GAP;

    fn positions(values: &[f64]) -> Vec<Position> {
        values.iter().copied().map(Position::new).collect()
    }

    #[test]
    fn test_empty_group_gets_gap() {
        assert_eq!(allocate(&[], 0).unwrap(), Position::new(65535.0));
    }

    #[test]
    fn test_single_item_head_halves() {
        let s = positions(&[65535.0]);
        assert_eq!(allocate(&s, 0).unwrap(), Position::new(32767.5));
    }

    #[test]
    fn test_single_item_tail_adds_gap() {
        let s = positions(&[65535.0]);
        assert_eq!(allocate(&s, 1).unwrap(), Position::new(131070.0));
    }

    #[test]
    fn test_between_takes_midpoint() {
        let s = positions(&[32767.5, 65535.0]);
        assert_eq!(allocate(&s, 1).unwrap(), Position::new(49151.25));
    }

    #[test]
    fn test_invalid_index() {
        let s = positions(&[1.0, 2.0]);
        assert_eq!(
            allocate(&s, 3),
            Err(PositionError::InvalidIndex { index: 3, len: 2 })
        );
        assert!(matches!(
            allocate(&[], 1),
            Err(PositionError::InvalidIndex { index: 1, len: 0 })
        ));
    }

    #[test]
    fn test_unordered_input() {
        let s = positions(&[2.0, 1.0]);
        assert!(matches!(
            allocate(&s, 0),
            Err(PositionError::UnorderedInput { index: 1, .. })
        ));

        let duplicate = positions(&[5.0, 5.0]);
        assert!(matches!(
            allocate(&duplicate, 2),
            Err(PositionError::UnorderedInput { .. })
        ));
    }

    #[test]
    fn test_non_finite_input() {
        let s = positions(&[1.0, f64::NAN]);
        assert!(matches!(
            allocate(&s, 2),
            Err(PositionError::InvalidPosition { index: 1, .. })
        ));
        assert!(matches!(
            allocate(&positions(&[f64::INFINITY]), 0),
            Err(PositionError::InvalidPosition { index: 0, .. })
        ));
    }

    #[test]
    fn test_head_with_non_positive_first_requires_rebalance() {
        for first in [0.0, -10.0] {
            let s = positions(&[first, 100.0]);
            assert!(matches!(
                allocate(&s, 0),
                Err(PositionError::RebalanceRequired { index: 0, .. })
            ));
        }
    }

    #[test]
    fn test_tiny_gap_requires_rebalance() {
        let lower = 1.0;
        let upper = lower + DEFAULT_GAP / 2f64.powi(52);
        let s = positions(&[lower, upper]);
        let err = allocate(&s, 1).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_adjacent_floats_require_rebalance() {
        let lower: f64 = 1.0e12;
        let upper = f64::from_bits(lower.to_bits() + 1);
        let config = AllocatorConfig::with_gap(1.0e15).with_min_gap(f64::MIN_POSITIVE);
        let allocator = PositionAllocator::new(config).unwrap();

        let err = allocator.allocate(&positions(&[lower, upper]), 1).unwrap_err();
        assert!(matches!(err, PositionError::RebalanceRequired { .. }));
    }

    #[test]
    fn test_tail_overflow_requires_rebalance() {
        let s = positions(&[f64::MAX]);
        assert!(matches!(
            allocate(&s, 1),
            Err(PositionError::RebalanceRequired { index: 1, .. })
        ));

        // Too large for the gap to register
        let s = positions(&[1.0e30]);
        assert!(allocate(&s, 1).unwrap_err().is_recoverable());
    }

    #[test]
    fn test_head_prepend_bound() {
        let mut s = positions(&[DEFAULT_GAP]);
        for _ in 0..51 {
            let head = allocate(&s, 0).unwrap();
            assert!(head < s[0]);
            assert!(head.value() > 0.0);
            s.insert(0, head);
        }
        assert!(allocate(&s, 0).unwrap_err().is_recoverable());
    }

    #[test]
    fn test_append_arithmetic_progression() {
        let mut s = Vec::new();
        for i in 1..=10 {
            let next = PositionAllocator::default().append(&s).unwrap();
            assert_eq!(next.value(), i as f64 * DEFAULT_GAP);
            s.push(next);
        }
    }

    #[test]
    fn test_reposition_ignores_stale_value() {
        let allocator = PositionAllocator::default();

        // Item dragged from the tail (stale 300) to index 1
        let s = positions(&[100.0, 300.0, 200.0]);
        assert_eq!(allocator.reposition(&s, 1).unwrap(), Position::new(150.0));

        // Dragged to the head
        let s = positions(&[300.0, 100.0, 200.0]);
        assert_eq!(allocator.reposition(&s, 0).unwrap(), Position::new(50.0));

        // Dragged to the tail
        let s = positions(&[200.0, 300.0, 100.0]);
        assert_eq!(
            allocator.reposition(&s, 2).unwrap(),
            Position::new(300.0 + DEFAULT_GAP)
        );

        // Only item in the group
        let s = positions(&[12.0]);
        assert_eq!(allocator.reposition(&s, 0).unwrap(), Position::new(DEFAULT_GAP));
    }

    #[test]
    fn test_reposition_index_must_hold_item() {
        let allocator = PositionAllocator::default();
        assert!(matches!(
            allocator.reposition(&positions(&[1.0]), 1),
            Err(PositionError::InvalidIndex { index: 1, len: 1 })
        ));
        assert!(matches!(
            allocator.reposition(&[], 0),
            Err(PositionError::InvalidIndex { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_rebalance_spacing() {
        let assigned = rebalance(["c", "a", "b"]);
        assert_eq!(
            assigned,
            vec![
                ("c", Position::new(65535.0)),
                ("a", Position::new(131070.0)),
                ("b", Position::new(196605.0)),
            ]
        );
        assert!(rebalance(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn test_rebalance_restores_every_index() {
        let lower = 1.0;
        let upper = lower + DEFAULT_GAP / 2f64.powi(52);
        let s = positions(&[lower, upper, upper + 1.0]);
        assert!(allocate(&s, 1).is_err());

        let renumbered: Vec<Position> = rebalance(0..s.len()).into_iter().map(|(_, p)| p).collect();
        for index in 0..=renumbered.len() {
            assert!(allocate(&renumbered, index).is_ok());
        }
    }

    #[test]
    fn test_needs_rebalance() {
        let allocator = PositionAllocator::default();
        assert!(!allocator.needs_rebalance(&[]).unwrap());
        assert!(!allocator
            .needs_rebalance(&positions(&[65535.0, 131070.0]))
            .unwrap());

        let cramped = positions(&[1.0, 1.0 + DEFAULT_GAP / 2f64.powi(52), 5.0]);
        assert!(allocator.needs_rebalance(&cramped).unwrap());

        assert!(matches!(
            allocator.needs_rebalance(&positions(&[3.0, 2.0])),
            Err(PositionError::UnorderedInput { .. })
        ));
    }

    #[test]
    fn test_custom_gap() {
        let allocator = PositionAllocator::new(AllocatorConfig::with_gap(1024.0)).unwrap();
        assert_eq!(allocator.append(&[]).unwrap(), Position::new(1024.0));
        assert_eq!(
            allocator.rebalance(["x", "y"]),
            vec![("x", Position::new(1024.0)), ("y", Position::new(2048.0))]
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            PositionAllocator::new(AllocatorConfig::with_gap(-5.0)),
            Err(PositionError::InvalidConfig { .. })
        ));
    }
}

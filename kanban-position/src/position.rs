//! Numeric sort key for items in a sibling group.

use crate::config::DEFAULT_GAP;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Ordering within a sibling group (cards in a list, lists in a board).
///
/// Only relative order matters. Siblings are displayed in ascending position,
/// so an item can be placed between two others by picking any value in the
/// open interval between them, without rewriting anyone else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(f64);

impl Position {
    /// Position of the first item in an empty group, using the default gap
    pub fn first() -> Self {
        Self(DEFAULT_GAP)
    }

    /// Wrap a raw value
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(self) -> f64 {
        self.0
    }

    /// NaN and infinities cannot take part in ordering
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Position> for f64 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equality follows the same total order as [`Ord`], so `-0.0` and `0.0`
/// are distinct and NaN equals itself.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::first()
    }
}

/// An item that lives in a sibling group.
pub trait Positioned {
    /// Opaque identity, never interpreted by the allocator
    type Id: Clone;

    fn id(&self) -> &Self::Id;

    fn position(&self) -> Position;
}

/// Project items (already in display order) onto their positions
pub fn positions_of<T: Positioned>(items: &[T]) -> Vec<Position> {
    items.iter().map(Positioned::position).collect()
}

/// Sort items into display order, ascending by position
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
}

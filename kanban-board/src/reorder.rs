//! Placement of items within sibling groups, with rebalance-then-retry.
//!
//! A placement reads the current group from storage, asks the allocator for
//! one position, and leaves the write to the command. When the allocator
//! reports an exhausted gap the whole group is renumbered and persisted as a
//! unit, then the placement is retried exactly once. A second failure means
//! the store did not keep the rebalance and is reported as
//! [`BoardError::Inconsistent`].

use crate::error::{BoardError, Result};
use crate::store::SiblingStore;
use crate::types::Entity;
use kanban_position::{positions_of, Position, PositionAllocator, PositionError, Positioned};
use tracing::{debug, info, warn};

/// Where in the group the item should land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Display index after placement, counted without the moving item
    At(usize),
    /// After every existing sibling
    End,
}

/// Store plus allocator: the context every command executes against
pub struct Reorderer<S> {
    store: S,
    allocator: PositionAllocator,
}

impl<S: SiblingStore> Reorderer<S> {
    /// Create a reorderer with the default allocator
    pub fn new(store: S) -> Self {
        Self::with_allocator(store, PositionAllocator::default())
    }

    /// Create a reorderer with a configured allocator
    pub fn with_allocator(store: S, allocator: PositionAllocator) -> Self {
        Self { store, allocator }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the allocator
    pub fn allocator(&self) -> &PositionAllocator {
        &self.allocator
    }

    /// Position for an item landing at `slot` under `parent`.
    ///
    /// `moving` is excluded from the group so a same-parent move is computed
    /// against its future neighbours only.
    pub async fn place<E: Entity>(
        &self,
        parent: &E::Parent,
        moving: Option<&E::Id>,
        slot: Slot,
    ) -> Result<Position> {
        let siblings = self.siblings::<E>(parent, moving).await?;

        match self.allocate(&siblings, slot) {
            Ok(position) => Ok(position),
            Err(e) if needs_repair(&e) => {
                warn!(kind = E::KIND, %parent, error = %e, "renumbering sibling group");
                self.rebalance_group::<E>(parent).await?;

                let siblings = self.siblings::<E>(parent, moving).await?;
                self.allocate(&siblings, slot).map_err(|e| {
                    if needs_repair(&e) {
                        BoardError::Inconsistent {
                            resource: E::KIND.to_string(),
                            parent: parent.to_string(),
                            source: e,
                        }
                    } else {
                        e.into()
                    }
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Position for a new item after every existing sibling
    pub async fn append<E: Entity>(&self, parent: &E::Parent) -> Result<Position> {
        self.place::<E>(parent, None, Slot::End).await
    }

    /// Renumber every child of `parent` as `G, 2G, ...` in display order.
    ///
    /// Returns the group with its new positions.
    pub async fn rebalance_group<E: Entity>(&self, parent: &E::Parent) -> Result<Vec<E>> {
        let mut group: Vec<E> = self.store.fetch_group(parent).await?;
        let assignments = self.allocator.rebalance_items(&group);

        for (item, (_, position)) in group.iter_mut().zip(assignments) {
            item.set_position(position);
            item.touch();
        }

        self.store.persist_all(&group).await?;
        info!(kind = E::KIND, %parent, count = group.len(), "rebalanced group");
        Ok(group)
    }

    /// Rebalance only when some insertion point is exhausted.
    ///
    /// Returns whether a rebalance ran.
    pub async fn rebalance_if_needed<E: Entity>(&self, parent: &E::Parent) -> Result<bool> {
        let group: Vec<E> = self.store.fetch_group(parent).await?;
        let needed = match self.allocator.needs_rebalance(&positions_of(&group)) {
            Ok(needed) => needed,
            Err(e) if needs_repair(&e) => true,
            Err(e) => return Err(e.into()),
        };

        if needed {
            self.rebalance_group::<E>(parent).await?;
        } else {
            debug!(kind = E::KIND, %parent, "group spacing is healthy");
        }
        Ok(needed)
    }

    async fn siblings<E: Entity>(
        &self,
        parent: &E::Parent,
        moving: Option<&E::Id>,
    ) -> Result<Vec<Position>> {
        let group: Vec<E> = self.store.fetch_group(parent).await?;
        Ok(group
            .iter()
            .filter(|item| Some(item.id()) != moving)
            .map(Positioned::position)
            .collect())
    }

    fn allocate(
        &self,
        siblings: &[Position],
        slot: Slot,
    ) -> std::result::Result<Position, PositionError> {
        match slot {
            Slot::At(index) => self.allocator.allocate(siblings, index),
            Slot::End => self.allocator.append(siblings),
        }
    }
}

/// Conditions a renumbering fixes.
///
/// Stored siblings that tie on position come from concurrent writers picking
/// the same midpoint; they surface as unordered input and are repaired the
/// same way as an exhausted gap.
fn needs_repair(error: &PositionError) -> bool {
    matches!(
        error,
        PositionError::RebalanceRequired { .. } | PositionError::UnorderedInput { .. }
    )
}

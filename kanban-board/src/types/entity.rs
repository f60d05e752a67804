//! The storage-facing view of anything that lives in a sibling group.

use super::ids::EntityId;
use kanban_position::{Position, Positioned};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A positioned record the store can persist and group by parent.
///
/// Lists are grouped by board, cards by list.
pub trait Entity:
    Positioned<Id: EntityId> + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Identifier of the owning parent
    type Parent: EntityId;

    /// Singular resource name used in errors and logs
    const KIND: &'static str;

    /// Storage directory name
    const DIR: &'static str;

    fn parent(&self) -> &Self::Parent;

    fn set_position(&mut self, position: Position);

    /// Stamp the modification time
    fn touch(&mut self);
}

/// Sort siblings into display order.
///
/// Ties on position are broken by id so every reader agrees on the order even
/// when concurrent writers collided on the same value.
pub fn display_order<E: Entity>(items: &mut [E]) {
    items.sort_by(|a, b| {
        a.position()
            .cmp(&b.position())
            .then_with(|| a.id().cmp(b.id()))
    });
}

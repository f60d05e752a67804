//! Storage boundary for sibling groups.
//!
//! Reordering needs three things from storage: fetch a parent's ordered
//! children, write one item, and write a whole group together when it is
//! rebalanced. How strongly "together" holds is up to the implementation;
//! each one documents its guarantee.

use crate::error::{BoardError, Result};
use crate::types::{display_order, Board, BoardId, Entity, EntityId};
use async_trait::async_trait;
use kanban_position::Positioned;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Persistence collaborator for boards and their sibling groups
#[async_trait]
pub trait SiblingStore: Send + Sync {
    /// Read board metadata
    async fn read_board(&self, id: &BoardId) -> Result<Board>;

    /// Write board metadata
    async fn write_board(&self, board: &Board) -> Result<()>;

    /// Read a single entity
    async fn read<E: Entity>(&self, id: &E::Id) -> Result<E>;

    /// All children of `parent`, in display order
    async fn fetch_group<E: Entity>(&self, parent: &E::Parent) -> Result<Vec<E>>;

    /// Write one entity, last write wins
    async fn persist<E: Entity>(&self, item: &E) -> Result<()>;

    /// Write several entities as one unit
    async fn persist_all<E: Entity>(&self, items: &[E]) -> Result<()>;

    /// Delete an entity
    async fn remove<E: Entity>(&self, id: &E::Id) -> Result<()>;
}

type EntityKey = (&'static str, String);

/// In-process store.
///
/// `persist_all` applies every write under a single write lock, so readers
/// observe either none or all of a rebalance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    boards: RwLock<HashMap<BoardId, Board>>,
    entities: RwLock<HashMap<EntityKey, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn key<E: Entity>(id: &E::Id) -> EntityKey {
        (E::KIND, id.as_str().to_string())
    }
}

#[async_trait]
impl SiblingStore for MemoryStore {
    async fn read_board(&self, id: &BoardId) -> Result<Board> {
        self.boards
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BoardError::not_found("board", id))
    }

    async fn write_board(&self, board: &Board) -> Result<()> {
        self.boards
            .write()
            .await
            .insert(board.id.clone(), board.clone());
        Ok(())
    }

    async fn read<E: Entity>(&self, id: &E::Id) -> Result<E> {
        let entities = self.entities.read().await;
        let value = entities
            .get(&Self::key::<E>(id))
            .ok_or_else(|| BoardError::not_found(E::KIND, id))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    async fn fetch_group<E: Entity>(&self, parent: &E::Parent) -> Result<Vec<E>> {
        let entities = self.entities.read().await;
        let mut group = Vec::new();
        for ((kind, _), value) in entities.iter() {
            if *kind != E::KIND {
                continue;
            }
            let item: E = serde_json::from_value(value.clone())?;
            if item.parent() == parent {
                group.push(item);
            }
        }
        display_order(&mut group);
        Ok(group)
    }

    async fn persist<E: Entity>(&self, item: &E) -> Result<()> {
        let value = serde_json::to_value(item)?;
        self.entities
            .write()
            .await
            .insert(Self::key::<E>(item.id()), value);
        Ok(())
    }

    async fn persist_all<E: Entity>(&self, items: &[E]) -> Result<()> {
        // Serialize everything before taking the lock so a failure changes nothing
        let values = items
            .iter()
            .map(|item| -> Result<(EntityKey, Value)> {
                Ok((Self::key::<E>(item.id()), serde_json::to_value(item)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut entities = self.entities.write().await;
        entities.extend(values);
        debug!(kind = E::KIND, count = items.len(), "persisted group");
        Ok(())
    }

    async fn remove<E: Entity>(&self, id: &E::Id) -> Result<()> {
        self.entities
            .write()
            .await
            .remove(&Self::key::<E>(id))
            .map(|_| ())
            .ok_or_else(|| BoardError::not_found(E::KIND, id))
    }
}

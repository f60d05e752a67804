//! MoveList command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::{Reorderer, Slot};
use crate::store::SiblingStore;
use crate::types::{Entity, List, ListId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Move a list to a new index within its board
#[derive(Debug, Deserialize)]
pub struct MoveList {
    /// The list to move
    pub id: ListId,
    /// Display index after the move
    pub index: usize,
}

impl MoveList {
    /// Create a new MoveList command
    pub fn new(id: impl Into<ListId>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for MoveList {
    type Output = List;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<List> {
        let mut list: List = ctx.store().read(&self.id).await?;

        let position = ctx
            .place::<List>(&list.board_id, Some(&list.id), Slot::At(self.index))
            .await?;

        list.set_position(position);
        list.touch();
        ctx.store().persist(&list).await?;

        debug!(id = %list.id, index = self.index, %position, "moved list");
        Ok(list)
    }
}

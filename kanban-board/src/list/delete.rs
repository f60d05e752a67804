//! DeleteList command

use crate::error::{BoardError, Result};
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{Card, List, ListId};
use async_trait::async_trait;
use serde::Deserialize;

/// Delete an empty list. Remaining lists keep their positions.
#[derive(Debug, Deserialize)]
pub struct DeleteList {
    /// The list to delete
    pub id: ListId,
}

impl DeleteList {
    /// Create a new DeleteList command
    pub fn new(id: impl Into<ListId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for DeleteList {
    type Output = List;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<List> {
        let list: List = ctx.store().read(&self.id).await?;

        let cards: Vec<Card> = ctx.store().fetch_group(&self.id).await?;
        if !cards.is_empty() {
            return Err(BoardError::ListNotEmpty {
                id: self.id.to_string(),
                count: cards.len(),
            });
        }

        ctx.store().remove::<List>(&self.id).await?;
        Ok(list)
    }
}

//! DeleteCard command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{Card, CardId};
use async_trait::async_trait;
use serde::Deserialize;

/// Delete a card. Its siblings keep their positions.
#[derive(Debug, Deserialize)]
pub struct DeleteCard {
    /// The card to delete
    pub id: CardId,
}

impl DeleteCard {
    /// Create a new DeleteCard command
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for DeleteCard {
    type Output = Card;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<Card> {
        let card: Card = ctx.store().read(&self.id).await?;
        ctx.store().remove::<Card>(&self.id).await?;
        Ok(card)
    }
}

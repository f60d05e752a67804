//! AddCard command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{Card, List, ListId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Add a new card at the bottom of a list
#[derive(Debug, Deserialize)]
pub struct AddCard {
    /// The list to add to
    pub list: ListId,
    /// The card title (required)
    pub title: String,
    /// Detailed card description
    pub description: Option<String>,
}

impl AddCard {
    /// Create a new AddCard command with just a title
    pub fn new(list: impl Into<ListId>, title: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            title: title.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for AddCard {
    type Output = Card;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<Card> {
        let list: List = ctx.store().read(&self.list).await?;

        let position = ctx.append::<Card>(&list.id).await?;
        let mut card = Card::new(&list, self.title.clone(), position);
        card.description = self.description.clone();

        ctx.store().persist(&card).await?;
        debug!(id = %card.id, list = %list.id, %position, "added card");
        Ok(card)
    }
}

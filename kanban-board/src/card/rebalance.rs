//! RebalanceList command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{Card, List, ListId};
use async_trait::async_trait;
use serde::Deserialize;

/// Renumber every card in a list, keeping display order.
///
/// With `only_if_needed`, healthy lists are left alone.
#[derive(Debug, Deserialize)]
pub struct RebalanceList {
    /// The list whose cards are renumbered
    pub list: ListId,
    /// Leave the list alone unless a gap is exhausted
    #[serde(default)]
    pub only_if_needed: bool,
}

impl RebalanceList {
    /// Create a new RebalanceList command
    pub fn new(list: impl Into<ListId>) -> Self {
        Self {
            list: list.into(),
            only_if_needed: false,
        }
    }

    /// Skip the rewrite when every gap is still usable
    pub fn only_if_needed(mut self) -> Self {
        self.only_if_needed = true;
        self
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for RebalanceList {
    type Output = Vec<Card>;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<Vec<Card>> {
        let list: List = ctx.store().read(&self.list).await?;

        if self.only_if_needed {
            ctx.rebalance_if_needed::<Card>(&list.id).await?;
            return ctx.store().fetch_group(&list.id).await;
        }
        ctx.rebalance_group::<Card>(&list.id).await
    }
}

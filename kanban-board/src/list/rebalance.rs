//! RebalanceBoard command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{BoardId, List};
use async_trait::async_trait;
use serde::Deserialize;

/// Renumber every list on a board, keeping display order
#[derive(Debug, Deserialize)]
pub struct RebalanceBoard {
    /// The board whose lists are renumbered
    pub board: BoardId,
}

impl RebalanceBoard {
    /// Create a new RebalanceBoard command
    pub fn new(board: impl Into<BoardId>) -> Self {
        Self {
            board: board.into(),
        }
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for RebalanceBoard {
    type Output = Vec<List>;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<Vec<List>> {
        ctx.store().read_board(&self.board).await?;
        ctx.rebalance_group::<List>(&self.board).await
    }
}

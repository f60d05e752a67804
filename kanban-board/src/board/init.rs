//! InitBoard command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::Board;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Create a new, empty board
#[derive(Debug, Deserialize)]
pub struct InitBoard {
    /// The board title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
}

impl InitBoard {
    /// Create a new InitBoard command
    pub fn new(title: impl Into<String>) -> Self {
        Self {
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
impl<S: SiblingStore> Execute<Reorderer<S>> for InitBoard {
    type Output = Board;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<Board> {
        let mut board = Board::new(self.title.clone());
        board.description = self.description.clone();

        ctx.store().write_board(&board).await?;
        info!(id = %board.id, title = %board.title, "created board");
        Ok(board)
    }
}

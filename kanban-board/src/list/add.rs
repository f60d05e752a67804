//! AddList command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{BoardId, List};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Add a new list at the end of a board
#[derive(Debug, Deserialize)]
pub struct AddList {
    /// The board to add to
    pub board: BoardId,
    /// The list title
    pub title: String,
}

impl AddList {
    /// Create a new AddList command
    pub fn new(board: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for AddList {
    type Output = List;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<List> {
        // Validate board exists
        ctx.store().read_board(&self.board).await?;

        let position = ctx.append::<List>(&self.board).await?;
        let list = List::new(self.board.clone(), self.title.clone(), position);

        ctx.store().persist(&list).await?;
        debug!(id = %list.id, %position, "added list");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::error::BoardError;
    use crate::store::MemoryStore;
    use kanban_position::Position;

    #[tokio::test]
    async fn test_add_lists_append() {
        let ctx = Reorderer::new(MemoryStore::new());
        let board = InitBoard::new("Test").execute(&ctx).await.unwrap();

        let first = AddList::new(board.id.clone(), "Todo").execute(&ctx).await.unwrap();
        let second = AddList::new(board.id.clone(), "Done").execute(&ctx).await.unwrap();

        assert_eq!(first.position, Position::new(65535.0));
        assert_eq!(second.position, Position::new(131070.0));
        assert_eq!(first.board_id, board.id);
    }

    #[tokio::test]
    async fn test_add_list_unknown_board() {
        let ctx = Reorderer::new(MemoryStore::new());
        let result = AddList::new("nope", "Todo").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::NotFound { .. })));
    }
}

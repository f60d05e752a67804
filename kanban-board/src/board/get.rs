//! GetBoard command

use crate::error::Result;
use crate::operation::Execute;
use crate::reorder::Reorderer;
use crate::store::SiblingStore;
use crate::types::{Board, BoardId, Card, List};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Get a board with its lists and cards, each in display order
#[derive(Debug, Deserialize)]
pub struct GetBoard {
    /// The board ID
    pub id: BoardId,
}

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

/// A board as a caller renders it
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    #[serde(flatten)]
    pub board: Board,
    pub lists: Vec<ListView>,
}

/// A list with its cards
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    #[serde(flatten)]
    pub list: List,
    pub cards: Vec<Card>,
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for GetBoard {
    type Output = BoardView;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<BoardView> {
        let store = ctx.store();
        let board = store.read_board(&self.id).await?;

        let lists: Vec<List> = store.fetch_group(&self.id).await?;
        let mut views = Vec::with_capacity(lists.len());
        for list in lists {
            let cards: Vec<Card> = store.fetch_group(&list.id).await?;
            views.push(ListView { list, cards });
        }

        Ok(BoardView {
            board,
            lists: views,
        })
    }
}

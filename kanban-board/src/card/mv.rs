//! MoveCard command

use crate::error::{BoardError, Result};
use crate::operation::Execute;
use crate::reorder::{Reorderer, Slot};
use crate::store::SiblingStore;
use crate::types::{Card, CardId, Entity, List, ListId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Move a card within its list or to another list on the same board
#[derive(Debug, Deserialize)]
pub struct MoveCard {
    /// The card to move
    pub id: CardId,
    /// Target list; the card's current list when absent
    pub list: Option<ListId>,
    /// Display index in the target list after the move
    pub index: usize,
}

impl MoveCard {
    /// Reorder a card within its current list
    pub fn new(id: impl Into<CardId>, index: usize) -> Self {
        Self {
            id: id.into(),
            list: None,
            index,
        }
    }

    /// Transfer a card to another list at the given index
    pub fn to_list(id: impl Into<CardId>, list: impl Into<ListId>, index: usize) -> Self {
        Self {
            id: id.into(),
            list: Some(list.into()),
            index,
        }
    }
}

#[async_trait]
impl<S: SiblingStore> Execute<Reorderer<S>> for MoveCard {
    type Output = Card;

    async fn execute(&self, ctx: &Reorderer<S>) -> Result<Card> {
        let mut card: Card = ctx.store().read(&self.id).await?;
        let target = self.list.clone().unwrap_or_else(|| card.list_id.clone());

        if target != card.list_id {
            let list: List = ctx.store().read(&target).await?;
            if list.board_id != card.board_id {
                return Err(BoardError::invalid_value(
                    "list",
                    format!(
                        "list '{}' belongs to board '{}', card is on board '{}'",
                        list.id, list.board_id, card.board_id
                    ),
                ));
            }
        }

        let position = ctx
            .place::<Card>(&target, Some(&card.id), Slot::At(self.index))
            .await?;

        card.set_list(target);
        card.set_position(position);
        card.touch();
        ctx.store().persist(&card).await?;

        debug!(id = %card.id, list = %card.list_id, index = self.index, %position, "moved card");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::card::AddCard;
    use crate::list::AddList;
    use crate::store::MemoryStore;
    use kanban_position::{Position, PositionError};

    struct Fixture {
        ctx: Reorderer<MemoryStore>,
        todo: List,
        done: List,
        cards: Vec<Card>,
    }

    async fn setup() -> Fixture {
        let ctx = Reorderer::new(MemoryStore::new());
        let board = InitBoard::new("Test").execute(&ctx).await.unwrap();
        let todo = AddList::new(board.id.clone(), "Todo").execute(&ctx).await.unwrap();
        let done = AddList::new(board.id.clone(), "Done").execute(&ctx).await.unwrap();

        let mut cards = Vec::new();
        for title in ["a", "b", "c"] {
            cards.push(
                AddCard::new(todo.id.clone(), title)
                    .execute(&ctx)
                    .await
                    .unwrap(),
            );
        }

        Fixture {
            ctx,
            todo,
            done,
            cards,
        }
    }

    async fn titles(ctx: &Reorderer<MemoryStore>, list: &ListId) -> Vec<String> {
        let cards: Vec<Card> = ctx.store().fetch_group(list).await.unwrap();
        cards.into_iter().map(|c| c.title).collect()
    }

    #[tokio::test]
    async fn test_move_card_within_list() {
        let f = setup().await;

        let moved = MoveCard::new(f.cards[0].id.clone(), 2)
            .execute(&f.ctx)
            .await
            .unwrap();

        assert_eq!(moved.position, Position::new(4.0 * 65535.0));
        assert_eq!(titles(&f.ctx, &f.todo.id).await, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_move_card_to_other_list() {
        let f = setup().await;

        let moved = MoveCard::to_list(f.cards[1].id.clone(), f.done.id.clone(), 0)
            .execute(&f.ctx)
            .await
            .unwrap();

        // Only card in the target list
        assert_eq!(moved.position, Position::new(65535.0));
        assert_eq!(moved.list_id, f.done.id);
        assert_eq!(titles(&f.ctx, &f.todo.id).await, vec!["a", "c"]);
        assert_eq!(titles(&f.ctx, &f.done.id).await, vec!["b"]);
    }

    #[tokio::test]
    async fn test_transfer_between_existing_cards() {
        let f = setup().await;
        MoveCard::to_list(f.cards[0].id.clone(), f.done.id.clone(), 0)
            .execute(&f.ctx)
            .await
            .unwrap();
        MoveCard::to_list(f.cards[1].id.clone(), f.done.id.clone(), 1)
            .execute(&f.ctx)
            .await
            .unwrap();

        let moved = MoveCard::to_list(f.cards[2].id.clone(), f.done.id.clone(), 1)
            .execute(&f.ctx)
            .await
            .unwrap();

        assert_eq!(titles(&f.ctx, &f.done.id).await, vec!["a", "c", "b"]);
        assert_eq!(moved.position, Position::new(1.5 * 65535.0));
        assert!(titles(&f.ctx, &f.todo.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_move_card_out_of_range() {
        let f = setup().await;

        let result = MoveCard::to_list(f.cards[0].id.clone(), f.done.id.clone(), 1)
            .execute(&f.ctx)
            .await;

        assert!(matches!(
            result,
            Err(BoardError::Position(PositionError::InvalidIndex { index: 1, len: 0 }))
        ));
        // Unchanged on failure
        assert_eq!(titles(&f.ctx, &f.todo.id).await, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_move_card_to_other_board_rejected() {
        let f = setup().await;
        let other = InitBoard::new("Other").execute(&f.ctx).await.unwrap();
        let foreign = AddList::new(other.id.clone(), "Elsewhere")
            .execute(&f.ctx)
            .await
            .unwrap();

        let result = MoveCard::to_list(f.cards[0].id.clone(), foreign.id.clone(), 0)
            .execute(&f.ctx)
            .await;
        assert!(matches!(result, Err(BoardError::InvalidValue { .. })));
    }

    #[tokio::test]
    async fn test_move_missing_card() {
        let f = setup().await;
        let result = MoveCard::new("ghost", 0).execute(&f.ctx).await;
        assert!(matches!(result, Err(BoardError::NotFound { .. })));
    }
}

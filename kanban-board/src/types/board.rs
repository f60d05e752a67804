//! Board-level types: Board, List, Card

use super::entity::Entity;
use super::ids::{BoardId, CardId, ListId};
use chrono::{DateTime, Utc};
use kanban_position::{Position, Positioned};
use serde::{Deserialize, Serialize};

/// The kanban board - just metadata. Lists and cards are stored individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Board {
    /// Create a new board with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
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

/// A list groups cards; lists are ordered within their board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub board_id: BoardId,
    pub title: String,
    pub position: Position,
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Create a new list at the given position
    pub fn new(board_id: BoardId, title: impl Into<String>, position: Position) -> Self {
        Self {
            id: ListId::new(),
            board_id,
            title: title.into(),
            position,
            updated_at: Utc::now(),
        }
    }
}

impl Positioned for List {
    type Id = ListId;

    fn id(&self) -> &ListId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl Entity for List {
    type Parent = BoardId;

    const KIND: &'static str = "list";
    const DIR: &'static str = "lists";

    fn parent(&self) -> &BoardId {
        &self.board_id
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A card; cards are ordered within their list and can move between lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub board_id: BoardId,
    pub list_id: ListId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: Position,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Create a new card in a list at the given position
    pub fn new(list: &List, title: impl Into<String>, position: Position) -> Self {
        Self {
            id: CardId::new(),
            board_id: list.board_id.clone(),
            list_id: list.id.clone(),
            title: title.into(),
            description: None,
            position,
            updated_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Transfer the card to another list. The caller assigns a fresh position.
    pub fn set_list(&mut self, list_id: ListId) {
        self.list_id = list_id;
    }
}

impl Positioned for Card {
    type Id = CardId;

    fn id(&self) -> &CardId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl Entity for Card {
    type Parent = ListId;

    const KIND: &'static str = "card";
    const DIR: &'static str = "cards";

    fn parent(&self) -> &ListId {
        &self.list_id
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

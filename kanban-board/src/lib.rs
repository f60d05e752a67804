//! Kanban boards, lists and cards with drag-and-drop ordering
//!
//! Lists on a board and cards in a list are each a sibling group ordered by a
//! numeric position from [`kanban_position`]. Moving an item writes only that
//! item; when a gap between neighbours is used up the group is renumbered in
//! one bulk write and the move is retried.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use kanban_board::{
//!     board::InitBoard, card::{AddCard, MoveCard}, list::AddList, BoardContext, Execute,
//!     Reorderer,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = BoardContext::new("/path/to/repo/.kanban");
//! store.ensure_directories().await?;
//! let ctx = Reorderer::with_allocator(store, kanban_board::load_allocator(None)?);
//!
//! let board = InitBoard::new("My Project").execute(&ctx).await?;
//! let todo = AddList::new(board.id.clone(), "Todo").execute(&ctx).await?;
//! let card = AddCard::new(todo.id.clone(), "Write docs").execute(&ctx).await?;
//!
//! // Drop the card at the top of the list
//! MoveCard::new(card.id.clone(), 0).execute(&ctx).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! repo/
//! └── .kanban/
//!     ├── .lock               # Held during group rewrites
//!     ├── position.toml       # Optional allocator settings
//!     ├── boards/{id}.json
//!     ├── lists/{id}.json
//!     └── cards/{id}.json
//! ```

mod config;
mod context;
mod error;
mod operation;
mod reorder;
mod store;
pub mod types;

// Command modules
pub mod board;
pub mod card;
pub mod list;

pub use config::{build_figment, load_allocator, load_allocator_config, CONFIG_FILE, ENV_PREFIX};
pub use context::{BoardContext, BoardLock};
pub use error::{BoardError, Result};
pub use operation::Execute;
pub use reorder::{Reorderer, Slot};
pub use store::{MemoryStore, SiblingStore};
pub use types::{Board, BoardId, Card, CardId, Entity, EntityId, List, ListId};

pub use kanban_position::{AllocatorConfig, Position, PositionAllocator, PositionError};

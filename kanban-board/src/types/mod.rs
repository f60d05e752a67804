//! Core types for boards, lists and cards

mod board;
mod entity;
mod ids;

// Re-export all types
pub use board::{Board, Card, List};
pub use entity::{display_order, Entity};
pub use ids::{BoardId, CardId, EntityId, ListId};

//! Board commands

mod get;
mod init;

pub use get::{BoardView, GetBoard, ListView};
pub use init::InitBoard;

//! List commands

mod add;
mod delete;
mod mv;
mod rebalance;

pub use add::AddList;
pub use delete::DeleteList;
pub use mv::MoveList;
pub use rebalance::RebalanceBoard;

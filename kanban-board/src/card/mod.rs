//! Card commands

mod add;
mod delete;
mod mv;
mod rebalance;

pub use add::AddCard;
pub use delete::DeleteCard;
pub use mv::MoveCard;
pub use rebalance::RebalanceList;

//! Command execution trait.
//!
//! Commands are structs whose fields are their parameters. Each one runs
//! against a context and returns a typed output.

use crate::error::Result;
use async_trait::async_trait;

/// Run a command against a context
#[async_trait]
pub trait Execute<C: Sync + ?Sized>: Send + Sync {
    type Output: Send;

    async fn execute(&self, ctx: &C) -> Result<Self::Output>;
}

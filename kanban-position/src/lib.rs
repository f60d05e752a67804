//! Position allocation for kanban sibling groups
//!
//! Cards within a list and lists within a board are ordered by a numeric
//! [`Position`]. Reordering one item computes a single new position from its
//! neighbours, so a drag-and-drop move costs one write regardless of how many
//! siblings there are.
//!
//! ## Placement rules
//!
//! With buffer gap `G` (default 65535):
//!
//! - **Empty group** - the first item gets `G`
//! - **Head** - half of the first item's position
//! - **Tail** - last position plus `G`
//! - **Between** - midpoint of the two neighbours
//!
//! ## Rebalancing
//!
//! Splitting the same gap over and over eventually runs out of floating-point
//! resolution. When that happens [`allocate`] returns
//! [`PositionError::RebalanceRequired`] instead of a position that would tie
//! with or cross a neighbour. The caller renumbers the group with
//! [`rebalance`] (`G, 2G, 3G, ...`), persists every assignment together, and
//! retries once.
//!
//! ```rust
//! use kanban_position::{allocate, rebalance, Position, PositionError};
//!
//! let list = vec![Position::new(65535.0)];
//! assert_eq!(allocate(&list, 0)?, Position::new(32767.5));
//! assert_eq!(allocate(&list, 1)?, Position::new(131070.0));
//!
//! let cramped = vec![Position::new(1.0), Position::new(1.0 + 1e-12)];
//! match allocate(&cramped, 1) {
//!     Err(e) if e.is_recoverable() => {
//!         let renumbered = rebalance(["a", "b"]);
//!         assert_eq!(renumbered[1].1, Position::new(131070.0));
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! # Ok::<(), PositionError>(())
//! ```
//!
//! The allocator is pure: no I/O, no shared state, safe to call from any
//! thread. Persistence and staleness detection belong to the caller.

mod allocator;
mod config;
mod error;
mod position;

pub use allocator::{allocate, rebalance, PositionAllocator};
pub use config::{AllocatorConfig, DEFAULT_GAP, DEFAULT_MIN_GAP};
pub use error::{PositionError, Result};
pub use position::{positions_of, sort_by_position, Position, Positioned};

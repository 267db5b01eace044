//! Reverse hex (misère hex) rules and connectivity for the search engine.
//!
//! Reverse hex is played on a `size x size` rhombus of hexagonal cells.
//! White's edges are the first and last columns, Black's the first and
//! last rows. The player whose stones connect their own two edges *loses*.
//!
//! This crate provides:
//! - [`Cell`], [`Color`], [`CellState`] and the edge sentinels ([`Edge`], [`Point`])
//! - [`UnionFind`]: disjoint sets with member lists, for O(~1) win detection
//! - [`GameState`]: the board with incremental per-color connectivity
//! - [`find_dead_cells`]: empty cells that provably cannot affect the result
//!
//! # Board Layout
//!
//! ```text
//!   A  B  C
//! 1  .  .  .  O
//!  2  .  .  .  O
//!   3  .  .  .  O
//!      @  @  @
//! ```
//!
//! # Usage
//!
//! ```rust
//! use reverse_hex::{Cell, Color, GameState};
//!
//! let mut state = GameState::new(3);
//! for x in 0..3 {
//!     state.place_white(Cell::new(x, 1)).unwrap();
//! }
//! // White joined its own edges, so Black wins
//! assert_eq!(state.winner(), Some(Color::Black));
//! ```

pub mod cell;
pub mod dead_cells;
pub mod state;
pub mod unionfind;

pub use cell::{Cell, CellState, Color, Edge, Point};
pub use dead_cells::{edge_unreachable, find_dead_cells, group_dead_cells};
pub use state::{GameError, GameState, NEIGHBOR_PATTERNS};
pub use unionfind::UnionFind;

#[cfg(test)]
mod tests;

//! Monte Carlo Tree Search (MCTS) engine for reverse hex.
//!
//! The engine keeps a persistent search tree rooted at the current position
//! and refines it with randomized playouts. Node values blend direct
//! statistics with RAVE (all-moves-as-first) statistics, which dominate
//! while a node has few visits and fade out as visits accumulate.
//!
//! # Overview
//!
//! Each iteration of the search has four phases:
//!
//! 1. **Selection**: descend from the root by node value, stopping at the
//!    first unvisited child
//! 2. **Expansion**: at an undecided leaf, add one child per legal move and
//!    pick one at random
//! 3. **Rollout**: play the position out with a [`RolloutPolicy`]
//! 4. **Backpropagation**: update visit counts and rewards along the path,
//!    crediting RAVE statistics to every sibling move the mover ended up
//!    owning
//!
//! Before searching, callers may ask [`MctsSearch::special_case`] for a move
//! that needs no search at all: an opening book answer or a dead cell.
//!
//! # Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use mcts::{BestMove, MctsConfig, MctsSearch};
//! use reverse_hex::GameState;
//!
//! let state = GameState::new(3);
//! let mut engine = MctsSearch::from_config(&state, MctsConfig::for_testing());
//!
//! engine.run_rollouts(200).unwrap();
//! let BestMove::Move(mv) = engine.best_move().unwrap() else {
//!     unreachable!("the empty board is undecided");
//! };
//! engine.make_move(mv).unwrap();
//!
//! engine.search(Duration::from_millis(10)).unwrap();
//! assert_eq!(engine.root_state().move_count(), 1);
//! ```
//!
//! # Rollout policies
//!
//! - [`RandomPolicy`]: uniformly random moves
//! - [`DecisiveMovePolicy`]: random moves that avoid joining one's own edges
//! - [`LastGoodReplyPolicy`]: replays replies that won earlier rollouts
//! - [`PoolRavePolicy`]: favors cells that kept appearing in wins
//!
//! [`AnyPolicy`] selects one of these at runtime from a [`PolicyKind`].

pub mod config;
pub mod node;
pub mod opening;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, PolicyKind};
pub use node::{MctsNode, NodeId};
pub use opening::{OpeningBook, SmallBoardTable, SMALL_BOARD_TABLES};
pub use rollout::{
    AnyPolicy, DecisiveMovePolicy, LastGoodReplyPolicy, PoolRavePolicy, RandomPolicy, Rollout,
    RolloutPolicy,
};
pub use search::{BestMove, MctsSearch, SearchError, SearchStats};
pub use tree::{MctsTree, TreeStats};

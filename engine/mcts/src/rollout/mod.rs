//! Rollout policies.
//!
//! A rollout plays a position out to a finished game and reports who won
//! together with every cell each color owns on the final board; the latter
//! drives RAVE credit during backpropagation. Policies may carry state that
//! persists across rollouts (reply tables, cell scores), which is why
//! `rollout` takes `&mut self`.

mod decisive;
mod lgr;
mod poolrave;
mod random;

pub use decisive::DecisiveMovePolicy;
pub use lgr::LastGoodReplyPolicy;
pub use poolrave::PoolRavePolicy;
pub use random::RandomPolicy;

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use reverse_hex::{Cell, CellState, Color, GameState};

use crate::config::PolicyKind;
use crate::search::SearchError;

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollout {
    pub winner: Color,
    /// Cells holding a black stone at the end of the game.
    pub black: Vec<Cell>,
    /// Cells holding a white stone at the end of the game.
    pub white: Vec<Cell>,
}

impl Rollout {
    /// Read the outcome off a finished game.
    pub fn from_finished(state: &GameState) -> Result<Self, SearchError> {
        let winner = state.winner().ok_or_else(|| {
            SearchError::InvalidState("rollout ended without a winner".into())
        })?;

        let mut black = Vec::new();
        let mut white = Vec::new();
        for x in 0..state.size() {
            for y in 0..state.size() {
                let cell = Cell::new(x, y);
                match state.color_at(cell) {
                    CellState::Black => black.push(cell),
                    CellState::White => white.push(cell),
                    CellState::Empty => {}
                }
            }
        }

        Ok(Self {
            winner,
            black,
            white,
        })
    }
}

/// Strategy for playing a position out to the end.
pub trait RolloutPolicy: Send {
    /// Play `state` to completion, mutating it in place.
    fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Rollout, SearchError>;

    /// Forget anything learned from earlier rollouts.
    fn reset(&mut self) {}

    fn name(&self) -> &'static str;
}

/// Any of the built-in policies, selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyPolicy {
    Random(RandomPolicy),
    DecisiveMove(DecisiveMovePolicy),
    LastGoodReply(LastGoodReplyPolicy),
    PoolRave(PoolRavePolicy),
}

impl AnyPolicy {
    pub fn from_kind(kind: PolicyKind, pool_size: usize) -> Self {
        match kind {
            PolicyKind::Random => AnyPolicy::Random(RandomPolicy),
            PolicyKind::DecisiveMove => AnyPolicy::DecisiveMove(DecisiveMovePolicy),
            PolicyKind::LastGoodReply => AnyPolicy::LastGoodReply(LastGoodReplyPolicy::new()),
            PolicyKind::PoolRave => AnyPolicy::PoolRave(PoolRavePolicy::new(pool_size)),
        }
    }
}

impl Default for AnyPolicy {
    fn default() -> Self {
        AnyPolicy::Random(RandomPolicy)
    }
}

impl RolloutPolicy for AnyPolicy {
    fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Rollout, SearchError> {
        match self {
            AnyPolicy::Random(p) => p.rollout(state, rng),
            AnyPolicy::DecisiveMove(p) => p.rollout(state, rng),
            AnyPolicy::LastGoodReply(p) => p.rollout(state, rng),
            AnyPolicy::PoolRave(p) => p.rollout(state, rng),
        }
    }

    fn reset(&mut self) {
        match self {
            AnyPolicy::Random(p) => p.reset(),
            AnyPolicy::DecisiveMove(p) => p.reset(),
            AnyPolicy::LastGoodReply(p) => p.reset(),
            AnyPolicy::PoolRave(p) => p.reset(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnyPolicy::Random(p) => p.name(),
            AnyPolicy::DecisiveMove(p) => p.name(),
            AnyPolicy::LastGoodReply(p) => p.name(),
            AnyPolicy::PoolRave(p) => p.name(),
        }
    }
}

/// Remove and return a uniformly random element.
pub(crate) fn take_random(moves: &mut Vec<Cell>, rng: &mut ChaCha20Rng) -> Option<Cell> {
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves.swap_remove(idx))
}

/// Remove `cell` if present, reporting whether it was there.
pub(crate) fn take(moves: &mut Vec<Cell>, cell: Cell) -> bool {
    match moves.iter().position(|&m| m == cell) {
        Some(idx) => {
            moves.swap_remove(idx);
            true
        }
        None => false,
    }
}

/// Error for a board that filled up without a winner.
pub(crate) fn exhausted() -> SearchError {
    SearchError::InvalidState("no legal moves left before the game ended".into())
}

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use reverse_hex::{Cell, Color, GameState};

use super::{exhausted, take, take_random, Rollout, RolloutPolicy};
use crate::search::SearchError;

/// Pool-RAVE rollouts.
///
/// Every color scores each cell by how often owning it coincided with a
/// win. At the start of a rollout the best-scoring legal cells form a
/// pool; each ply the side to move plays a random pool cell half the time
/// (when that cell is still free) and a uniformly random move otherwise.
#[derive(Debug, Clone)]
pub struct PoolRavePolicy {
    pool_size: usize,
    black_scores: BTreeMap<Cell, i32>,
    white_scores: BTreeMap<Cell, i32>,
}

impl Default for PoolRavePolicy {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PoolRavePolicy {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            black_scores: BTreeMap::new(),
            white_scores: BTreeMap::new(),
        }
    }

    pub fn scores(&self, color: Color) -> &BTreeMap<Cell, i32> {
        match color {
            Color::White => &self.white_scores,
            Color::Black => &self.black_scores,
        }
    }

    /// The `pool_size` highest-scoring cells among `legal`, best first.
    /// Equal scores keep cell order.
    pub fn pool(&self, color: Color, legal: &HashSet<Cell>) -> Vec<Cell> {
        let mut ranked: Vec<(Cell, i32)> = self
            .scores(color)
            .iter()
            .filter(|(cell, _)| legal.contains(cell))
            .map(|(&cell, &score)| (cell, score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(self.pool_size)
            .map(|(cell, _)| cell)
            .collect()
    }

    fn score(&mut self, rollout: &Rollout) {
        let black_delta = if rollout.winner == Color::Black { 1 } else { -1 };
        for &cell in &rollout.black {
            *self.black_scores.entry(cell).or_insert(0) += black_delta;
        }
        for &cell in &rollout.white {
            *self.white_scores.entry(cell).or_insert(0) -= black_delta;
        }
    }
}

impl RolloutPolicy for PoolRavePolicy {
    fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Rollout, SearchError> {
        let mut moves = state.moves();
        let black_pool = self.pool(Color::Black, state.empty_cells());
        let white_pool = self.pool(Color::White, state.empty_cells());

        while state.winner().is_none() {
            let pool = match state.turn() {
                Color::Black => &black_pool,
                Color::White => &white_pool,
            };
            let candidate = if pool.is_empty() {
                None
            } else {
                Some(pool[rng.gen_range(0..pool.len())])
            };

            let mv = match candidate {
                Some(cell) if rng.gen_bool(0.5) && take(&mut moves, cell) => cell,
                _ => take_random(&mut moves, rng).ok_or_else(exhausted)?,
            };
            state.play(mv)?;
        }

        let rollout = Rollout::from_finished(state)?;
        self.score(&rollout);
        Ok(rollout)
    }

    fn reset(&mut self) {
        self.black_scores.clear();
        self.white_scores.clear();
    }

    fn name(&self) -> &'static str {
        "poolrave"
    }
}

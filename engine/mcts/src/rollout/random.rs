use rand_chacha::ChaCha20Rng;
use reverse_hex::GameState;

use super::{exhausted, take_random, Rollout, RolloutPolicy};
use crate::search::SearchError;

/// Uniformly random legal moves until the game ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RolloutPolicy for RandomPolicy {
    fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Rollout, SearchError> {
        let mut moves = state.moves();
        while state.winner().is_none() {
            let mv = take_random(&mut moves, rng).ok_or_else(exhausted)?;
            state.play(mv)?;
        }
        Rollout::from_finished(state)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

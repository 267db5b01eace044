use rand_chacha::ChaCha20Rng;
use reverse_hex::GameState;

use super::{exhausted, take, take_random, Rollout, RolloutPolicy};
use crate::search::SearchError;

/// Random play that steers around suicidal moves.
///
/// Each side keeps a pool of candidate moves. On its turn a side draws
/// candidates at random from its own pool, discarding any that would join
/// its two edges, and plays the first safe one. When the pool runs dry the
/// side falls back to a uniformly random legal move, losing or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisiveMovePolicy;

impl RolloutPolicy for DecisiveMovePolicy {
    fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Rollout, SearchError> {
        let mut moves = state.moves();
        let mut good = moves.clone();
        let mut good_opponent = moves.clone();

        while state.winner().is_none() {
            let mover = state.turn();
            let mut chosen = None;
            while let Some(candidate) = take_random(&mut good, rng) {
                if !state.would_lose(candidate, mover) {
                    chosen = Some(candidate);
                    break;
                }
            }

            let mv = match chosen {
                Some(mv) => {
                    take(&mut moves, mv);
                    mv
                }
                None => take_random(&mut moves, rng).ok_or_else(exhausted)?,
            };
            state.play(mv)?;
            take(&mut good_opponent, mv);

            std::mem::swap(&mut good, &mut good_opponent);
        }

        Rollout::from_finished(state)
    }

    fn name(&self) -> &'static str {
        "decisive_move"
    }
}

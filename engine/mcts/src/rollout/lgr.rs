use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use reverse_hex::{Cell, Color, GameState};

use super::{exhausted, take, take_random, Rollout, RolloutPolicy};
use crate::search::SearchError;

/// Last-good-reply rollouts.
///
/// Each color keeps a table mapping an opponent move to the reply it made
/// in the most recent rollout it won. During a rollout a remembered reply
/// to the previous move is played half the time when still legal.
#[derive(Debug, Clone, Default)]
pub struct LastGoodReplyPolicy {
    black_reply: HashMap<Cell, Cell>,
    white_reply: HashMap<Cell, Cell>,
}

impl LastGoodReplyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies remembered for `color`, keyed by the opponent's move.
    pub fn replies(&self, color: Color) -> &HashMap<Cell, Cell> {
        match color {
            Color::White => &self.white_reply,
            Color::Black => &self.black_reply,
        }
    }

    /// Next move for `mover`, answering `last_move` with the remembered
    /// reply half the time when that reply is still in `moves`.
    fn next_move(
        &self,
        mover: Color,
        last_move: Option<Cell>,
        moves: &mut Vec<Cell>,
        rng: &mut ChaCha20Rng,
    ) -> Result<Cell, SearchError> {
        let remembered = last_move.and_then(|m| self.replies(mover).get(&m).copied());
        match remembered {
            Some(reply) if rng.gen_bool(0.5) && take(moves, reply) => Ok(reply),
            _ => take_random(moves, rng).ok_or_else(exhausted),
        }
    }

    /// Learn the winner's replies from a finished rollout.
    ///
    /// `first` moved first in the rollout and `last_turn` is the side to
    /// move once it ended. The winner's i-th reply follows the loser's i-th
    /// move, shifted by one when the winner opened; when the loser moved
    /// last, its final move went unanswered.
    fn record_replies(
        &mut self,
        winner: Color,
        first: Color,
        last_turn: Color,
        black_moves: &[Cell],
        white_moves: &[Cell],
    ) {
        let offset = usize::from(first == winner);
        let skip = usize::from(last_turn == winner);
        let (table, winner_moves, loser_moves) = match winner {
            Color::Black => (&mut self.black_reply, black_moves, white_moves),
            Color::White => (&mut self.white_reply, white_moves, black_moves),
        };

        for i in 0..loser_moves.len().saturating_sub(skip) {
            if let Some(&reply) = winner_moves.get(i + offset) {
                table.insert(loser_moves[i], reply);
            }
        }
    }
}

impl RolloutPolicy for LastGoodReplyPolicy {
    fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Rollout, SearchError> {
        let mut moves = state.moves();
        let first = state.turn();
        let mut black_moves = Vec::new();
        let mut white_moves = Vec::new();
        let mut last_move: Option<Cell> = None;

        while state.winner().is_none() {
            let mover = state.turn();
            let mv = self.next_move(mover, last_move, &mut moves, rng)?;

            match mover {
                Color::Black => black_moves.push(mv),
                Color::White => white_moves.push(mv),
            }
            state.play(mv)?;
            last_move = Some(mv);
        }

        let rollout = Rollout::from_finished(state)?;
        self.record_replies(
            rollout.winner,
            first,
            state.turn(),
            &black_moves,
            &white_moves,
        );
        Ok(rollout)
    }

    fn reset(&mut self) {
        self.black_reply.clear();
        self.white_reply.clear();
    }

    fn name(&self) -> &'static str {
        "lgr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn c(x: usize, y: usize) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn test_record_replies_winner_moved_first() {
        // Black b0, White w0, Black b1, White w1: White joined its edges.
        let mut policy = LastGoodReplyPolicy::new();
        let black = [c(0, 0), c(1, 1)];
        let white = [c(2, 0), c(2, 1)];
        policy.record_replies(Color::Black, Color::Black, Color::Black, &black, &white);

        let replies = policy.replies(Color::Black);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies.get(&c(2, 0)), Some(&c(1, 1)));
        assert!(policy.replies(Color::White).is_empty());
    }

    #[test]
    fn test_record_replies_loser_moved_first() {
        // White w0, Black b0, White w1: White joined its edges.
        let mut policy = LastGoodReplyPolicy::new();
        let black = [c(0, 0)];
        let white = [c(2, 0), c(2, 1)];
        policy.record_replies(Color::Black, Color::White, Color::Black, &black, &white);

        let replies = policy.replies(Color::Black);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies.get(&c(2, 0)), Some(&c(0, 0)));
    }

    #[test]
    fn test_record_replies_for_white() {
        // White w0, Black b0, White w1, Black b1: Black joined its edges.
        let mut policy = LastGoodReplyPolicy::new();
        let black = [c(1, 0), c(1, 1)];
        let white = [c(0, 0), c(0, 1)];
        policy.record_replies(Color::White, Color::White, Color::White, &black, &white);

        let replies = policy.replies(Color::White);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies.get(&c(1, 0)), Some(&c(0, 1)));
    }

    #[test]
    fn test_remembered_reply_played_half_the_time() {
        let mut policy = LastGoodReplyPolicy::new();
        policy.white_reply.insert(c(0, 0), c(2, 2));
        let state = GameState::new(5);
        let mut rng = ChaCha20Rng::seed_from_u64(17);

        let trials = 1000;
        let mut replied = 0;
        for _ in 0..trials {
            let mut moves = state.moves();
            let mv = policy
                .next_move(Color::White, Some(c(0, 0)), &mut moves, &mut rng)
                .unwrap();
            assert!(!moves.contains(&mv));
            if mv == c(2, 2) {
                replied += 1;
            }
        }
        // Half from the table plus 1/25 of the random half.
        assert!((420..=620).contains(&replied), "replied {replied} times");

        // An unknown last move leaves the choice uniform.
        let mut hits = 0;
        for _ in 0..trials {
            let mut moves = state.moves();
            let mv = policy
                .next_move(Color::White, Some(c(1, 1)), &mut moves, &mut rng)
                .unwrap();
            if mv == c(2, 2) {
                hits += 1;
            }
        }
        assert!(hits < 120, "hit {hits} times");
    }

    #[test]
    fn test_rollouts_follow_preloaded_replies() {
        // Every black move except the centre is answered by the centre.
        let mut preloaded = LastGoodReplyPolicy::new();
        for x in 0..5 {
            for y in 0..5 {
                let reply = if (x, y) == (2, 2) { c(0, 0) } else { c(2, 2) };
                preloaded.white_reply.insert(c(x, y), reply);
            }
        }

        let mut rng = ChaCha20Rng::seed_from_u64(23);
        let trials = 200;
        let mut white_centre = 0;
        for _ in 0..trials {
            let mut policy = preloaded.clone();
            let mut state = GameState::new(5);
            state.set_turn(Color::Black);
            let rollout = policy.rollout(&mut state, &mut rng).unwrap();
            if rollout.white.contains(&c(2, 2)) {
                white_centre += 1;
            }
        }
        // Uniform play gives White the centre in at most half the games.
        assert!(white_centre > 150, "white took the centre {white_centre} times");
    }

    #[test]
    fn test_tables_fill_and_reset() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut policy = LastGoodReplyPolicy::new();
        for _ in 0..30 {
            let mut state = GameState::new(4);
            policy.rollout(&mut state, &mut rng).unwrap();
        }
        let learned = policy.replies(Color::Black).len() + policy.replies(Color::White).len();
        assert!(learned > 0);

        policy.reset();
        assert!(policy.replies(Color::Black).is_empty());
        assert!(policy.replies(Color::White).is_empty());
    }
}

//! MCTS search implementation.
//!
//! Implements UCT with RAVE over a persistent tree:
//! 1. Selection: descend by node value until an unvisited child or a leaf
//! 2. Expansion: add one child per legal move and pick one at random
//! 3. Rollout: play the position out with the configured policy
//! 4. Backpropagation: update direct and RAVE statistics to the root
//!
//! The tree survives between moves: committing a move that the tree already
//! explored keeps that subtree and its statistics.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use engine_config::CentralConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use reverse_hex::{find_dead_cells, Cell, GameError, GameState};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::opening::OpeningBook;
use crate::rollout::{AnyPolicy, RolloutPolicy};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Root has not been expanded; run a search first")]
    NotExpanded,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Move chosen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestMove {
    Move(Cell),
    /// The root position is already decided.
    GameOver,
}

impl BestMove {
    pub fn cell(self) -> Option<Cell> {
        match self {
            BestMove::Move(cell) => Some(cell),
            BestMove::GameOver => None,
        }
    }

    /// `(column, row)`, with `(-1, -1)` standing for a finished game.
    pub fn as_coords(self) -> (i64, i64) {
        match self {
            BestMove::Move(cell) => (cell.x as i64, cell.y as i64),
            BestMove::GameOver => (-1, -1),
        }
    }
}

/// Summary of one call to [`MctsSearch::search`] or
/// [`MctsSearch::run_rollouts`].
#[derive(Debug, Clone, Copy)]
pub struct SearchStats {
    /// Completed select/rollout/backpropagate cycles
    pub rollouts: u64,
    pub elapsed: Duration,
    /// Nodes in the tree afterwards
    pub tree_size: usize,
}

/// MCTS engine owning the root position and the search tree.
pub struct MctsSearch<P: RolloutPolicy = AnyPolicy> {
    root_state: GameState,
    tree: MctsTree,
    policy: P,
    config: MctsConfig,
    rng: ChaCha20Rng,
    opening: OpeningBook,
    /// Dead cells found for the current position and not yet played.
    dead: BTreeSet<Cell>,
}

impl MctsSearch<AnyPolicy> {
    /// Engine using the rollout policy named in `config`.
    pub fn from_config(state: &GameState, config: MctsConfig) -> Self {
        let policy = AnyPolicy::from_kind(config.policy, config.pool_size);
        Self::new(state, policy, config)
    }

    /// Engine for an empty board of the configured size.
    pub fn from_central(config: &CentralConfig) -> Result<Self, SearchError> {
        if config.board.size == 0 {
            return Err(SearchError::InvalidConfig(
                "board size must be at least 1".into(),
            ));
        }
        let mcts = MctsConfig::try_from(&config.search)?;
        Ok(Self::from_config(&GameState::new(config.board.size), mcts))
    }

    /// Engine configured from `config.toml` and `REVHEX_*` overrides.
    pub fn load() -> Result<Self, SearchError> {
        Self::from_central(&engine_config::load_config())
    }
}

impl<P: RolloutPolicy> MctsSearch<P> {
    /// Create an engine searching from a copy of `state`.
    pub fn new(state: &GameState, policy: P, config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        Self {
            root_state: state.clone(),
            tree: MctsTree::new(),
            policy,
            config,
            rng,
            opening: OpeningBook::default(),
            dead: BTreeSet::new(),
        }
    }

    /// Replace the root position and start over with an empty tree.
    pub fn set_gamestate(&mut self, state: &GameState) {
        self.root_state = state.clone();
        self.tree = MctsTree::new();
        self.policy.reset();
        self.opening.reset();
        self.dead.clear();
    }

    /// Commit `mv` for the side to move.
    ///
    /// If the tree has already explored `mv` its subtree becomes the new
    /// tree; otherwise the tree is discarded.
    pub fn make_move(&mut self, mv: Cell) -> Result<(), SearchError> {
        self.root_state.play(mv)?;
        self.dead.remove(&mv);

        match self.tree.get(self.tree.root()).child(mv) {
            Some(child) => self.tree.reroot(child),
            None => {
                debug!(%mv, "Move not found in tree, starting a fresh one");
                self.tree = MctsTree::new();
            }
        }
        Ok(())
    }

    /// Search until `budget` of wall-clock time has elapsed.
    ///
    /// The deadline is checked before each rollout, so the call can overrun
    /// by up to one rollout.
    pub fn search(&mut self, budget: Duration) -> Result<SearchStats, SearchError> {
        let start = Instant::now();
        let mut rollouts = 0u64;

        while start.elapsed() < budget {
            self.iterate()?;
            rollouts += 1;
        }

        Ok(self.finish(rollouts, start))
    }

    /// Search for the configured time budget.
    pub fn search_default(&mut self) -> Result<SearchStats, SearchError> {
        self.search(self.config.time_budget)
    }

    /// Run exactly `n` rollouts, ignoring the clock.
    pub fn run_rollouts(&mut self, n: u64) -> Result<SearchStats, SearchError> {
        let start = Instant::now();
        for _ in 0..n {
            self.iterate()?;
        }
        Ok(self.finish(n, start))
    }

    fn finish(&self, rollouts: u64, start: Instant) -> SearchStats {
        let stats = SearchStats {
            rollouts,
            elapsed: start.elapsed(),
            tree_size: self.tree.len(),
        };
        debug!(
            rollouts = stats.rollouts,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            tree_size = stats.tree_size,
            policy = self.policy.name(),
            "Search finished"
        );
        stats
    }

    /// One select -> rollout -> backpropagate cycle.
    fn iterate(&mut self) -> Result<(), SearchError> {
        let (leaf, mut state, depth) = self.select_node()?;
        let turn = state.turn();
        let rollout = self.policy.rollout(&mut state, &mut self.rng)?;
        self.tree.backpropagate(leaf, turn, &rollout);

        trace!(
            leaf = leaf.0,
            depth,
            winner = %rollout.winner,
            "MCTS rollout complete"
        );
        Ok(())
    }

    /// Pick the node to simulate from, along with its position and depth.
    fn select_node(&mut self) -> Result<(NodeId, GameState, u32), SearchError> {
        let mut current = self.tree.root();
        let mut state = self.root_state.clone();
        let mut depth = 0u32;

        while let Some((mv, child)) = self.tree.select_child(
            current,
            self.config.exploration,
            self.config.rave_constant,
            &mut self.rng,
        ) {
            state.play(mv)?;
            current = child;
            depth += 1;
            if self.tree.get(child).visits == 0 {
                return Ok((current, state, depth));
            }
        }

        if state.winner().is_none() {
            self.tree.expand(current, &state.moves());
            let children = &self.tree.get(current).children;
            if !children.is_empty() {
                let (mv, child) = children[self.rng.gen_range(0..children.len())];
                state.play(mv)?;
                current = child;
                depth += 1;
            }
        }

        Ok((current, state, depth))
    }

    /// Most visited move at the root, ties broken at random.
    pub fn best_move(&mut self) -> Result<BestMove, SearchError> {
        if self.root_state.winner().is_some() {
            return Ok(BestMove::GameOver);
        }
        self.tree
            .best_child(&mut self.rng)
            .map(|(mv, _)| BestMove::Move(mv))
            .ok_or(SearchError::NotExpanded)
    }

    /// A move found without searching, if any.
    ///
    /// Consults the opening book first, then plays a pending dead cell.
    /// `last_move` is the opponent's previous move.
    pub fn special_case(&mut self, last_move: Option<Cell>) -> Option<Cell> {
        if self.root_state.winner().is_some() {
            return None;
        }

        if self.config.opening_book {
            if let Some(mv) = self
                .opening
                .suggest(&self.root_state, last_move, &mut self.rng)
            {
                return Some(mv);
            }
        }

        if self.config.dead_cell_analysis {
            self.dead.extend(find_dead_cells(&self.root_state));
            let root_state = &self.root_state;
            self.dead.retain(|&cell| root_state.is_empty(cell));
            return self.dead.pop_first();
        }

        None
    }

    pub fn root_state(&self) -> &GameState {
        &self.root_state
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Dead cells found so far and not yet played.
    pub fn dead_cells(&self) -> &BTreeSet<Cell> {
        &self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyKind;
    use engine_config::{BoardConfig, SearchConfig};
    use reverse_hex::Color;

    fn engine(state: &GameState) -> MctsSearch {
        MctsSearch::from_config(state, MctsConfig::for_testing())
    }

    #[test]
    fn test_root_visits_count_rollouts() {
        let mut search = engine(&GameState::new(4));

        let stats = search.run_rollouts(50).unwrap();
        assert_eq!(stats.rollouts, 50);
        assert_eq!(search.tree().get(search.tree().root()).visits, 50);
        assert_eq!(stats.tree_size, search.tree().len());

        search.run_rollouts(25).unwrap();
        assert_eq!(search.tree().get(search.tree().root()).visits, 75);
    }

    #[test]
    fn test_zero_budget_runs_nothing() {
        let mut search = engine(&GameState::new(4));
        let stats = search.search(Duration::ZERO).unwrap();
        assert_eq!(stats.rollouts, 0);
        assert_eq!(search.tree().len(), 1);
        assert!(matches!(search.best_move(), Err(SearchError::NotExpanded)));
    }

    #[test]
    fn test_timed_search_matches_root_visits() {
        let mut search = engine(&GameState::new(5));
        let stats = search.search(Duration::from_millis(20)).unwrap();
        assert!(stats.rollouts > 0);
        assert_eq!(
            search.tree().get(search.tree().root()).visits as u64,
            stats.rollouts
        );
    }

    #[test]
    fn test_search_default_uses_configured_budget() {
        let config = MctsConfig::for_testing().with_time_budget(Duration::from_millis(30));
        let mut search = MctsSearch::from_config(&GameState::new(4), config);

        let stats = search.search_default().unwrap();
        assert!(stats.elapsed >= Duration::from_millis(30));
        assert!(stats.rollouts > 0);

        let config = MctsConfig::for_testing().with_time_budget(Duration::ZERO);
        let mut search = MctsSearch::from_config(&GameState::new(4), config);
        assert_eq!(search.search_default().unwrap().rollouts, 0);
    }

    #[test]
    fn test_from_central_config() {
        let central = CentralConfig {
            board: BoardConfig { size: 5 },
            search: SearchConfig {
                policy: "lgr".into(),
                time_budget_secs: 0.25,
                seed: Some(1),
                ..SearchConfig::default()
            },
        };
        let search = MctsSearch::from_central(&central).unwrap();

        assert_eq!(search.root_state().size(), 5);
        assert_eq!(search.root_state().move_count(), 0);
        assert!(matches!(search.policy(), AnyPolicy::LastGoodReply(_)));
        assert_eq!(search.config().time_budget, Duration::from_millis(250));
        assert_eq!(search.config().seed, Some(1));
    }

    #[test]
    fn test_from_central_rejects_bad_values() {
        let mut central = CentralConfig::default();
        central.board.size = 0;
        assert!(matches!(
            MctsSearch::from_central(&central),
            Err(SearchError::InvalidConfig(_))
        ));

        let mut central = CentralConfig::default();
        central.search.policy = "alphabeta".into();
        assert!(matches!(
            MctsSearch::from_central(&central),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_uses_central_config() {
        let expected = engine_config::load_config();
        let search = MctsSearch::load().unwrap();
        assert_eq!(search.root_state().size(), expected.board.size);
        assert_eq!(search.config().pool_size, expected.search.pool_size);
    }

    #[test]
    fn test_game_over_sentinel() {
        let mut state = GameState::new(2);
        state.place_white(Cell::new(0, 0)).unwrap();
        state.place_white(Cell::new(1, 0)).unwrap();
        let mut search = engine(&state);

        assert_eq!(search.best_move().unwrap(), BestMove::GameOver);
        assert_eq!(BestMove::GameOver.as_coords(), (-1, -1));
        assert_eq!(search.special_case(None), None);
    }

    #[test]
    fn test_first_expansion_picks_a_child() {
        let mut search = engine(&GameState::new(3));
        search.run_rollouts(1).unwrap();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 9);
        let visited: u32 = root.children.iter().map(|(_, id)| tree.get(*id).visits).sum();
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_make_move_keeps_subtree() {
        let mut search = engine(&GameState::new(3));
        search.run_rollouts(200).unwrap();

        let BestMove::Move(mv) = search.best_move().unwrap() else {
            panic!("expected a move");
        };
        let child_id = search.tree().get(search.tree().root()).child(mv).unwrap();
        let before = search.tree().get(child_id).clone();

        search.make_move(mv).unwrap();

        let root = search.tree().get(search.tree().root());
        assert!(root.parent.is_none());
        assert_eq!(root.visits, before.visits);
        assert_eq!(root.reward, before.reward);
        assert_eq!(root.rave_visits, before.rave_visits);
        assert_eq!(root.children.len(), before.children.len());
        assert!(!search.root_state().is_empty(mv));
        assert_eq!(search.root_state().turn(), Color::Black);
    }

    #[test]
    fn test_make_move_unknown_resets_tree() {
        let mut search = engine(&GameState::new(3));
        search.make_move(Cell::new(1, 1)).unwrap();

        assert_eq!(search.tree().len(), 1);
        assert_eq!(search.root_state().move_count(), 1);
        assert!(matches!(
            search.make_move(Cell::new(1, 1)),
            Err(SearchError::Game(GameError::OccupiedCell(_)))
        ));
    }

    #[test]
    fn test_set_gamestate_resets() {
        let config = MctsConfig::for_testing().with_policy(PolicyKind::LastGoodReply);
        let mut search = MctsSearch::from_config(&GameState::new(4), config);
        search.run_rollouts(30).unwrap();

        let mut state = GameState::new(4);
        state.play(Cell::new(0, 0)).unwrap();
        search.set_gamestate(&state);

        assert_eq!(search.tree().len(), 1);
        assert_eq!(search.root_state().move_count(), 1);
        let AnyPolicy::LastGoodReply(lgr) = search.policy() else {
            panic!("expected lgr policy");
        };
        assert!(lgr.replies(Color::Black).is_empty());
        assert!(lgr.replies(Color::White).is_empty());
    }

    #[test]
    fn test_special_case_disabled_by_default_for_tests() {
        let mut search = engine(&GameState::new(2));
        assert_eq!(search.special_case(None), None);
    }

    #[test]
    fn test_special_case_uses_opening_book() {
        let config = MctsConfig::for_testing().with_opening_book(true);
        let mut search = MctsSearch::from_config(&GameState::new(2), config);
        assert_eq!(search.special_case(None), Some(Cell::new(0, 0)));
    }
}

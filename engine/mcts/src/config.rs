//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use engine_config::SearchConfig;

use crate::search::SearchError;

/// Which rollout policy plays out positions below the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    /// Uniformly random moves.
    #[default]
    Random,
    /// Random moves, but never one that completes the mover's own bridge.
    DecisiveMove,
    /// Last-good-reply tables learned from won rollouts.
    LastGoodReply,
    /// Moves drawn from a pool of cells that keep appearing in wins.
    PoolRave,
}

impl PolicyKind {
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::DecisiveMove => "decisive_move",
            PolicyKind::LastGoodReply => "lgr",
            PolicyKind::PoolRave => "poolrave",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "basic" => Ok(PolicyKind::Random),
            "decisive_move" | "decisive" => Ok(PolicyKind::DecisiveMove),
            "lgr" | "last_good_reply" => Ok(PolicyKind::LastGoodReply),
            "poolrave" | "pool_rave" => Ok(PolicyKind::PoolRave),
            other => Err(SearchError::InvalidConfig(format!(
                "unknown rollout policy '{}'",
                other
            ))),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Non-zero enables the "try every child once" rule: unvisited children
    /// are worth +inf during selection.
    pub exploration: f64,

    /// RAVE crossover constant. RAVE statistics are blended in with weight
    /// `(crit - N) / crit` and ignored once a node has `crit` visits.
    pub rave_constant: f64,

    /// Rollout policy used by [`crate::MctsSearch::from_config`].
    pub policy: PolicyKind,

    /// Consult the opening book before searching.
    pub opening_book: bool,

    /// Answer with a dead cell, when one exists, before searching.
    pub dead_cell_analysis: bool,

    /// Pool size for the pool-RAVE policy.
    pub pool_size: usize,

    /// Seed for the search RNG. None seeds from entropy.
    pub seed: Option<u64>,

    /// Wall-clock budget per move.
    pub time_budget: Duration,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: 1.0,
            rave_constant: 300.0,
            policy: PolicyKind::Random,
            opening_book: true,
            dead_cell_analysis: true,
            pool_size: 10,
            seed: None,
            time_budget: Duration::from_secs(10),
        }
    }
}

impl MctsConfig {
    /// Create a deterministic config for testing: fixed seed, no
    /// shortcuts before the search.
    pub fn for_testing() -> Self {
        Self {
            opening_book: false,
            dead_cell_analysis: false,
            seed: Some(42),
            time_budget: Duration::from_millis(50),
            ..Self::default()
        }
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, explore: f64) -> Self {
        self.exploration = explore;
        self
    }

    /// Builder pattern: set RAVE crossover constant.
    pub fn with_rave_constant(mut self, crit: f64) -> Self {
        self.rave_constant = crit;
        self
    }

    /// Builder pattern: set rollout policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Builder pattern: set RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_opening_book(mut self, enabled: bool) -> Self {
        self.opening_book = enabled;
        self
    }

    pub fn with_dead_cell_analysis(mut self, enabled: bool) -> Self {
        self.dead_cell_analysis = enabled;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }
}

impl TryFrom<&SearchConfig> for MctsConfig {
    type Error = SearchError;

    fn try_from(cfg: &SearchConfig) -> Result<Self, Self::Error> {
        if !cfg.time_budget_secs.is_finite() || cfg.time_budget_secs < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "time_budget_secs must be a non-negative number, got {}",
                cfg.time_budget_secs
            )));
        }
        if cfg.rave_constant <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "rave_constant must be positive, got {}",
                cfg.rave_constant
            )));
        }
        if cfg.pool_size == 0 {
            return Err(SearchError::InvalidConfig(
                "pool_size must be at least 1".into(),
            ));
        }

        Ok(Self {
            exploration: cfg.exploration,
            rave_constant: cfg.rave_constant,
            policy: cfg.policy.parse()?,
            opening_book: cfg.opening_book,
            dead_cell_analysis: cfg.dead_cells,
            pool_size: cfg.pool_size,
            seed: cfg.seed,
            time_budget: Duration::from_secs_f64(cfg.time_budget_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!((config.exploration - 1.0).abs() < 1e-12);
        assert!((config.rave_constant - 300.0).abs() < 1e-12);
        assert_eq!(config.policy, PolicyKind::Random);
        assert!(config.opening_book);
        assert!(config.dead_cell_analysis);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_policy(PolicyKind::PoolRave)
            .with_seed(7)
            .with_rave_constant(50.0);

        assert_eq!(config.policy, PolicyKind::PoolRave);
        assert_eq!(config.seed, Some(7));
        assert!((config.rave_constant - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!("basic".parse::<PolicyKind>().unwrap(), PolicyKind::Random);
        assert_eq!("LGR".parse::<PolicyKind>().unwrap(), PolicyKind::LastGoodReply);
        assert_eq!(
            "pool_rave".parse::<PolicyKind>().unwrap(),
            PolicyKind::PoolRave
        );
        assert_eq!(
            PolicyKind::DecisiveMove.name().parse::<PolicyKind>().unwrap(),
            PolicyKind::DecisiveMove
        );
        assert!(matches!(
            "minimax".parse::<PolicyKind>(),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_search_config() {
        let mut cfg = SearchConfig {
            policy: "lgr".into(),
            time_budget_secs: 0.5,
            seed: Some(3),
            dead_cells: false,
            ..SearchConfig::default()
        };
        let config = MctsConfig::try_from(&cfg).unwrap();
        assert_eq!(config.policy, PolicyKind::LastGoodReply);
        assert_eq!(config.time_budget, Duration::from_millis(500));
        assert_eq!(config.seed, Some(3));
        assert!(!config.dead_cell_analysis);

        cfg.pool_size = 0;
        assert!(MctsConfig::try_from(&cfg).is_err());

        cfg.pool_size = 10;
        cfg.time_budget_secs = -1.0;
        assert!(MctsConfig::try_from(&cfg).is_err());
    }
}

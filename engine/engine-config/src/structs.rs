//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_board_size() -> usize {
    defaults::board_size()
}
fn d_time_budget() -> f64 {
    defaults::time_budget_secs()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_rave_constant() -> f64 {
    defaults::rave_constant()
}
fn d_policy() -> String {
    defaults::policy().into()
}
fn d_opening_book() -> bool {
    defaults::opening_book()
}
fn d_dead_cells() -> bool {
    defaults::dead_cells()
}
fn d_pool_size() -> usize {
    defaults::pool_size()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Board geometry
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    /// Side length of the rhombus; the board has `size * size` cells.
    #[serde(default = "d_board_size")]
    pub size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: defaults::board_size(),
        }
    }
}

/// Tree search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget for one move generation.
    #[serde(default = "d_time_budget")]
    pub time_budget_secs: f64,
    /// Non-zero turns on the "try every child once" exploration rule.
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// Visit count at which RAVE statistics stop contributing.
    #[serde(default = "d_rave_constant")]
    pub rave_constant: f64,
    /// Rollout policy name: random, decisive_move, lgr or poolrave.
    #[serde(default = "d_policy")]
    pub policy: String,
    #[serde(default = "d_opening_book")]
    pub opening_book: bool,
    #[serde(default = "d_dead_cells")]
    pub dead_cells: bool,
    /// Number of top-scoring cells drawn from by the pool-RAVE policy.
    #[serde(default = "d_pool_size")]
    pub pool_size: usize,
    /// Fixed seed for reproducible play; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: defaults::time_budget_secs(),
            exploration: defaults::exploration(),
            rave_constant: defaults::rave_constant(),
            policy: defaults::policy().into(),
            opening_book: defaults::opening_book(),
            dead_cells: defaults::dead_cells(),
            pool_size: defaults::pool_size(),
            seed: None,
        }
    }
}

//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so that a missing or partial
//! config.toml always has a complete set of values to fall back on.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    board: BoardDefaults,
    search: SearchDefaults,
}

#[derive(Debug, Deserialize)]
struct BoardDefaults {
    size: usize,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    time_budget_secs: f64,
    exploration: f64,
    rave_constant: f64,
    policy: String,
    opening_book: bool,
    dead_cells: bool,
    pool_size: usize,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Board
pub fn board_size() -> usize {
    DEFAULTS.board.size
}

// Search
pub fn time_budget_secs() -> f64 {
    DEFAULTS.search.time_budget_secs
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn rave_constant() -> f64 {
    DEFAULTS.search.rave_constant
}
pub fn policy() -> &'static str {
    &DEFAULTS.search.policy
}
pub fn opening_book() -> bool {
    DEFAULTS.search.opening_book
}
pub fn dead_cells() -> bool {
    DEFAULTS.search.dead_cells
}
pub fn pool_size() -> usize {
    DEFAULTS.search.pool_size
}

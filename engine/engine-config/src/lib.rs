//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the search engine and anything that drives it.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`REVHEX_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! REVHEX_<SECTION>_<KEY>=value
//!
//! Examples:
//!     REVHEX_BOARD_SIZE=11
//!     REVHEX_SEARCH_POLICY=lgr
//!     REVHEX_SEARCH_TIME_BUDGET_SECS=2.5
//!     REVHEX_SEARCH_SEED=42
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, locate_config, parse_config, ConfigSource,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;

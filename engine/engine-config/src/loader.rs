//! Locating config.toml and layering `REVHEX_*` overrides on top.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files tried, in order, when `REVHEX_CONFIG` is unset or names no file.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Where [`load_config`] reads its file from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `$REVHEX_CONFIG` named an existing file.
    EnvPath(PathBuf),
    /// First hit among [`CONFIG_SEARCH_PATHS`].
    SearchPath(PathBuf),
    /// No file found; embedded defaults only.
    Defaults,
}

/// Resolve the file [`load_config`] would read.
pub fn locate_config() -> ConfigSource {
    if let Some(path) = std::env::var_os("REVHEX_CONFIG").map(PathBuf::from) {
        if path.is_file() {
            return ConfigSource::EnvPath(path);
        }
        warn!(path = %path.display(), "REVHEX_CONFIG names no file, searching defaults");
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
        .map_or(ConfigSource::Defaults, ConfigSource::SearchPath)
}

/// Load the central configuration with env overrides applied.
///
/// A file that cannot be read or parsed yields the defaults.
pub fn load_config() -> CentralConfig {
    match locate_config() {
        ConfigSource::EnvPath(path) | ConfigSource::SearchPath(path) => {
            info!(path = %path.display(), "loading config");
            load_from_path(&path)
        }
        ConfigSource::Defaults => {
            debug!("no config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Parse a TOML document. Missing sections and keys take their defaults.
pub fn parse_config(content: &str) -> Result<CentralConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load one file, then apply env overrides.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| parse_config(&content).map_err(|e| e.to_string()));
    let config = parsed.unwrap_or_else(|error| {
        warn!(path = %path.display(), %error, "unusable config file, using defaults");
        CentralConfig::default()
    });
    apply_env_overrides(config)
}

/// `REVHEX_<SECTION>_<KEY>` overrides. Values that fail to parse are ignored.
macro_rules! env_override {
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Sets `Some(value)`.
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply every `REVHEX_*` override to `config`.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Board
    env_override!(config, board.size, "REVHEX_BOARD_SIZE", parse);

    // Search
    env_override!(
        config,
        search.time_budget_secs,
        "REVHEX_SEARCH_TIME_BUDGET_SECS",
        parse
    );
    env_override!(
        config,
        search.exploration,
        "REVHEX_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.rave_constant,
        "REVHEX_SEARCH_RAVE_CONSTANT",
        parse
    );
    env_override!(config, search.policy, "REVHEX_SEARCH_POLICY");
    env_override!(
        config,
        search.opening_book,
        "REVHEX_SEARCH_OPENING_BOOK",
        parse
    );
    env_override!(config, search.dead_cells, "REVHEX_SEARCH_DEAD_CELLS", parse);
    env_override!(config, search.pool_size, "REVHEX_SEARCH_POOL_SIZE", parse);
    env_override!(config, search.seed, "REVHEX_SEARCH_SEED", optional_parse);

    config
}

//! Loading `BotConfig` from `config.toml`.

use crate::paths::BotPaths;
use couplebot_core::config::BotConfig;
use couplebot_core::error::{BotError, Result};
use std::fs;
use std::path::Path;

/// Loads the configuration from `path`.
///
/// A missing file yields the defaults; a malformed or out-of-range file is a
/// `BotError::Config`.
pub fn load_config(path: &Path) -> Result<BotConfig> {
    if !path.exists() {
        tracing::info!("No config file at {}, using defaults", path.display());
        return Ok(BotConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: BotConfig = toml::from_str(&content)
        .map_err(|e| BotError::config(format!("Invalid {}: {}", path.display(), e)))?;
    config.validate()?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Loads the configuration from the default location.
pub fn load_default_config() -> Result<BotConfig> {
    load_config(&BotPaths::config_file()?)
}

/// Writes `config` as pretty TOML, creating parent directories.
pub fn save_config(path: &Path, config: &BotConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

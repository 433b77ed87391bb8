//! Unified path management for couplebot files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/couplebot/         # Config directory
//! └── config.toml              # Bot configuration
//!
//! ~/.local/share/couplebot/    # Data directory (or `data_dir` from config)
//! ├── hangman_games.json       # Hangman sessions keyed by channel id
//! ├── countdowns.json          # Countdowns keyed by user id
//! ├── love_jar.json            # Love jar notes
//! └── shared_lists.json        # Shared lists keyed by name
//! ```

use couplebot_core::error::{BotError, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "couplebot";

pub const CONFIG_FILE: &str = "config.toml";
pub const HANGMAN_FILE: &str = "hangman_games.json";
pub const COUNTDOWNS_FILE: &str = "countdowns.json";
pub const LOVE_JAR_FILE: &str = "love_jar.json";
pub const SHARED_LISTS_FILE: &str = "shared_lists.json";

/// Resolved locations of the bot's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotPaths {
    data_dir: PathBuf,
}

impl BotPaths {
    /// Uses `data_dir` if given, otherwise the platform data directory.
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_data_dir()?,
        };
        Ok(Self { data_dir })
    }

    /// Returns the couplebot configuration directory (e.g. `~/.config/couplebot/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| BotError::config("Cannot find config directory"))
    }

    /// Returns the default path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| BotError::config("Cannot find data directory"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn hangman_file(&self) -> PathBuf {
        self.data_dir.join(HANGMAN_FILE)
    }

    pub fn love_jar_file(&self) -> PathBuf {
        self.data_dir.join(LOVE_JAR_FILE)
    }

    pub fn shared_lists_file(&self) -> PathBuf {
        self.data_dir.join(SHARED_LISTS_FILE)
    }

    pub fn countdowns_file(&self) -> PathBuf {
        self.data_dir.join(COUNTDOWNS_FILE)
    }
}

//! Bot configuration model.
//!
//! Loaded from `config.toml` by the infrastructure crate; every field has a
//! default so a missing or partial file still yields a usable config.

use crate::error::{BotError, Result};
use crate::fun::FunContent;
use crate::hangman::{DEFAULT_MAX_MISTAKES, DEFAULT_MIN_PHRASE_LEN};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hangman rules that stay fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HangmanSettings {
    /// Wrong guesses allowed before a round is lost.
    pub max_mistakes: u32,
    /// Minimum length of the normalized secret phrase.
    pub min_phrase_len: usize,
}

impl HangmanSettings {
    /// A round needs at least one allowed mistake and a non-empty phrase.
    pub fn validate(&self) -> Result<()> {
        if self.max_mistakes == 0 {
            return Err(BotError::config("hangman.max_mistakes must be at least 1"));
        }
        if self.min_phrase_len == 0 {
            return Err(BotError::config("hangman.min_phrase_len must be at least 1"));
        }
        Ok(())
    }
}

impl Default for HangmanSettings {
    fn default() -> Self {
        Self {
            max_mistakes: DEFAULT_MAX_MISTAKES,
            min_phrase_len: DEFAULT_MIN_PHRASE_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Directory holding the JSON stores. `None` means the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// User ids treated as administrators.
    pub admins: Vec<String>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    // Tables go last so the TOML output stays valid.
    pub hangman: HangmanSettings,
    pub fun: FunContent,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            admins: Vec::new(),
            log_filter: "info".to_string(),
            hangman: HangmanSettings::default(),
            fun: FunContent::default(),
        }
    }
}

impl BotConfig {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.hangman.validate()
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admins.iter().any(|admin| admin == user_id)
    }
}

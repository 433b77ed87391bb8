//! Hangman game errors.

use super::model::GameStatus;
use crate::error::BotError;
use thiserror::Error;

/// Errors returned by [`super::GuessingGameEngine`] and the pure render helpers.
///
/// Everything except `Storage` is an expected, recoverable condition that the
/// caller turns into a user-facing reply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Phrase is too short after normalization
    #[error("phrase must contain at least {min_len} letters or spaces")]
    InvalidPhrase { min_len: usize },

    /// A round is already running in the channel
    #[error("a game is already active in channel '{channel_id}'")]
    GameAlreadyActive { channel_id: String },

    /// Setter and guesser are the same, or the guesser is not eligible
    #[error("invalid target user: {reason}")]
    InvalidTargetUser { reason: String },

    /// No session exists for the channel
    #[error("no active game in channel '{channel_id}'")]
    NoActiveGame { channel_id: String },

    /// A session exists but is already finished
    #[error("the game is already {status}")]
    GameNotActive { status: GameStatus },

    /// Someone other than the designated guesser tried to guess
    #[error("user '{user_id}' is not the designated guesser")]
    WrongTurn { user_id: String },

    /// Stop requested by a user who is neither the setter nor an admin
    #[error("user '{user_id}' may not stop this game")]
    Unauthorized { user_id: String },

    /// Guess payload was not a single alphabetic character
    #[error("invalid guess '{input}': expected a single letter A-Z")]
    InvalidInput { input: String },

    /// Mistake count outside `0..=max_mistakes`
    #[error("mistakes {mistakes} out of range 0..={max_mistakes}")]
    OutOfRange { mistakes: u32, max_mistakes: u32 },

    /// The session store failed
    #[error("storage error: {0}")]
    Storage(#[from] BotError),
}

impl GameError {
    /// True for store failures the caller may want to retry or alert on.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTargetUser {
            reason: reason.into(),
        }
    }
}

/// A type alias for `Result<T, GameError>`.
pub type GameResult<T> = std::result::Result<T, GameError>;

//! Hangman domain module.
//!
//! A turn-based guessing game: a setter picks a secret phrase, a guesser picks
//! letters one at a time, and a bounded number of wrong guesses ends the round.
//!
//! # Module Structure
//!
//! - `model`: Session entity and phrase normalization
//! - `engine`: `GuessingGameEngine`, the only place sessions are mutated
//! - `render`: pure projections (`render_mask`, `failure_stage`, gallows art)
//! - `view`: `GameView` display model for chat frontends
//! - `repository`: `SessionRepository` persistence trait
//! - `error`: `GameError`

mod engine;
mod error;
mod model;
mod render;
mod repository;
mod view;

pub use engine::{GuessOutcome, GuessResult, GuessingGameEngine};
pub use error::{GameError, GameResult};
pub use model::{
    normalize_phrase, GameStatus, Session, DEFAULT_MAX_MISTAKES, DEFAULT_MIN_PHRASE_LEN,
};
pub use render::{failure_stage, gallows_art, render_mask, StageIndex, PLACEHOLDER, SEPARATOR};
pub use repository::SessionRepository;
pub use view::{GameView, KeyStyle, LetterKey, ViewTone, KEYS_PER_ROW};

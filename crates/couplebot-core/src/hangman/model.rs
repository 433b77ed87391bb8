//! Hangman session domain model.
//!
//! A [`Session`] is one round of the guessing game scoped to a channel. It is
//! the "pure" domain model the engine mutates and the repositories persist.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Default number of wrong guesses that ends a round.
pub const DEFAULT_MAX_MISTAKES: u32 = 6;

/// Default minimum length of a normalized secret phrase.
pub const DEFAULT_MIN_PHRASE_LEN: usize = 3;

/// Lifecycle status of a session.
///
/// Only `Active` accepts guesses; the other three are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// The round is in progress.
    Active,
    /// Every letter of the phrase was guessed.
    Won,
    /// The guesser ran out of mistakes.
    Lost,
    /// The setter or an administrator ended the round.
    Stopped,
}

impl GameStatus {
    /// Returns true for `Won`, `Lost` and `Stopped`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One round of the guessing game.
///
/// `guessed_letters` is a `BTreeSet` so that the persisted form is a sorted
/// array and re-guessed letters cannot appear twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Channel the round belongs to (store key)
    pub channel_id: String,
    /// Normalized secret phrase (`A-Z` and single spaces)
    pub word: String,
    /// User who supplied the phrase
    pub setter_id: String,
    /// User allowed to guess
    pub guesser_id: String,
    /// Uppercase letters guessed so far
    #[serde(default)]
    pub guessed_letters: BTreeSet<char>,
    /// Wrong guesses so far
    #[serde(default)]
    pub mistakes: u32,
    /// Wrong guesses allowed before the round is lost
    #[serde(default = "default_max_mistakes")]
    pub max_mistakes: u32,
    /// Current lifecycle status
    pub status: GameStatus,
    /// Timestamp when the round was started (RFC 3339)
    pub started_at: String,
    /// Timestamp of the last persisted change (RFC 3339)
    pub updated_at: String,
}

fn default_max_mistakes() -> u32 {
    DEFAULT_MAX_MISTAKES
}

impl Session {
    /// Creates a new active session. `word` must already be normalized.
    pub fn new(
        channel_id: impl Into<String>,
        setter_id: impl Into<String>,
        guesser_id: impl Into<String>,
        word: impl Into<String>,
        max_mistakes: u32,
    ) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            channel_id: channel_id.into(),
            word: word.into(),
            setter_id: setter_id.into(),
            guesser_id: guesser_id.into(),
            guessed_letters: BTreeSet::new(),
            mistakes: 0,
            max_mistakes,
            status: GameStatus::Active,
            started_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// True if `letter` (any case) occurs in the phrase.
    pub fn contains_letter(&self, letter: char) -> bool {
        let upper = letter.to_ascii_uppercase();
        self.word.chars().any(|c| c == upper)
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&letter.to_ascii_uppercase())
    }

    /// True when every alphabetic character of the phrase has been guessed.
    pub fn is_solved(&self) -> bool {
        self.word
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .all(|c| self.guessed_letters.contains(&c))
    }

    /// Number of distinct letters in the phrase.
    pub fn distinct_letter_count(&self) -> usize {
        self.word
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn remaining_mistakes(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistakes)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }
}

/// Normalizes a raw phrase into the stored form.
///
/// Keeps ASCII letters and whitespace, uppercases letters, collapses runs of
/// whitespace into one space and trims both ends.
pub fn normalize_phrase(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phrase_strips_and_uppercases() {
        assert_eq!(normalize_phrase("Hello, World!"), "HELLO WORLD");
        assert_eq!(normalize_phrase("  pizza   night 2nite "), "PIZZA NIGHT NITE");
        assert_eq!(normalize_phrase("a1b2c3"), "ABC");
        assert_eq!(normalize_phrase("!!!"), "");
    }

    #[test]
    fn test_normalize_phrase_drops_non_ascii_letters() {
        assert_eq!(normalize_phrase("café au lait"), "CAF AU LAIT");
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new("chan", "alice", "bob", "CAT", DEFAULT_MAX_MISTAKES);
        assert!(session.is_active());
        assert_eq!(session.mistakes, 0);
        assert_eq!(session.max_mistakes, 6);
        assert!(session.guessed_letters.is_empty());
        assert_eq!(session.started_at, session.updated_at);
    }

    #[test]
    fn test_is_solved_ignores_spaces() {
        let mut session = Session::new("chan", "alice", "bob", "HI YO", 6);
        for letter in ['H', 'I', 'Y'] {
            session.guessed_letters.insert(letter);
        }
        assert!(!session.is_solved());
        session.guessed_letters.insert('O');
        assert!(session.is_solved());
    }

    #[test]
    fn test_distinct_letter_count() {
        let session = Session::new("chan", "alice", "bob", "HELLO WORLD", 6);
        assert_eq!(session.distinct_letter_count(), 7);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!GameStatus::Active.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
        assert!(GameStatus::Stopped.is_terminal());
        assert_eq!(GameStatus::Stopped.to_string(), "stopped");
    }

    #[test]
    fn test_session_json_round_trip_keeps_letter_set() {
        let mut session = Session::new("chan", "alice", "bob", "CAT", 6);
        session.guessed_letters.extend(['T', 'A', 'Z']);
        session.mistakes = 1;

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains(r#""guessed_letters":["A","T","Z"]"#));
        assert!(json.contains(r#""status":"active""#));

        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_duplicate_letters_collapse_on_load() {
        let json = r#"{
            "channel_id": "chan",
            "word": "CAT",
            "setter_id": "alice",
            "guesser_id": "bob",
            "guessed_letters": ["A", "A", "C"],
            "mistakes": 0,
            "status": "active",
            "started_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.guessed_letters.len(), 2);
        assert_eq!(session.max_mistakes, DEFAULT_MAX_MISTAKES);
    }
}

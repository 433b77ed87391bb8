//! Display model for a hangman session.
//!
//! `GameView` is a pure function of a [`Session`]; the chat frontend turns it
//! into an embed with one button per letter.

use super::model::{GameStatus, Session};
use super::render::{failure_stage, gallows_art, render_mask};
use serde::Serialize;

/// Letters per keyboard row (26 letters → rows of 7, 7, 7, 5).
pub const KEYS_PER_ROW: usize = 7;

/// Overall color of the rendered game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTone {
    InProgress,
    Success,
    Failure,
    Neutral,
}

/// Visual state of a single letter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// Not guessed yet.
    Unused,
    /// Guessed and in the phrase.
    Hit,
    /// Guessed and not in the phrase.
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterKey {
    pub letter: char,
    pub style: KeyStyle,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub title: String,
    pub tone: ViewTone,
    /// e.g. `Mistakes: 2/6`
    pub mistakes_label: String,
    pub art: String,
    pub mask: String,
    pub footer: String,
    pub keyboard: Vec<Vec<LetterKey>>,
}

impl GameView {
    /// Builds the view for `session`.
    ///
    /// The word only appears in the footer once the round is lost or stopped;
    /// a won round already shows it through the mask.
    pub fn from_session(session: &Session, setter_name: &str, guesser_name: &str) -> Self {
        let (title, tone) = match session.status {
            GameStatus::Active => (format!("Hangman: set by {setter_name}"), ViewTone::InProgress),
            GameStatus::Won => ("Hangman solved!".to_string(), ViewTone::Success),
            GameStatus::Lost => ("Hangman game over".to_string(), ViewTone::Failure),
            GameStatus::Stopped => ("Hangman stopped".to_string(), ViewTone::Neutral),
        };

        let guessed: Vec<String> = session
            .guessed_letters
            .iter()
            .map(|c| c.to_string())
            .collect();
        let mut footer = format!("Guessed letters: {}", guessed.join(", "));
        if matches!(session.status, GameStatus::Lost | GameStatus::Stopped) {
            footer.push_str(&format!(" | Word was: {}", session.word));
        }
        if session.is_active() {
            footer = format!("Turn: {guesser_name} | {footer}");
        }

        // Stored sessions are validated on creation; clamp in case a file was edited by hand.
        let mistakes = session.mistakes.min(session.max_mistakes);
        let art = failure_stage(mistakes, session.max_mistakes)
            .map(|stage| gallows_art(stage, session.max_mistakes))
            .unwrap_or_default()
            .to_string();

        Self {
            title,
            tone,
            mistakes_label: format!("Mistakes: {}/{}", session.mistakes, session.max_mistakes),
            art,
            mask: render_mask(&session.word, &session.guessed_letters),
            footer,
            keyboard: keyboard(session),
        }
    }

    /// Iterates every key regardless of row.
    pub fn keys(&self) -> impl Iterator<Item = &LetterKey> {
        self.keyboard.iter().flatten()
    }
}

fn keyboard(session: &Session) -> Vec<Vec<LetterKey>> {
    let keys: Vec<LetterKey> = ('A'..='Z')
        .map(|letter| {
            let guessed = session.has_guessed(letter);
            let style = match (guessed, session.contains_letter(letter)) {
                (false, _) => KeyStyle::Unused,
                (true, true) => KeyStyle::Hit,
                (true, false) => KeyStyle::Miss,
            };
            LetterKey {
                letter,
                style,
                disabled: guessed || !session.is_active(),
            }
        })
        .collect();

    keys.chunks(KEYS_PER_ROW).map(<[LetterKey]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(word: &str) -> Session {
        Session::new("chan", "alice", "bob", word, 6)
    }

    #[test]
    fn test_active_view() {
        let mut s = session("CAT");
        s.guessed_letters.extend(['C', 'Z']);
        s.mistakes = 1;

        let view = GameView::from_session(&s, "Alice", "Bob");
        assert_eq!(view.title, "Hangman: set by Alice");
        assert_eq!(view.tone, ViewTone::InProgress);
        assert_eq!(view.mistakes_label, "Mistakes: 1/6");
        assert_eq!(view.mask, "C _ _");
        assert_eq!(view.footer, "Turn: Bob | Guessed letters: C, Z");
        assert!(view.art.contains("( )"));
        assert!(!view.footer.contains("CAT"));
    }

    #[test]
    fn test_keyboard_layout_and_styles() {
        let mut s = session("CAT");
        s.guessed_letters.extend(['C', 'Z']);
        let view = GameView::from_session(&s, "Alice", "Bob");

        let row_sizes: Vec<_> = view.keyboard.iter().map(Vec::len).collect();
        assert_eq!(row_sizes, vec![7, 7, 7, 5]);
        assert_eq!(view.keys().count(), 26);

        let key = |l: char| view.keys().find(|k| k.letter == l).cloned().unwrap();
        assert_eq!(key('C').style, KeyStyle::Hit);
        assert!(key('C').disabled);
        assert_eq!(key('Z').style, KeyStyle::Miss);
        assert_eq!(key('A').style, KeyStyle::Unused);
        assert!(!key('A').disabled);
    }

    #[test]
    fn test_terminal_views_disable_keyboard_and_reveal_word() {
        let mut lost = session("CAT");
        lost.status = GameStatus::Lost;
        lost.mistakes = 6;
        let view = GameView::from_session(&lost, "Alice", "Bob");
        assert_eq!(view.tone, ViewTone::Failure);
        assert!(view.keys().all(|k| k.disabled));
        assert!(view.footer.ends_with("| Word was: CAT"));
        assert!(!view.footer.starts_with("Turn:"));
        assert!(view.art.contains("(X)"));

        let mut stopped = session("CAT");
        stopped.status = GameStatus::Stopped;
        let view = GameView::from_session(&stopped, "Alice", "Bob");
        assert_eq!(view.title, "Hangman stopped");
        assert!(view.footer.contains("Word was: CAT"));

        let mut won = session("CAT");
        won.guessed_letters.extend(['C', 'A', 'T']);
        won.status = GameStatus::Won;
        let view = GameView::from_session(&won, "Alice", "Bob");
        assert_eq!(view.tone, ViewTone::Success);
        assert_eq!(view.mask, "C A T");
        assert!(!view.footer.contains("Word was"));
    }
}

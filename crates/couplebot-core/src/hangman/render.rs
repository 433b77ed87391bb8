//! Pure projections of session state: the masked phrase and the gallows stage.

use super::error::{GameError, GameResult};
use std::collections::BTreeSet;
use std::fmt;

/// Symbol shown for a letter that has not been guessed yet.
pub const PLACEHOLDER: char = '_';

/// Separator placed between rendered characters.
pub const SEPARATOR: &str = " ";

/// Renders the masked phrase, e.g. `H _ L L O` for `HELLO` with `{H, L}` guessed.
///
/// Spaces are kept as-is, so a two-word phrase shows a wider gap between words.
pub fn render_mask(word: &str, guessed_letters: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if c == ' ' || guessed_letters.contains(&upper) {
                upper
            } else {
                PLACEHOLDER
            }
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Severity level of the gallows drawing, `0` (empty gallows) up to `max_mistakes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageIndex(pub u32);

impl StageIndex {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage({})", self.0)
    }
}

/// Maps a mistake count to its stage.
///
/// Defined for every value in `0..=max_mistakes`; anything else is `OutOfRange`.
pub fn failure_stage(mistakes: u32, max_mistakes: u32) -> GameResult<StageIndex> {
    if max_mistakes == 0 || mistakes > max_mistakes {
        return Err(GameError::OutOfRange {
            mistakes,
            max_mistakes,
        });
    }
    Ok(StageIndex(mistakes))
}

const GALLOWS: [&str; 7] = [
    "  ---\n  |/\n  |\n  |\n  |\n__|__",
    "  ---\n  |/  |\n  |  ( )\n  |\n  |\n__|__",
    "  ---\n  |/  |\n  |  ( )\n  |   |\n  |\n__|__",
    "  ---\n  |/  |\n  |  ( )\n  |  /|\n  |\n__|__",
    "  ---\n  |/  |\n  |  ( )\n  |  /|\\\n  |\n__|__",
    "  ---\n  |/  |\n  |  ( )\n  |  /|\\\n  |  /\n__|__",
    "  ---\n  |/  |\n  |  (X)\n  |  /|\\\n  |  / \\\n__|__",
];

/// Returns the gallows drawing for a stage.
///
/// The seven drawings are spread across `0..=max_mistakes`, so the last stage
/// always shows the full figure regardless of the configured limit.
pub fn gallows_art(stage: StageIndex, max_mistakes: u32) -> &'static str {
    let last = GALLOWS.len() - 1;
    if max_mistakes == 0 {
        return GALLOWS[last];
    }
    let stage = stage.raw().min(max_mistakes) as usize;
    let index = stage * last / max_mistakes as usize;
    GALLOWS[index.min(last)]
}

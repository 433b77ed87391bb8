//! Content for the small party commands: `/joke`, `/truth`, `/dare`, `/hug`
//! and `/kiss`.
//!
//! The text lists can be replaced in `config.toml` under `[fun]`.

use serde::{Deserialize, Serialize};

const INSIDE_JOKES: &[&str] = &[
    "Remember that time we got lost? 😂",
    "You're the 🧀 to my 🍷!",
    "Internal Error: Cuteness overload detected.",
    "That's what she said! (Or he said...)",
    "Don't make me use the 'look' 👀",
    "You owe me a soda! 🥤",
];

const TRUTH_QUESTIONS: &[&str] = &[
    "What is your biggest fear?",
    "What is the most embarrassing thing you've ever done?",
    "Have you ever lied to get out of trouble?",
    "Who is your secret crush? (Besides me 😉)",
    "What is your guilty pleasure movie?",
    "If you could change one thing about yourself, what would it be?",
];

const DARE_TASKS: &[&str] = &[
    "Send a selfie making a funny face right now!",
    "Do 10 jumping jacks and send a video (or voice note of you tired).",
    "Talk in a fake accent for the next 10 minutes.",
    "Send the 5th photo in your camera roll without explaining context.",
    "Text your parents/best friend and tell them you're becoming a mime.",
    "Draw a picture of me on paper and send it.",
];

const HUG_IMAGES: &[&str] = &[
    "https://placehold.co/500x300/42a5f5/fff?text=A+BIG+HUG",
    "https://placehold.co/500x300/9ccc65/fff?text=CUDDLES",
    "https://placehold.co/500x300/ab47bc/fff?text=COMFY+HUG",
];

const KISS_IMAGES: &[&str] = &[
    "https://placehold.co/500x300/ef5350/fff?text=SWEET+KISS",
    "https://placehold.co/500x300/ffb300/fff?text=MUAH",
    "https://placehold.co/500x300/26a69a/fff?text=KISS",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Text pools the random party commands pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunContent {
    pub jokes: Vec<String>,
    pub truths: Vec<String>,
    pub dares: Vec<String>,
}

impl Default for FunContent {
    fn default() -> Self {
        Self {
            jokes: owned(INSIDE_JOKES),
            truths: owned(TRUTH_QUESTIONS),
            dares: owned(DARE_TASKS),
        }
    }
}

/// A virtual gesture sent from one user to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affection {
    Hug,
    Kiss,
}

impl Affection {
    pub fn title(self) -> &'static str {
        match self {
            Affection::Hug => "🤗 **Virtual Hug!** 🤗",
            Affection::Kiss => "💋 **Virtual Kiss!** 💋",
        }
    }

    pub fn describe(self, from: &str, to: &str) -> String {
        match self {
            Affection::Hug => format!("{from} gives {to} a big, loving hug! Aww..."),
            Affection::Kiss => format!("{from} gives {to} a sweet kiss! Hope you like it!"),
        }
    }

    /// Reply when someone targets themselves.
    pub fn self_target_message(self) -> &'static str {
        match self {
            Affection::Hug => "You can't hug yourself, silly! But I'll send one your way. 🤗",
            Affection::Kiss => "Don't kiss and tell! I'll pretend I didn't see that. 😉",
        }
    }

    pub fn images(self) -> &'static [&'static str] {
        match self {
            Affection::Hug => HUG_IMAGES,
            Affection::Kiss => KISS_IMAGES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_fun_table_keeps_other_defaults() {
        let content: FunContent = toml::from_str("jokes = [\"knock knock\"]\n").unwrap();
        assert_eq!(content.jokes, vec!["knock knock"]);
        assert_eq!(content.truths.len(), TRUTH_QUESTIONS.len());
        assert_eq!(content.dares.len(), DARE_TASKS.len());
    }

    #[test]
    fn test_affection_text() {
        assert_eq!(
            Affection::Hug.describe("Alice", "Bob"),
            "Alice gives Bob a big, loving hug! Aww..."
        );
        assert!(Affection::Kiss.images().iter().all(|url| url.starts_with("https://")));
    }
}

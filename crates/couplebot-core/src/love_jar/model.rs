use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A note left in the jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoveNote {
    /// Display name of the author at the time the note was written
    #[serde(rename = "user")]
    pub author: String,
    pub text: String,
    /// Timestamp when the note was added (RFC 3339). Absent in older jars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl LoveNote {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_entry_without_timestamp() {
        let note: LoveNote = serde_json::from_str(r#"{"user": "Alice", "text": "hi"}"#).unwrap();
        assert_eq!(note.author, "Alice");
        assert_eq!(note.created_at, None);
    }

    #[test]
    fn test_new_note_is_timestamped() {
        let note = LoveNote::new("Bob", "you're the best");
        assert!(note.created_at.is_some());
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["user"], "Bob");
    }
}

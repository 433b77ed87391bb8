//! Who is acting, and where.

use serde::{Deserialize, Serialize};

/// A chat user as the platform reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_bot: false,
        }
    }

    pub fn bot(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::new(id, display_name)
        }
    }
}

/// Everything the dispatcher knows about an incoming command besides its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub channel_id: String,
    pub user: Participant,
    /// Platform-level administrator; may stop any hangman round.
    pub is_admin: bool,
}

impl CommandContext {
    pub fn new(channel_id: impl Into<String>, user: Participant) -> Self {
        Self {
            channel_id: channel_id.into(),
            user,
            is_admin: false,
        }
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

use couplebot_core::hangman::GameView;
use serde::Serialize;

/// What the bot sends back for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Markdown text.
    pub content: String,
    /// Hangman board to show alongside the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<GameView>,
    /// Picture to attach, e.g. for `/hug`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Only the invoking user sees the reply.
    pub ephemeral: bool,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            view: None,
            image_url: None,
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            ephemeral: true,
            ..Self::public(content)
        }
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

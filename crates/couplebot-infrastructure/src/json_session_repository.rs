//! JSON-file SessionRepository implementation

use crate::paths::BotPaths;
use crate::storage::{run_blocking, AtomicJsonFile};
use async_trait::async_trait;
use couplebot_core::error::Result;
use couplebot_core::hangman::{Session, SessionRepository};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

type SessionMap = BTreeMap<String, Session>;

/// Stores every hangman session in one JSON document keyed by channel id.
///
/// ```text
/// data_dir/
/// └── hangman_games.json   { "<channel_id>": { ...session... }, ... }
/// ```
///
/// Each write goes through [`AtomicJsonFile::update`], so concurrent writers
/// (even from separate processes) never interleave.
pub struct JsonSessionRepository {
    file: Arc<AtomicJsonFile<SessionMap>>,
}

impl JsonSessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    /// Creates the repository at `hangman_games.json` inside the data directory.
    pub fn from_paths(paths: &BotPaths) -> Self {
        Self::new(paths.hangman_file())
    }

    async fn load_all(&self) -> Result<SessionMap> {
        let file = self.file.clone();
        run_blocking(move || Ok(file.load()?.unwrap_or_default())).await
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn find_by_channel(&self, channel_id: &str) -> Result<Option<Session>> {
        Ok(self.load_all().await?.remove(channel_id))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let file = self.file.clone();
        let session = session.clone();
        run_blocking(move || {
            file.update(SessionMap::new(), |sessions| {
                sessions.insert(session.channel_id.clone(), session);
            })
        })
        .await
    }

    async fn delete(&self, channel_id: &str) -> Result<()> {
        let file = self.file.clone();
        let channel_id = channel_id.to_string();
        let removed = run_blocking(move || {
            file.update(SessionMap::new(), |sessions| {
                sessions.remove(&channel_id).is_some()
            })
        })
        .await?;
        if !removed {
            tracing::debug!("delete: no stored session to remove");
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self.load_all().await?.into_values().collect();

        // Most recently updated first
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}

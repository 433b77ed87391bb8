//! In-memory repositories.
//!
//! Nothing is written to disk. Used by the CLI's `--in-memory` mode and by
//! tests that do not care about persistence.

use async_trait::async_trait;
use couplebot_core::countdown::{Countdown, CountdownRepository};
use couplebot_core::error::Result;
use couplebot_core::hangman::{Session, SessionRepository};
use couplebot_core::love_jar::{LoveJarRepository, LoveNote};
use crate::json_shared_list_repository::{apply_edit, ListMap};
use couplebot_core::shared_list::{
    normalize_list_name, EditOutcome, ListEdit, SharedList, SharedListRepository,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_channel(&self, channel_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(channel_id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.channel_id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, channel_id: &str) -> Result<()> {
        self.sessions.write().await.remove(channel_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}

#[derive(Default)]
pub struct InMemoryLoveJarRepository {
    notes: RwLock<Vec<LoveNote>>,
}

impl InMemoryLoveJarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoveJarRepository for InMemoryLoveJarRepository {
    async fn add(&self, note: &LoveNote) -> Result<()> {
        self.notes.write().await.push(note.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<LoveNote>> {
        Ok(self.notes.read().await.clone())
    }
}

#[derive(Default)]
pub struct InMemorySharedListRepository {
    lists: RwLock<ListMap>,
}

impl InMemorySharedListRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharedListRepository for InMemorySharedListRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<SharedList>> {
        let name = normalize_list_name(name);
        let lists = self.lists.read().await;
        Ok(lists.get(&name).map(|items| SharedList {
            name,
            items: items.clone(),
        }))
    }

    async fn edit(&self, name: &str, edit: ListEdit) -> Result<EditOutcome> {
        let mut lists = self.lists.write().await;
        Ok(apply_edit(&mut lists, normalize_list_name(name), edit))
    }

    async fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.lists.read().await.keys().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryCountdownRepository {
    countdowns: RwLock<HashMap<String, Vec<Countdown>>>,
}

impl InMemoryCountdownRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CountdownRepository for InMemoryCountdownRepository {
    async fn add(&self, user_id: &str, countdown: &Countdown) -> Result<()> {
        self.countdowns
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(countdown.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Countdown>> {
        Ok(self
            .countdowns
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<bool> {
        Ok(self.countdowns.write().await.remove(user_id).is_some())
    }
}

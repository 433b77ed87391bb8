//! JSON-file CountdownRepository implementation

use crate::paths::BotPaths;
use crate::storage::{run_blocking, AtomicJsonFile};
use async_trait::async_trait;
use couplebot_core::countdown::{Countdown, CountdownRepository};
use couplebot_core::error::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// `{ "<user id>": [{"title": "...", "date": "YYYY-MM-DD"}, ...] }`
type CountdownMap = BTreeMap<String, Vec<Countdown>>;

pub struct JsonCountdownRepository {
    file: Arc<AtomicJsonFile<CountdownMap>>,
}

impl JsonCountdownRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn from_paths(paths: &BotPaths) -> Self {
        Self::new(paths.countdowns_file())
    }
}

#[async_trait]
impl CountdownRepository for JsonCountdownRepository {
    async fn add(&self, user_id: &str, countdown: &Countdown) -> Result<()> {
        let file = self.file.clone();
        let user_id = user_id.to_string();
        let countdown = countdown.clone();
        run_blocking(move || {
            file.update(CountdownMap::new(), |countdowns| {
                countdowns.entry(user_id).or_default().push(countdown);
            })
        })
        .await
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Countdown>> {
        let file = self.file.clone();
        let user_id = user_id.to_string();
        run_blocking(move || {
            let mut countdowns = file.load()?.unwrap_or_default();
            Ok(countdowns.remove(&user_id).unwrap_or_default())
        })
        .await
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<bool> {
        let file = self.file.clone();
        let user_id = user_id.to_string();
        let removed = run_blocking(move || {
            file.update(CountdownMap::new(), |countdowns| {
                countdowns.remove(&user_id).is_some()
            })
        })
        .await?;
        if removed {
            tracing::debug!("Countdowns deleted for one user");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn countdown(title: &str, date: &str) -> Countdown {
        Countdown {
            title: title.to_string(),
            date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_countdowns_are_per_user() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonCountdownRepository::new(temp_dir.path().join("countdowns.json"));

        repo.add("1001", &countdown("Trip", "2030-01-01")).await.unwrap();
        repo.add("1001", &countdown("Party", "2030-02-01")).await.unwrap();
        repo.add("1002", &countdown("Concert", "2030-03-01")).await.unwrap();

        let mine = repo.list_for_user("1001").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].title, "Trip");
        assert!(repo.list_for_user("1003").await.unwrap().is_empty());

        assert!(repo.delete_for_user("1001").await.unwrap());
        assert!(!repo.delete_for_user("1001").await.unwrap());
        assert_eq!(repo.list_for_user("1002").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("countdowns.json");
        let repo = JsonCountdownRepository::new(path.clone());

        repo.add("1001", &countdown("Trip", "2030-01-01")).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({ "1001": [{ "title": "Trip", "date": "2030-01-01" }] })
        );
    }
}

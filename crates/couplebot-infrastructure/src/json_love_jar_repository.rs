//! JSON-file LoveJarRepository implementation

use crate::paths::BotPaths;
use crate::storage::{run_blocking, AtomicJsonFile};
use async_trait::async_trait;
use couplebot_core::error::Result;
use couplebot_core::love_jar::{LoveJarRepository, LoveNote};
use std::path::PathBuf;
use std::sync::Arc;

/// Stores the jar as a JSON array of `{"user", "text"}` objects.
pub struct JsonLoveJarRepository {
    file: Arc<AtomicJsonFile<Vec<LoveNote>>>,
}

impl JsonLoveJarRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn from_paths(paths: &BotPaths) -> Self {
        Self::new(paths.love_jar_file())
    }
}

#[async_trait]
impl LoveJarRepository for JsonLoveJarRepository {
    async fn add(&self, note: &LoveNote) -> Result<()> {
        let file = self.file.clone();
        let note = note.clone();
        let total = run_blocking(move || {
            file.update(Vec::new(), |notes| {
                notes.push(note);
                notes.len()
            })
        })
        .await?;
        tracing::debug!("Love jar now holds {} notes", total);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<LoveNote>> {
        let file = self.file.clone();
        run_blocking(move || Ok(file.load()?.unwrap_or_default())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_add_keeps_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonLoveJarRepository::new(temp_dir.path().join("love_jar.json"));

        assert!(repo.list_all().await.unwrap().is_empty());

        repo.add(&LoveNote::new("Alice", "first")).await.unwrap();
        repo.add(&LoveNote::new("Bob", "second")).await.unwrap();

        let texts: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_reads_legacy_jar() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("love_jar.json");
        fs::write(&path, r#"[{"user": "Alice", "text": "hi"}]"#).unwrap();

        let repo = JsonLoveJarRepository::new(path);
        repo.add(&LoveNote::new("Bob", "hello")).await.unwrap();

        let notes = repo.list_all().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].author, "Alice");
        assert_eq!(notes[0].created_at, None);
    }
}

//! JSON-file SharedListRepository implementation

use crate::paths::BotPaths;
use crate::storage::{run_blocking, AtomicJsonFile};
use async_trait::async_trait;
use couplebot_core::error::Result;
use couplebot_core::shared_list::{
    normalize_list_name, EditOutcome, ListEdit, SharedList, SharedListRepository,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// On disk a list is just its items: `{ "movies": ["Alien", "Heat"] }`.
pub(crate) type ListMap = BTreeMap<String, Vec<String>>;

/// Applies `edit` to the list stored under the normalized `name`.
pub(crate) fn apply_edit(lists: &mut ListMap, name: String, edit: ListEdit) -> EditOutcome {
    if !matches!(edit, ListEdit::Add(_)) && !lists.contains_key(&name) {
        return EditOutcome::NoSuchList;
    }

    let items = lists.remove(&name).unwrap_or_default();
    let mut list = SharedList { name, items };
    let outcome = list.apply(edit);
    lists.insert(list.name, list.items);
    outcome
}

pub struct JsonSharedListRepository {
    file: Arc<AtomicJsonFile<ListMap>>,
}

impl JsonSharedListRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn from_paths(paths: &BotPaths) -> Self {
        Self::new(paths.shared_lists_file())
    }

    async fn load_all(&self) -> Result<ListMap> {
        let file = self.file.clone();
        run_blocking(move || Ok(file.load()?.unwrap_or_default())).await
    }
}

#[async_trait]
impl SharedListRepository for JsonSharedListRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<SharedList>> {
        let name = normalize_list_name(name);
        let mut lists = self.load_all().await?;
        Ok(lists.remove(&name).map(|items| SharedList { name, items }))
    }

    async fn edit(&self, name: &str, edit: ListEdit) -> Result<EditOutcome> {
        let file = self.file.clone();
        let name = normalize_list_name(name);
        let outcome = run_blocking(move || {
            file.update(ListMap::new(), |lists| apply_edit(lists, name, edit))
        })
        .await?;
        tracing::debug!(?outcome, "shared list edited");
        Ok(outcome)
    }

    async fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.load_all().await?.into_keys().collect())
    }
}

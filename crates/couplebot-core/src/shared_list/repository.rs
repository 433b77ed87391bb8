//! Shared list repository trait.

use super::model::{EditOutcome, ListEdit, SharedList};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for shared lists, keyed by normalized list name.
#[async_trait]
pub trait SharedListRepository: Send + Sync {
    /// Finds a list by (normalized) name.
    async fn find_by_name(&self, name: &str) -> Result<Option<SharedList>>;

    /// Applies `edit` to the named list as one read-modify-write.
    ///
    /// Concurrent edits of the same store never overwrite each other. `Add`
    /// creates a missing list; `Remove` and `Clear` report
    /// [`EditOutcome::NoSuchList`] and create nothing.
    async fn edit(&self, name: &str, edit: ListEdit) -> Result<EditOutcome>;

    /// Names of all stored lists.
    async fn list_names(&self) -> Result<Vec<String>>;
}

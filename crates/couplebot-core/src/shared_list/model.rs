use serde::{Deserialize, Serialize};

/// Lists are keyed case-insensitively: `" Movies "` and `"movies"` are the same list.
pub fn normalize_list_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A named, ordered list of free-text items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedList {
    pub name: String,
    pub items: Vec<String>,
}

/// Result of [`SharedList::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(String),
    /// The input parsed as a position but no item sits there.
    InvalidIndex,
    NotFound,
}

/// One change to a list. Repositories apply it atomically, see
/// [`SharedListRepository::edit`](super::SharedListRepository::edit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEdit {
    Add(String),
    /// Exact text or 1-based position.
    Remove(String),
    Clear,
}

/// Result of applying a [`ListEdit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Added,
    Removal(RemoveOutcome),
    /// `Remove` on a list without items.
    Empty,
    Cleared,
    /// `Remove` or `Clear` on a list that was never created.
    NoSuchList,
}

impl SharedList {
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_list_name(name),
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Removes an item by exact text first, then by 1-based position.
    pub fn remove(&mut self, item: &str) -> RemoveOutcome {
        if let Some(pos) = self.items.iter().position(|existing| existing == item) {
            return RemoveOutcome::Removed(self.items.remove(pos));
        }

        match item.trim().parse::<usize>() {
            Ok(index) if (1..=self.items.len()).contains(&index) => {
                RemoveOutcome::Removed(self.items.remove(index - 1))
            }
            Ok(_) => RemoveOutcome::InvalidIndex,
            Err(_) => RemoveOutcome::NotFound,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn apply(&mut self, edit: ListEdit) -> EditOutcome {
        match edit {
            ListEdit::Add(item) => {
                self.push(item);
                EditOutcome::Added
            }
            ListEdit::Remove(_) if self.is_empty() => EditOutcome::Empty,
            ListEdit::Remove(item) => EditOutcome::Removal(self.remove(&item)),
            ListEdit::Clear => {
                self.clear();
                EditOutcome::Cleared
            }
        }
    }

    /// Numbered lines, `1. first`, `2. second`, ...
    pub fn numbered_lines(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect()
    }
}

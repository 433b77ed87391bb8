//! Shared list domain module.
//!
//! Named lists (movies, groceries, date ideas) that both partners can edit.

mod model;
mod repository;

pub use model::{normalize_list_name, EditOutcome, ListEdit, RemoveOutcome, SharedList};
pub use repository::SharedListRepository;

//! Love jar repository trait.

use super::model::LoveNote;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for the love jar. Notes are kept in insertion order.
#[async_trait]
pub trait LoveJarRepository: Send + Sync {
    /// Appends a note to the jar.
    async fn add(&self, note: &LoveNote) -> Result<()>;

    /// Returns every note in the jar.
    async fn list_all(&self) -> Result<Vec<LoveNote>>;
}

//! Session repository trait.
//!
//! Defines the interface for hangman session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for hangman sessions, keyed by channel id.
///
/// This trait decouples the engine from the storage mechanism (JSON file,
/// in-memory map, database). Implementations must round-trip every field of
/// [`Session`] losslessly.
///
/// # Implementation Notes
///
/// The engine serializes `load → mutate → save` per channel itself, so
/// implementations only need each individual call to be atomic.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds the session stored for a channel.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: No session for this channel
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_channel(&self, channel_id: &str) -> Result<Option<Session>>;

    /// Saves a session, replacing whatever was stored for its channel.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes the session for a channel.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Session deleted successfully (or didn't exist)
    /// - `Err(_)`: Error occurred during deletion
    async fn delete(&self, channel_id: &str) -> Result<()>;

    /// Lists all stored sessions.
    async fn list_all(&self) -> Result<Vec<Session>>;
}

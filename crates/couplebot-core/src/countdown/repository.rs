//! Countdown repository trait.

use super::model::Countdown;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for countdowns, grouped by user id.
#[async_trait]
pub trait CountdownRepository: Send + Sync {
    /// Appends a countdown to the user's list.
    async fn add(&self, user_id: &str, countdown: &Countdown) -> Result<()>;

    /// The user's countdowns in the order they were added.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Countdown>>;

    /// Removes all of the user's countdowns. Returns `false` if there were none.
    async fn delete_for_user(&self, user_id: &str) -> Result<bool>;
}

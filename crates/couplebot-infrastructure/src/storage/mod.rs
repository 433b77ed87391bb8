//! Storage layer for atomic file operations.

mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};

use couplebot_core::error::{BotError, Result};

/// Runs blocking file I/O off the async runtime.
pub(crate) async fn run_blocking<R, F>(f: F) -> Result<R>
where
    F: FnOnce() -> std::result::Result<R, AtomicJsonError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BotError::internal(format!("Failed to join storage task: {}", e)))?
        .map_err(BotError::from)
}

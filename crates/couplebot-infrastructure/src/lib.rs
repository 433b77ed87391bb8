//! Infrastructure layer for couplebot.
//!
//! File-backed and in-memory implementations of the repository traits
//! defined in `couplebot-core`, plus config loading and path resolution.

pub mod config_service;
pub mod in_memory;
pub mod json_countdown_repository;
pub mod json_love_jar_repository;
pub mod json_session_repository;
pub mod json_shared_list_repository;
pub mod paths;
pub mod storage;

pub use config_service::{load_config, load_default_config, save_config};
pub use in_memory::{
    InMemoryCountdownRepository, InMemoryLoveJarRepository, InMemorySessionRepository,
    InMemorySharedListRepository,
};
pub use json_countdown_repository::JsonCountdownRepository;
pub use json_love_jar_repository::JsonLoveJarRepository;
pub use json_session_repository::JsonSessionRepository;
pub use json_shared_list_repository::JsonSharedListRepository;
pub use paths::BotPaths;

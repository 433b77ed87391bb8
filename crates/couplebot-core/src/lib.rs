//! Domain layer for couplebot: the hangman engine, couple features, and the
//! repository traits the infrastructure crate implements.

pub mod config;
pub mod countdown;
pub mod error;
pub mod fun;
pub mod hangman;
pub mod love_jar;
pub mod shared_list;
pub mod slash_command;

pub use error::{BotError, Result};

//! Application layer for couplebot.
//!
//! Maps chat commands onto the domain services in `couplebot-core` and
//! renders their results as replies.

pub mod command;
pub mod context;
pub mod dispatcher;
pub mod reply;

pub use command::{Command, CommandParseError, CountdownAction, ListAction};
pub use context::{CommandContext, Participant};
pub use dispatcher::Dispatcher;
pub use reply::Reply;

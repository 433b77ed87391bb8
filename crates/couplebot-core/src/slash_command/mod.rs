//! Builtin slash command catalog used for `/help` and input completion.

mod builtin;

pub use builtin::{builtin_commands, find_builtin_command, BuiltinSlashCommand};

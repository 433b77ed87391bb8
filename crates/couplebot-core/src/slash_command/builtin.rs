//! Builtin slash commands provided by the bot.
//!
//! The catalog is built once on first access and cached for the lifetime of
//! the process.

use serde::Serialize;
use std::sync::OnceLock;

/// A builtin slash command.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltinSlashCommand {
    /// Command name (without the leading /)
    pub name: &'static str,
    /// Usage format (e.g., "/help [command]")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional description of expected arguments
    pub args: Option<&'static str>,
}

impl BuiltinSlashCommand {
    /// Creates a new builtin slash command.
    pub const fn new(
        name: &'static str,
        usage: &'static str,
        description: &'static str,
        args: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            usage,
            description,
            args,
        }
    }
}

static BUILTIN_COMMANDS: OnceLock<Vec<BuiltinSlashCommand>> = OnceLock::new();

/// Returns all builtin slash commands.
pub fn builtin_commands() -> &'static [BuiltinSlashCommand] {
    BUILTIN_COMMANDS.get_or_init(|| {
        vec![
            BuiltinSlashCommand::new(
                "help",
                "/help [command]",
                "Show available commands and their usage",
                Some("Optional command name to show detailed help"),
            ),
            BuiltinSlashCommand::new(
                "hangman",
                "/hangman start <user> <phrase> | /hangman stop",
                "Start a game of Hangman for your partner, or stop the current one",
                Some("start: the guesser and the secret phrase (min 3 characters); stop: setter or admin only"),
            ),
            BuiltinSlashCommand::new(
                "guess",
                "/guess <letter>",
                "Guess a letter in the current Hangman game",
                Some("A single letter A-Z"),
            ),
            BuiltinSlashCommand::new(
                "lovenote",
                "/lovenote <note>",
                "Put a sweet note in the jar for your partner to find later",
                Some("The message to save"),
            ),
            BuiltinSlashCommand::new(
                "openjar",
                "/openjar",
                "Pull a random sweet note from the jar",
                None,
            ),
            BuiltinSlashCommand::new(
                "decide",
                "/decide <option>, <option>[, ...]",
                "Can't agree? Let the bot decide",
                Some("At least two options separated by commas"),
            ),
            BuiltinSlashCommand::new(
                "list",
                "/list <add|view|remove|clear> <name> [item]",
                "Manage shared lists (movies, groceries, date ideas)",
                Some("add/remove take an item; remove also accepts a 1-based number"),
            ),
            BuiltinSlashCommand::new(
                "countdown",
                "/countdown <set|check|delete> [YYYY-MM-DD] [title]",
                "Count the days until something special",
                Some("set: a future date and an optional title; check and delete take nothing"),
            ),
            BuiltinSlashCommand::new("joke", "/joke", "Tell a random inside joke", None),
            BuiltinSlashCommand::new("truth", "/truth", "Ask a random Truth question", None),
            BuiltinSlashCommand::new("dare", "/dare", "Give a random Dare task", None),
            BuiltinSlashCommand::new(
                "coinflip",
                "/coinflip",
                "Flip a coin for heads or tails",
                None,
            ),
            BuiltinSlashCommand::new(
                "hug",
                "/hug <user>",
                "Send someone a virtual hug",
                Some("The user to hug"),
            ),
            BuiltinSlashCommand::new(
                "kiss",
                "/kiss <user>",
                "Send someone a virtual kiss",
                Some("The user to kiss"),
            ),
        ]
    })
}

/// Find a builtin command by name.
pub fn find_builtin_command(name: &str) -> Option<&'static BuiltinSlashCommand> {
    let name = name.trim_start_matches('/');
    builtin_commands().iter().find(|cmd| cmd.name == name)
}

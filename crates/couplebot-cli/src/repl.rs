//! Local stand-in for the chat platform.
//!
//! Every line is sent to the dispatcher as the current user in the current
//! channel. A few REPL-only commands switch who is typing and where:
//!
//! - `/as <user>`: act as another user
//! - `/channel <id>`: move to another channel
//! - `/whoami`: show the current user and channel

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use couplebot_application::{CommandContext, Dispatcher, Participant};
use couplebot_core::config::BotConfig;
use couplebot_core::slash_command::builtin_commands;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

const LOCAL_COMMANDS: [&str; 3] = ["/as", "/channel", "/whoami"];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = builtin_commands()
            .iter()
            .map(|cmd| format!("/{}", cmd.name))
            .collect();
        commands.extend(LOCAL_COMMANDS.iter().map(|cmd| cmd.to_string()));
        commands.sort();
        Self { commands }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Who is typing, and where.
struct Seat {
    channel_id: String,
    user_id: String,
}

impl Seat {
    fn context(&self, config: &BotConfig) -> CommandContext {
        CommandContext::new(
            self.channel_id.clone(),
            Participant::new(self.user_id.clone(), self.user_id.clone()),
        )
        .with_admin(config.is_admin(&self.user_id))
    }

    fn prompt(&self) -> String {
        format!("{}@{}> ", self.user_id, self.channel_id)
    }
}

pub async fn run(
    dispatcher: Dispatcher,
    config: &BotConfig,
    channel_id: &str,
    user_id: &str,
) -> Result<()> {
    let mut seat = Seat {
        channel_id: channel_id.to_string(),
        user_id: user_id.to_string(),
    };

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== couplebot REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, '/as <user>' to switch user, or 'quit' to exit."
            .bright_black()
    );
    println!();

    loop {
        match rl.readline(&seat.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if handle_local_command(&mut seat, trimmed) {
                    continue;
                }

                let ctx = seat.context(config);
                let reply = dispatcher.dispatch_text(&ctx, trimmed).await;
                crate::render::print_reply(&reply);
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Handles REPL-only commands. Returns `false` if `line` is meant for the bot.
fn handle_local_command(seat: &mut Seat, line: &str) -> bool {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "/as" | "/channel" if arg.is_empty() => {
            println!("{}", format!("Usage: {} <name>", command).yellow());
        }
        "/as" => {
            seat.user_id = arg.to_string();
            println!("{}", format!("Now acting as {}", arg).bright_black());
        }
        "/channel" => {
            seat.channel_id = arg.to_string();
            println!("{}", format!("Moved to channel {}", arg).bright_black());
        }
        "/whoami" => {
            println!(
                "{}",
                format!("{} in channel {}", seat.user_id, seat.channel_id).bright_black()
            );
        }
        _ => return false,
    }
    true
}

//! Chat commands and their slash-text form.
//!
//! The chat platform hands the bot structured options; the CLI only has a
//! line of text. `Command::parse` turns that line into the same structure:
//!
//! ```text
//! /hangman start <user> <phrase...>
//! /hangman stop
//! /guess <letter>
//! /lovenote <note...>
//! /openjar
//! /decide <a>, <b>[, ...]
//! /list <add|view|remove|clear> <name> [item...]
//! /countdown <set|check|delete> [YYYY-MM-DD] [title...]
//! /joke | /truth | /dare | /coinflip
//! /hug <user> | /kiss <user>
//! /help [command]
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Add,
    View,
    Remove,
    Clear,
}

impl ListAction {
    fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "add" => Some(ListAction::Add),
            "view" => Some(ListAction::View),
            "remove" => Some(ListAction::Remove),
            "clear" => Some(ListAction::Clear),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownAction {
    Set,
    Check,
    Delete,
}

impl CountdownAction {
    fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "set" => Some(CountdownAction::Set),
            "check" => Some(CountdownAction::Check),
            "delete" => Some(CountdownAction::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `target` is the guesser's user id. `None` when the option was left out.
    HangmanStart {
        target: Option<String>,
        phrase: String,
    },
    HangmanStop,
    Guess {
        letter: String,
    },
    LoveNote {
        text: String,
    },
    OpenJar,
    /// Raw comma-separated options.
    Decide {
        options: String,
    },
    List {
        action: ListAction,
        name: String,
        item: Option<String>,
    },
    /// `date` and `title` only matter for `Set`.
    Countdown {
        action: CountdownAction,
        date: Option<String>,
        title: Option<String>,
    },
    Joke,
    Truth,
    Dare,
    CoinFlip,
    Hug {
        target: String,
    },
    Kiss {
        target: String,
    },
    Help {
        command: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("Commands start with '/'")]
    NotACommand,

    #[error("Unknown command: /{0}")]
    Unknown(String),

    #[error("Missing {argument} for /{command}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Unknown action '{action}' for /{command}")]
    InvalidAction {
        command: &'static str,
        action: String,
    },
}

impl CommandParseError {
    /// Name of the command whose usage should be shown, if known.
    pub fn command_name(&self) -> Option<&str> {
        match self {
            CommandParseError::NotACommand | CommandParseError::Unknown(_) => None,
            CommandParseError::MissingArgument { command, .. }
            | CommandParseError::InvalidAction { command, .. } => Some(*command),
        }
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

fn non_empty(input: &str) -> Option<String> {
    let input = input.trim();
    (!input.is_empty()).then(|| input.to_string())
}

fn required_user(input: &str, command: &'static str) -> Result<String, CommandParseError> {
    let (user, _) = split_word(input);
    non_empty(user).ok_or(CommandParseError::MissingArgument {
        command,
        argument: "user",
    })
}

impl Command {
    /// Slash name without arguments, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::HangmanStart { .. } => "hangman start",
            Command::HangmanStop => "hangman stop",
            Command::Guess { .. } => "guess",
            Command::LoveNote { .. } => "lovenote",
            Command::OpenJar => "openjar",
            Command::Decide { .. } => "decide",
            Command::List { .. } => "list",
            Command::Countdown { .. } => "countdown",
            Command::Joke => "joke",
            Command::Truth => "truth",
            Command::Dare => "dare",
            Command::CoinFlip => "coinflip",
            Command::Hug { .. } => "hug",
            Command::Kiss { .. } => "kiss",
            Command::Help { .. } => "help",
        }
    }

    pub fn parse(input: &str) -> Result<Self, CommandParseError> {
        let input = input
            .trim()
            .strip_prefix('/')
            .ok_or(CommandParseError::NotACommand)?;
        let (name, rest) = split_word(input);

        match name.to_ascii_lowercase().as_str() {
            "hangman" => {
                let (action, rest) = split_word(rest);
                match action.to_ascii_lowercase().as_str() {
                    "start" => {
                        let (target, phrase) = split_word(rest);
                        Ok(Command::HangmanStart {
                            target: non_empty(target),
                            phrase: phrase.to_string(),
                        })
                    }
                    "stop" => Ok(Command::HangmanStop),
                    "" => Err(CommandParseError::MissingArgument {
                        command: "hangman",
                        argument: "action (start or stop)",
                    }),
                    other => Err(CommandParseError::InvalidAction {
                        command: "hangman",
                        action: other.to_string(),
                    }),
                }
            }
            "guess" => Ok(Command::Guess {
                letter: non_empty(rest).ok_or(CommandParseError::MissingArgument {
                    command: "guess",
                    argument: "letter",
                })?,
            }),
            "lovenote" => Ok(Command::LoveNote {
                text: rest.trim().to_string(),
            }),
            "openjar" => Ok(Command::OpenJar),
            "decide" => Ok(Command::Decide {
                options: rest.to_string(),
            }),
            "list" => {
                let (action, rest) = split_word(rest);
                if action.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "list",
                        argument: "action (add, view, remove or clear)",
                    });
                }
                let action =
                    ListAction::parse(action).ok_or_else(|| CommandParseError::InvalidAction {
                        command: "list",
                        action: action.to_string(),
                    })?;
                let (name, item) = split_word(rest);
                if name.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "list",
                        argument: "list name",
                    });
                }
                Ok(Command::List {
                    action,
                    name: name.to_string(),
                    item: non_empty(item),
                })
            }
            "countdown" => {
                let (action, rest) = split_word(rest);
                if action.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "countdown",
                        argument: "action (set, check or delete)",
                    });
                }
                let action = CountdownAction::parse(action).ok_or_else(|| {
                    CommandParseError::InvalidAction {
                        command: "countdown",
                        action: action.to_string(),
                    }
                })?;
                let (date, title) = split_word(rest);
                Ok(Command::Countdown {
                    action,
                    date: non_empty(date),
                    title: non_empty(title),
                })
            }
            "joke" => Ok(Command::Joke),
            "truth" => Ok(Command::Truth),
            "dare" => Ok(Command::Dare),
            "coinflip" => Ok(Command::CoinFlip),
            "hug" => Ok(Command::Hug {
                target: required_user(rest, "hug")?,
            }),
            "kiss" => Ok(Command::Kiss {
                target: required_user(rest, "kiss")?,
            }),
            "help" => Ok(Command::Help {
                command: non_empty(rest),
            }),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

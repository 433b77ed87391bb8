//! Command dispatcher.
//!
//! Turns a [`Command`] issued in a channel into a [`Reply`]. All game rules
//! live in [`GuessingGameEngine`]; this layer resolves participants, renders
//! outcomes as chat text and cleans up finished rounds.

use crate::command::{Command, CountdownAction, ListAction};
use crate::context::{CommandContext, Participant};
use crate::reply::Reply;
use chrono::{Local, NaiveDate};
use couplebot_core::countdown::{
    Countdown, CountdownError, CountdownRepository, CountdownStatus, DEFAULT_TITLE,
};
use couplebot_core::fun::{Affection, FunContent};
use couplebot_core::hangman::{GameError, GameResult, GameView, GuessOutcome, GuessingGameEngine};
use couplebot_core::love_jar::{LoveJarRepository, LoveNote};
use couplebot_core::shared_list::{
    normalize_list_name, EditOutcome, ListEdit, RemoveOutcome, SharedListRepository,
};
use couplebot_core::slash_command::{builtin_commands, find_builtin_command};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

const GENERIC_FAILURE: &str = "Something went wrong on my side. Please try again in a moment.";
const DECIDE_USAGE: &str =
    "I need at least two options to decide! (e.g., `/decide Pizza, Sushi`)";
const NOTHING_TO_PICK: &str = "I'm all out of ideas! Add some under `[fun]` in config.toml.";

/// Users remembered for display names before old entries are dropped.
pub const DEFAULT_PARTICIPANT_CAPACITY: usize = 1024;

pub struct Dispatcher {
    engine: Arc<GuessingGameEngine>,
    love_jar: Arc<dyn LoveJarRepository>,
    lists: Arc<dyn SharedListRepository>,
    countdowns: Arc<dyn CountdownRepository>,
    fun: FunContent,
    /// Users seen so far, keyed by id. Used for display names and bot checks.
    /// Holds at most `participant_capacity` entries plus registered bots.
    participants: RwLock<HashMap<String, Participant>>,
    participant_capacity: usize,
    rng: Mutex<StdRng>,
    /// Overrides the local date for countdowns.
    fixed_date: Option<NaiveDate>,
}

impl Dispatcher {
    pub fn new(
        engine: Arc<GuessingGameEngine>,
        love_jar: Arc<dyn LoveJarRepository>,
        lists: Arc<dyn SharedListRepository>,
        countdowns: Arc<dyn CountdownRepository>,
    ) -> Self {
        Self {
            engine,
            love_jar,
            lists,
            countdowns,
            fun: FunContent::default(),
            participants: RwLock::new(HashMap::new()),
            participant_capacity: DEFAULT_PARTICIPANT_CAPACITY,
            rng: Mutex::new(StdRng::from_entropy()),
            fixed_date: None,
        }
    }

    /// Replaces the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_fun_content(mut self, fun: FunContent) -> Self {
        self.fun = fun;
        self
    }

    /// Treats `date` as today when counting down.
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    pub fn with_participant_capacity(mut self, capacity: usize) -> Self {
        self.participant_capacity = capacity;
        self
    }

    pub fn engine(&self) -> &GuessingGameEngine {
        &self.engine
    }

    /// Makes a user known before they have sent anything, e.g. the bot itself.
    ///
    /// When the directory is full a non-bot entry makes room. Bots are never
    /// dropped, so they stay excluded from games. A dropped user just shows up
    /// under their id until they send something again.
    pub async fn register_participant(&self, participant: Participant) {
        let mut participants = self.participants.write().await;
        if !participants.contains_key(&participant.id)
            && participants.len() >= self.participant_capacity
        {
            let evicted = participants
                .iter()
                .find(|(_, known)| !known.is_bot)
                .map(|(id, _)| id.clone());
            if let Some(id) = evicted {
                participants.remove(&id);
            }
        }
        participants.insert(participant.id.clone(), participant);
    }

    pub async fn known_participants(&self) -> usize {
        self.participants.read().await.len()
    }

    /// Looks up a user by id. Unknown ids are treated as people named after their id.
    pub async fn participant(&self, id: &str) -> Participant {
        self.participants
            .read()
            .await
            .get(id)
            .cloned()
            .unwrap_or_else(|| Participant::new(id, id))
    }

    async fn display_name(&self, id: &str) -> String {
        self.participant(id).await.display_name
    }

    /// Parses `input` as slash text and dispatches it.
    pub async fn dispatch_text(&self, ctx: &CommandContext, input: &str) -> Reply {
        match Command::parse(input) {
            Ok(command) => self.dispatch(ctx, command).await,
            Err(err) => {
                let hint = match err.command_name().and_then(find_builtin_command) {
                    Some(cmd) => format!("Usage: `{}`", cmd.usage),
                    None => "Try `/help`.".to_string(),
                };
                Reply::ephemeral(format!("{}\n{}", err, hint))
            }
        }
    }

    /// Runs `command` on behalf of `ctx.user`.
    ///
    /// Never fails: rule violations become ephemeral replies, storage failures
    /// are logged and reported generically.
    pub async fn dispatch(&self, ctx: &CommandContext, command: Command) -> Reply {
        self.register_participant(ctx.user.clone()).await;
        tracing::debug!(
            channel_id = %ctx.channel_id,
            user_id = %ctx.user.id,
            command = command.name(),
            "dispatching command"
        );

        let result = match command {
            Command::HangmanStart { target, phrase } => {
                self.start_hangman(ctx, target, &phrase).await
            }
            Command::HangmanStop => self.stop_hangman(ctx).await,
            Command::Guess { letter } => self.guess(ctx, &letter).await,
            Command::LoveNote { text } => self.add_love_note(ctx, &text).await,
            Command::OpenJar => self.open_jar().await,
            Command::Decide { options } => Ok(self.decide(&options).await),
            Command::List { action, name, item } => self.manage_list(action, &name, item).await,
            Command::Countdown {
                action,
                date,
                title,
            } => self.countdown(ctx, action, date, title).await,
            Command::Joke => {
                Ok(self.random_line("✨ **Just Between Us...**", &self.fun.jokes, false).await)
            }
            Command::Truth => Ok(self.random_line("🔮 **Truth**", &self.fun.truths, true).await),
            Command::Dare => Ok(self.random_line("🔥 **Dare**", &self.fun.dares, true).await),
            Command::CoinFlip => Ok(self.coin_flip(ctx).await),
            Command::Hug { target } => Ok(self.affection(ctx, Affection::Hug, &target).await),
            Command::Kiss { target } => Ok(self.affection(ctx, Affection::Kiss, &target).await),
            Command::Help { command } => Ok(help_reply(command.as_deref())),
        };

        result.unwrap_or_else(|err| error_reply(ctx, err))
    }

    async fn start_hangman(
        &self,
        ctx: &CommandContext,
        target: Option<String>,
        phrase: &str,
    ) -> GameResult<Reply> {
        let target = match target {
            Some(id) => self.participant(&id).await,
            None => return Err(GameError::invalid_target("no guesser was given")),
        };
        if target.is_bot {
            return Err(GameError::invalid_target("bots can't play"));
        }

        let session = self
            .engine
            .start_session(&ctx.channel_id, &ctx.user.id, &target.id, phrase)
            .await?;

        let view = GameView::from_session(&session, &ctx.user.display_name, &target.display_name);
        Ok(Reply::public(format!(
            "🎉 **Hangman Game Started!** 🎉\n\
             {} has set a secret phrase (an inside joke?) for {} to guess!\n\
             **Guesser:** {}. Guess a letter with `/guess <letter>`!",
            ctx.user.display_name, target.display_name, target.display_name
        ))
        .with_view(view))
    }

    async fn stop_hangman(&self, ctx: &CommandContext) -> GameResult<Reply> {
        let session = self
            .engine
            .stop_session(&ctx.channel_id, &ctx.user.id, ctx.is_admin)
            .await?;

        let setter = self.display_name(&session.setter_id).await;
        let guesser = self.display_name(&session.guesser_id).await;
        let view = GameView::from_session(&session, &setter, &guesser);
        self.finish_round(&ctx.channel_id).await;

        Ok(Reply::public(format!(
            "🛑 **Game Stopped!** 🛑\n{} ended the game. The secret phrase was: **{}**",
            ctx.user.display_name, session.word
        ))
        .with_view(view))
    }

    async fn guess(&self, ctx: &CommandContext, letter: &str) -> GameResult<Reply> {
        let result = self
            .engine
            .guess_letter(&ctx.channel_id, &ctx.user.id, letter)
            .await?;

        let guesser = &ctx.user.display_name;
        let setter = self.display_name(&result.session.setter_id).await;
        let view = GameView::from_session(&result.session, &setter, guesser);

        let reply = match &result.outcome {
            GuessOutcome::Correct { letter } => Reply::public(format!(
                "{guesser}, ✅ **Correct!** The letter **{letter}** is in the phrase."
            )),
            GuessOutcome::Incorrect {
                mistakes,
                max_mistakes,
                ..
            } => Reply::public(format!(
                "{guesser}, ❌ **Wrong!** Mistake {mistakes}/{max_mistakes}."
            )),
            GuessOutcome::Won { word } => Reply::public(format!(
                "🎉 **SOLVED!** {guesser} nailed the phrase! It was **{word}**."
            )),
            GuessOutcome::Lost { word, mistakes } => Reply::public(format!(
                "💀 **GAME OVER!** Mistake {mistakes}. You lost the round. The word was **{word}**."
            )),
            GuessOutcome::AlreadyGuessed { letter, in_word } => {
                let verdict = if *in_word { "it's in" } else { "it's not in" };
                Reply::ephemeral(format!(
                    "You already guessed **{letter}**, {verdict} the phrase."
                ))
            }
        }
        .with_view(view);

        if result.is_terminal() {
            self.finish_round(&ctx.channel_id).await;
        }
        Ok(reply)
    }

    /// Deletes a terminal session once its final board has been rendered.
    async fn finish_round(&self, channel_id: &str) {
        if let Err(err) = self.engine.finish_session(channel_id).await {
            tracing::warn!(channel_id, error = %err, "finished session was not removed");
        }
    }

    async fn add_love_note(&self, ctx: &CommandContext, text: &str) -> GameResult<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Reply::ephemeral(
                "Write something sweet first! (e.g., `/lovenote You make every day better`)",
            ));
        }

        self.love_jar
            .add(&LoveNote::new(ctx.user.display_name.clone(), text))
            .await?;
        tracing::info!(user_id = %ctx.user.id, "love note added");

        Ok(Reply::ephemeral(
            "💌 **Note added to the Love Jar!** Your partner can find it later.",
        ))
    }

    async fn open_jar(&self) -> GameResult<Reply> {
        let notes = self.love_jar.list_all().await?;
        let note = {
            let mut rng = self.rng.lock().await;
            notes.choose(&mut *rng).cloned()
        };

        Ok(match note {
            Some(note) => Reply::public(format!(
                "💌 **A Note from the Jar**\n**\"{}\"**\n\n— *Left by {}*",
                note.text, note.author
            )),
            None => Reply::ephemeral(
                "The jar is empty! Time to write some notes for each other. 📝",
            ),
        })
    }

    async fn decide(&self, options: &str) -> Reply {
        let choices: Vec<&str> = options
            .split(',')
            .map(str::trim)
            .filter(|choice| !choice.is_empty())
            .collect();
        if choices.len() < 2 {
            return Reply::ephemeral(DECIDE_USAGE);
        }

        let winner = {
            let mut rng = self.rng.lock().await;
            choices.choose(&mut *rng).copied()
        };
        match winner {
            Some(winner) => Reply::public(format!(
                "🤔 **The Decision Is...**\n**Options:** {}\n**Winner:** ✨ **{}** ✨",
                choices.join(", "),
                winner
            )),
            None => Reply::ephemeral(DECIDE_USAGE),
        }
    }

    async fn manage_list(
        &self,
        action: ListAction,
        name: &str,
        item: Option<String>,
    ) -> GameResult<Reply> {
        let name = normalize_list_name(name);

        match action {
            ListAction::Add => {
                let Some(item) = item else {
                    return Ok(Reply::ephemeral("You need to type the item you want to add!"));
                };
                self.lists.edit(&name, ListEdit::Add(item.clone())).await?;
                Ok(Reply::public(format!(
                    "✅ Added **{item}** to the **{name}** list!"
                )))
            }
            ListAction::View => match self.lists.find_by_name(&name).await? {
                Some(list) if !list.is_empty() => Ok(Reply::public(format!(
                    "📝 **{} List**\n{}",
                    capitalize(&name),
                    list.numbered_lines().join("\n")
                ))),
                _ => Ok(Reply::ephemeral(format!(
                    "The **{name}** list is currently empty."
                ))),
            },
            ListAction::Remove => {
                let Some(item) = item else {
                    let has_items = self
                        .lists
                        .find_by_name(&name)
                        .await?
                        .is_some_and(|list| !list.is_empty());
                    return Ok(if has_items {
                        Reply::ephemeral("You need to type the item (or its number) to remove!")
                    } else {
                        empty_list_reply(&name)
                    });
                };
                match self.lists.edit(&name, ListEdit::Remove(item.clone())).await? {
                    EditOutcome::Removal(RemoveOutcome::Removed(removed)) => Ok(Reply::public(
                        format!("🗑️ Removed **{removed}** from **{name}**."),
                    )),
                    EditOutcome::Removal(RemoveOutcome::InvalidIndex) => {
                        Ok(Reply::ephemeral("Invalid number."))
                    }
                    EditOutcome::Removal(RemoveOutcome::NotFound) => Ok(Reply::ephemeral(
                        format!("Couldn't find **{item}** in the list."),
                    )),
                    _ => Ok(empty_list_reply(&name)),
                }
            }
            ListAction::Clear => match self.lists.edit(&name, ListEdit::Clear).await? {
                EditOutcome::NoSuchList => Ok(Reply::ephemeral("That list doesn't exist yet.")),
                _ => Ok(Reply::ephemeral(format!(
                    "💥 Cleared the entire **{name}** list."
                ))),
            },
        }
    }

    fn today(&self) -> NaiveDate {
        self.fixed_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    async fn countdown(
        &self,
        ctx: &CommandContext,
        action: CountdownAction,
        date: Option<String>,
        title: Option<String>,
    ) -> GameResult<Reply> {
        let today = self.today();
        match action {
            CountdownAction::Set => {
                let Some(date) = date else {
                    return Ok(Reply::ephemeral(
                        "Please provide a date in YYYY-MM-DD format!",
                    ));
                };
                let title = title.as_deref().unwrap_or(DEFAULT_TITLE);
                let countdown = match Countdown::new(title, &date, today) {
                    Ok(countdown) => countdown,
                    Err(CountdownError::InvalidDate { .. }) => {
                        return Ok(Reply::ephemeral(
                            "Invalid date format! Please use **YYYY-MM-DD** (e.g., 2025-12-25).",
                        ));
                    }
                    Err(CountdownError::InPast { .. }) => {
                        return Ok(Reply::ephemeral(
                            "That date is in the past! Unless you have a time machine? 🕰️",
                        ));
                    }
                };

                self.countdowns.add(&ctx.user.id, &countdown).await?;
                tracing::info!(user_id = %ctx.user.id, date = %countdown.date, "countdown set");
                Ok(Reply::public(format!(
                    "✅ Countdown set for **{}** on **{}**!",
                    countdown.title, countdown.date
                )))
            }
            CountdownAction::Check => {
                let countdowns = self.countdowns.list_for_user(&ctx.user.id).await?;
                if countdowns.is_empty() {
                    return Ok(Reply::ephemeral(
                        "You haven't set any countdowns yet! Use `/countdown set <YYYY-MM-DD> [title]`.",
                    ));
                }

                let lines: Vec<String> = countdowns
                    .iter()
                    .filter_map(|countdown| {
                        let title = &countdown.title;
                        Some(match countdown.status(today)? {
                            CountdownStatus::Upcoming { days } => {
                                format!("{title}: **{days}** days remaining")
                            }
                            CountdownStatus::Today => format!("🎉 {title} 🎉: **IT IS TODAY!**"),
                            CountdownStatus::Passed { days } => {
                                format!("~~{title}~~: Passed {days} days ago")
                            }
                        })
                    })
                    .collect();
                Ok(Reply::public(format!(
                    "📅 **Your Countdowns**\n{}",
                    lines.join("\n")
                )))
            }
            CountdownAction::Delete => {
                if self.countdowns.delete_for_user(&ctx.user.id).await? {
                    Ok(Reply::ephemeral("🗑️ All your countdowns have been deleted."))
                } else {
                    Ok(Reply::ephemeral("You don't have any countdowns to delete."))
                }
            }
        }
    }

    async fn random_line(&self, heading: &str, pool: &[String], emphasize: bool) -> Reply {
        let line = {
            let mut rng = self.rng.lock().await;
            pool.choose(&mut *rng)
        };
        match line {
            Some(line) if emphasize => Reply::public(format!("{heading}\n**{line}**")),
            Some(line) => Reply::public(format!("{heading}\n{line}")),
            None => Reply::ephemeral(NOTHING_TO_PICK),
        }
    }

    async fn coin_flip(&self, ctx: &CommandContext) -> Reply {
        let heads = self.rng.lock().await.gen_bool(0.5);
        let (side, emoji) = if heads { ("Heads", "👑") } else { ("Tails", "🐍") };
        Reply::public(format!(
            "🪙 **{} flipped the coin!** 🪙\nThe coin spins and lands on... **{side}**! {emoji}",
            ctx.user.display_name
        ))
    }

    async fn affection(&self, ctx: &CommandContext, kind: Affection, target: &str) -> Reply {
        if target == ctx.user.id {
            return Reply::ephemeral(kind.self_target_message());
        }

        let receiver = self.display_name(target).await;
        let image = {
            let mut rng = self.rng.lock().await;
            kind.images().choose(&mut *rng).copied()
        };
        let reply = Reply::public(format!(
            "{}\n{}",
            kind.title(),
            kind.describe(&ctx.user.display_name, &receiver)
        ));
        match image {
            Some(url) => reply.with_image(url),
            None => reply,
        }
    }
}

fn empty_list_reply(name: &str) -> Reply {
    Reply::ephemeral(format!(
        "The **{name}** list is empty, nothing to remove."
    ))
}

fn error_reply(ctx: &CommandContext, err: GameError) -> Reply {
    let message = match &err {
        GameError::Storage(e) => {
            tracing::error!(channel_id = %ctx.channel_id, error = %e, "storage failure");
            GENERIC_FAILURE.to_string()
        }
        GameError::OutOfRange { .. } => {
            tracing::error!(channel_id = %ctx.channel_id, error = %err, "corrupt session state");
            GENERIC_FAILURE.to_string()
        }
        GameError::GameAlreadyActive { .. } => {
            "A Hangman game is already active in this channel! Use `/hangman stop` to end it."
                .to_string()
        }
        GameError::InvalidTargetUser { reason } => {
            format!("Please select a valid user (your partner!) to be the guesser: {reason}.")
        }
        GameError::InvalidPhrase { min_len } => format!(
            "You must provide a secret phrase (min {min_len} letters). Make it an inside joke!"
        ),
        GameError::NoActiveGame { .. } => {
            "There is no active Hangman game in this channel.".to_string()
        }
        GameError::GameNotActive { status } => format!("The game is already {status}!"),
        GameError::WrongTurn { .. } => {
            "❌ It's not your turn to guess, or you are not the designated guesser!".to_string()
        }
        GameError::Unauthorized { .. } => {
            "Only the person who set the word can stop the game!".to_string()
        }
        GameError::InvalidInput { .. } => "Guess a single letter from A to Z.".to_string(),
    };
    Reply::ephemeral(message)
}

fn help_reply(command: Option<&str>) -> Reply {
    let Some(name) = command else {
        let lines: Vec<String> = builtin_commands()
            .iter()
            .map(|cmd| format!("`{}` - {}", cmd.usage, cmd.description))
            .collect();
        return Reply::ephemeral(format!("**Commands**\n{}", lines.join("\n")));
    };

    match find_builtin_command(name) {
        Some(cmd) => {
            let mut text = format!("`{}`\n{}", cmd.usage, cmd.description);
            if let Some(args) = cmd.args {
                text.push_str(&format!("\nArguments: {}", args));
            }
            Reply::ephemeral(text)
        }
        None => Reply::ephemeral(format!(
            "Unknown command `/{}`. Try `/help`.",
            name.trim_start_matches('/')
        )),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

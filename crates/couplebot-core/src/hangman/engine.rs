use super::error::{GameError, GameResult};
use super::model::{normalize_phrase, GameStatus, Session};
use super::repository::SessionRepository;
use crate::config::HangmanSettings;
use crate::error::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What a single guess did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the phrase; the round continues.
    Correct { letter: char },
    /// The letter is not in the phrase; the round continues.
    Incorrect {
        letter: char,
        mistakes: u32,
        max_mistakes: u32,
    },
    /// The letter completed the phrase.
    Won { word: String },
    /// The letter used up the last allowed mistake.
    Lost { word: String, mistakes: u32 },
    /// The letter was guessed before; nothing changed.
    AlreadyGuessed { letter: char, in_word: bool },
}

impl GuessOutcome {
    /// `Won` and `Lost` end the round; the caller deletes the session after rendering.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GuessOutcome::Won { .. } | GuessOutcome::Lost { .. })
    }
}

/// Result descriptor returned by [`GuessingGameEngine::guess_letter`].
#[derive(Debug, Clone, PartialEq)]
pub struct GuessResult {
    pub outcome: GuessOutcome,
    /// Session state after the guess was applied and persisted.
    pub session: Session,
}

impl GuessResult {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}

/// Owns hangman session mutation.
///
/// `GuessingGameEngine` is responsible for:
/// - Validating and starting rounds
/// - Applying guesses and detecting win/loss
/// - Enforcing who may guess and who may stop
/// - Persisting every change through the [`SessionRepository`]
///
/// Each operation holds a per-channel lock across `load → mutate → save`, so
/// two concurrent guesses in one channel can never both read the same
/// mistake count. A channel's lock entry is dropped again once no operation
/// holds or waits on it.
pub struct GuessingGameEngine {
    repository: Arc<dyn SessionRepository>,
    settings: HangmanSettings,
    channel_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl GuessingGameEngine {
    /// Creates an engine with default settings (6 mistakes, 3-character phrases).
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            settings: HangmanSettings::default(),
            channel_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an engine with custom rules.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Config` if `settings` allow zero mistakes or an
    /// empty phrase.
    pub fn with_settings(
        repository: Arc<dyn SessionRepository>,
        settings: HangmanSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::new(repository)
        })
    }

    pub fn settings(&self) -> &HangmanSettings {
        &self.settings
    }

    async fn channel_lock(&self, channel_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.channel_locks.lock().await;
        locks
            .entry(channel_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the entry for `channel_id` unless another call still holds a
    /// handle to it. Handles are only cloned under the registry lock, so the
    /// count cannot grow while it is checked.
    async fn release_channel_lock(&self, channel_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.channel_locks.lock().await;
        let is_current = locks
            .get(channel_id)
            .is_some_and(|current| Arc::ptr_eq(current, &lock));
        if is_current && Arc::strong_count(&lock) == 2 {
            locks.remove(channel_id);
        }
    }

    /// Runs `op` while holding the lock for `channel_id`.
    ///
    /// `op` is not polled before the lock is taken.
    async fn serialized<T>(&self, channel_id: &str, op: impl Future<Output = T>) -> T {
        let lock = self.channel_lock(channel_id).await;
        let output = {
            let _guard = lock.lock().await;
            op.await
        };
        self.release_channel_lock(channel_id, lock).await;
        output
    }

    /// Number of channels that currently have a lock entry.
    pub async fn tracked_channels(&self) -> usize {
        self.channel_locks.lock().await.len()
    }

    /// Returns the stored session for a channel, if any.
    pub async fn session(&self, channel_id: &str) -> GameResult<Option<Session>> {
        Ok(self.repository.find_by_channel(channel_id).await?)
    }

    /// Starts a new round in `channel_id`.
    ///
    /// A finished session left in the store is replaced. The returned session
    /// contains the secret word; callers must keep it away from the guesser.
    ///
    /// # Errors
    ///
    /// - `GameAlreadyActive` if the channel already has an active round
    /// - `InvalidTargetUser` if setter and guesser are the same user
    /// - `InvalidPhrase` if the normalized phrase is too short
    /// - `Storage` if the repository fails
    pub async fn start_session(
        &self,
        channel_id: &str,
        setter_id: &str,
        guesser_id: &str,
        raw_phrase: &str,
    ) -> GameResult<Session> {
        self.serialized(
            channel_id,
            self.start_locked(channel_id, setter_id, guesser_id, raw_phrase),
        )
        .await
    }

    async fn start_locked(
        &self,
        channel_id: &str,
        setter_id: &str,
        guesser_id: &str,
        raw_phrase: &str,
    ) -> GameResult<Session> {
        if let Some(existing) = self.repository.find_by_channel(channel_id).await? {
            if existing.is_active() {
                tracing::warn!(channel_id, "start rejected: game already active");
                return Err(GameError::GameAlreadyActive {
                    channel_id: channel_id.to_string(),
                });
            }
        }

        if setter_id == guesser_id {
            return Err(GameError::invalid_target(
                "the setter cannot guess their own phrase",
            ));
        }

        let word = normalize_phrase(raw_phrase);
        if word.chars().count() < self.settings.min_phrase_len {
            return Err(GameError::InvalidPhrase {
                min_len: self.settings.min_phrase_len,
            });
        }

        let session = Session::new(
            channel_id,
            setter_id,
            guesser_id,
            word,
            self.settings.max_mistakes,
        );
        self.repository.save(&session).await?;

        tracing::info!(
            channel_id,
            setter_id,
            guesser_id,
            letters = session.distinct_letter_count(),
            "hangman session started"
        );
        Ok(session)
    }

    /// Applies a single-letter guess from `guesser_id`.
    ///
    /// Re-guessing a letter is a no-op reported as `AlreadyGuessed`. The
    /// session is saved after every accepted call, changed or not.
    ///
    /// # Errors
    ///
    /// - `NoActiveGame` if the channel has no session
    /// - `GameNotActive` if the session already finished
    /// - `WrongTurn` if `guesser_id` is not the designated guesser
    /// - `InvalidInput` if `letter` is not exactly one ASCII letter
    /// - `Storage` if the repository fails
    pub async fn guess_letter(
        &self,
        channel_id: &str,
        guesser_id: &str,
        letter: &str,
    ) -> GameResult<GuessResult> {
        self.serialized(channel_id, self.guess_locked(channel_id, guesser_id, letter))
            .await
    }

    async fn guess_locked(
        &self,
        channel_id: &str,
        guesser_id: &str,
        letter: &str,
    ) -> GameResult<GuessResult> {
        let mut session = self
            .repository
            .find_by_channel(channel_id)
            .await?
            .ok_or_else(|| GameError::NoActiveGame {
                channel_id: channel_id.to_string(),
            })?;

        if !session.is_active() {
            return Err(GameError::GameNotActive {
                status: session.status,
            });
        }

        if session.guesser_id != guesser_id {
            tracing::warn!(channel_id, user_id = guesser_id, "guess rejected: wrong turn");
            return Err(GameError::WrongTurn {
                user_id: guesser_id.to_string(),
            });
        }

        let letter = parse_letter(letter)?;
        let outcome = apply_guess(&mut session, letter);

        session.touch();
        self.repository.save(&session).await?;

        tracing::debug!(
            channel_id,
            mistakes = session.mistakes,
            guessed = session.guessed_letters.len(),
            "guess applied"
        );
        match &outcome {
            GuessOutcome::Won { .. } => tracing::info!(channel_id, "hangman session won"),
            GuessOutcome::Lost { mistakes, .. } => {
                tracing::info!(channel_id, mistakes, "hangman session lost")
            }
            _ => {}
        }

        Ok(GuessResult { outcome, session })
    }

    /// Stops the active round in `channel_id`.
    ///
    /// Only the setter or an administrator may stop a round. The returned
    /// session has status `Stopped` and may be revealed.
    pub async fn stop_session(
        &self,
        channel_id: &str,
        requester_id: &str,
        requester_is_admin: bool,
    ) -> GameResult<Session> {
        self.serialized(
            channel_id,
            self.stop_locked(channel_id, requester_id, requester_is_admin),
        )
        .await
    }

    async fn stop_locked(
        &self,
        channel_id: &str,
        requester_id: &str,
        requester_is_admin: bool,
    ) -> GameResult<Session> {
        let mut session = match self.repository.find_by_channel(channel_id).await? {
            Some(session) if session.is_active() => session,
            _ => {
                return Err(GameError::NoActiveGame {
                    channel_id: channel_id.to_string(),
                });
            }
        };

        if session.setter_id != requester_id && !requester_is_admin {
            tracing::warn!(channel_id, user_id = requester_id, "stop rejected: unauthorized");
            return Err(GameError::Unauthorized {
                user_id: requester_id.to_string(),
            });
        }

        session.status = GameStatus::Stopped;
        session.touch();
        self.repository.save(&session).await?;

        tracing::info!(channel_id, requester_id, "hangman session stopped");
        Ok(session)
    }

    /// Removes a finished session once its final state has been rendered.
    ///
    /// Missing sessions are ignored; an active session is never deleted here.
    pub async fn finish_session(&self, channel_id: &str) -> GameResult<()> {
        self.serialized(channel_id, self.finish_locked(channel_id)).await
    }

    async fn finish_locked(&self, channel_id: &str) -> GameResult<()> {
        match self.repository.find_by_channel(channel_id).await? {
            None => Ok(()),
            Some(session) if session.is_active() => Err(GameError::GameAlreadyActive {
                channel_id: channel_id.to_string(),
            }),
            Some(session) => {
                self.repository.delete(channel_id).await?;
                tracing::info!(channel_id, status = %session.status, "hangman session deleted");
                Ok(())
            }
        }
    }
}

fn parse_letter(input: &str) -> GameResult<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(GameError::InvalidInput {
            input: input.to_string(),
        }),
    }
}

fn apply_guess(session: &mut Session, letter: char) -> GuessOutcome {
    if session.has_guessed(letter) {
        return GuessOutcome::AlreadyGuessed {
            letter,
            in_word: session.contains_letter(letter),
        };
    }

    session.guessed_letters.insert(letter);

    if session.contains_letter(letter) {
        if session.is_solved() {
            session.status = GameStatus::Won;
            return GuessOutcome::Won {
                word: session.word.clone(),
            };
        }
        return GuessOutcome::Correct { letter };
    }

    session.mistakes += 1;
    if session.mistakes >= session.max_mistakes {
        session.status = GameStatus::Lost;
        GuessOutcome::Lost {
            word: session.word.clone(),
            mistakes: session.mistakes,
        }
    } else {
        GuessOutcome::Incorrect {
            letter,
            mistakes: session.mistakes,
            max_mistakes: session.max_mistakes,
        }
    }
}

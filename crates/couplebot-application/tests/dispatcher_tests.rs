use async_trait::async_trait;
use chrono::NaiveDate;
use couplebot_application::{
    Command, CommandContext, CountdownAction, Dispatcher, ListAction, Participant,
};
use couplebot_core::error::{BotError, Result};
use couplebot_core::hangman::{GameStatus, GuessingGameEngine, KeyStyle, ViewTone};
use couplebot_core::love_jar::{LoveJarRepository, LoveNote};
use couplebot_core::fun::FunContent;
use couplebot_infrastructure::{
    InMemoryCountdownRepository, InMemoryLoveJarRepository, InMemorySessionRepository,
    InMemorySharedListRepository, JsonCountdownRepository, JsonLoveJarRepository,
    JsonSessionRepository, JsonSharedListRepository,
};
use std::sync::Arc;
use tempfile::TempDir;

const CHANNEL: &str = "chan-1";

fn alice() -> Participant {
    Participant::new("1001", "Alice")
}

fn bob() -> Participant {
    Participant::new("1002", "Bob")
}

fn ctx(user: Participant) -> CommandContext {
    CommandContext::new(CHANNEL, user)
}

fn in_memory_dispatcher() -> Dispatcher {
    let engine = Arc::new(GuessingGameEngine::new(Arc::new(
        InMemorySessionRepository::new(),
    )));
    Dispatcher::new(
        engine,
        Arc::new(InMemoryLoveJarRepository::new()),
        Arc::new(InMemorySharedListRepository::new()),
        Arc::new(InMemoryCountdownRepository::new()),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup() -> Dispatcher {
    let dispatcher = in_memory_dispatcher()
        .with_seed(7)
        .with_fixed_date(date(2025, 6, 1));
    dispatcher.register_participant(bob()).await;
    dispatcher
        .register_participant(Participant::bot("9999", "couplebot"))
        .await;
    dispatcher
}

// Love jar whose writes always fail
struct BrokenLoveJar;

#[async_trait]
impl LoveJarRepository for BrokenLoveJar {
    async fn add(&self, _note: &LoveNote) -> Result<()> {
        Err(BotError::io("disk full"))
    }

    async fn list_all(&self) -> Result<Vec<LoveNote>> {
        Err(BotError::io("disk full"))
    }
}

#[tokio::test]
async fn test_full_hangman_round() {
    let dispatcher = setup().await;

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1002 Hi Bob")
        .await;
    assert!(!reply.ephemeral);
    assert!(reply.content.contains("Hangman Game Started!"));
    assert!(!reply.content.contains("HI BOB"));
    let view = reply.view.unwrap();
    assert_eq!(view.title, "Hangman: set by Alice");
    assert_eq!(view.mask, "_ _   _ _ _");
    assert!(view.footer.starts_with("Turn: Bob"));

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess h").await;
    assert_eq!(reply.content, "Bob, ✅ **Correct!** The letter **H** is in the phrase.");

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess x").await;
    assert_eq!(reply.content, "Bob, ❌ **Wrong!** Mistake 1/6.");
    let view = reply.view.unwrap();
    assert_eq!(view.mistakes_label, "Mistakes: 1/6");
    let x = view.keys().find(|k| k.letter == 'X').unwrap();
    assert_eq!(x.style, KeyStyle::Miss);
    assert!(x.disabled);

    for letter in ["i", "b"] {
        dispatcher.dispatch_text(&ctx(bob()), &format!("/guess {letter}")).await;
    }
    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess o").await;
    assert_eq!(
        reply.content,
        "🎉 **SOLVED!** Bob nailed the phrase! It was **HI BOB**."
    );
    let view = reply.view.unwrap();
    assert_eq!(view.tone, ViewTone::Success);
    assert!(view.keys().all(|k| k.disabled));

    // Finished rounds are removed, so a new one can start right away.
    assert!(dispatcher.engine().session(CHANNEL).await.unwrap().is_none());
    let reply = dispatcher
        .dispatch_text(&ctx(bob()), "/hangman start 1001 pancakes")
        .await;
    assert!(!reply.ephemeral);
}

#[tokio::test]
async fn test_losing_round_reveals_word() {
    let dispatcher = setup().await;
    dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1002 cat")
        .await;

    for letter in ["b", "d", "e", "f", "g"] {
        dispatcher.dispatch_text(&ctx(bob()), &format!("/guess {letter}")).await;
    }
    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess h").await;
    assert_eq!(
        reply.content,
        "💀 **GAME OVER!** Mistake 6. You lost the round. The word was **CAT**."
    );
    let view = reply.view.unwrap();
    assert_eq!(view.title, "Hangman game over");
    assert!(view.footer.ends_with("Word was: CAT"));
    assert!(dispatcher.engine().session(CHANNEL).await.unwrap().is_none());

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess a").await;
    assert!(reply.ephemeral);
    assert_eq!(reply.content, "There is no active Hangman game in this channel.");
}

#[tokio::test]
async fn test_start_rejections() {
    let dispatcher = setup().await;

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/hangman start").await;
    assert!(reply.ephemeral);
    assert!(reply.content.contains("no guesser was given"));

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 9999 robots")
        .await;
    assert!(reply.content.contains("bots can't play"));

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1001 myself")
        .await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("Please select a valid user"));

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1002 a1")
        .await;
    assert_eq!(
        reply.content,
        "You must provide a secret phrase (min 3 letters). Make it an inside joke!"
    );

    dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1002 secret")
        .await;
    let reply = dispatcher
        .dispatch_text(&ctx(bob()), "/hangman start 1001 another")
        .await;
    assert!(reply.content.starts_with("A Hangman game is already active"));
}

#[tokio::test]
async fn test_guess_rejections() {
    let dispatcher = setup().await;
    dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1002 secret")
        .await;

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/guess e").await;
    assert!(reply.ephemeral);
    assert!(reply.content.contains("not your turn"));

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess 7").await;
    assert_eq!(reply.content, "Guess a single letter from A to Z.");

    dispatcher.dispatch_text(&ctx(bob()), "/guess e").await;
    let reply = dispatcher.dispatch_text(&ctx(bob()), "/guess E").await;
    assert!(reply.ephemeral);
    assert_eq!(reply.content, "You already guessed **E**, it's in the phrase.");

    let session = dispatcher.engine().session(CHANNEL).await.unwrap().unwrap();
    assert_eq!(session.mistakes, 0);
    assert_eq!(session.status, GameStatus::Active);
}

#[tokio::test]
async fn test_stop_authorization() {
    let dispatcher = setup().await;
    dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 1002 secret")
        .await;

    let reply = dispatcher.dispatch(&ctx(bob()), Command::HangmanStop).await;
    assert_eq!(
        reply.content,
        "Only the person who set the word can stop the game!"
    );

    let admin = ctx(Participant::new("1003", "Mod")).with_admin(true);
    let reply = dispatcher.dispatch(&admin, Command::HangmanStop).await;
    assert!(!reply.ephemeral);
    assert!(reply.content.contains("The secret phrase was: **SECRET**"));
    assert_eq!(reply.view.unwrap().title, "Hangman stopped");
    assert!(dispatcher.engine().session(CHANNEL).await.unwrap().is_none());

    let reply = dispatcher.dispatch(&ctx(alice()), Command::HangmanStop).await;
    assert_eq!(reply.content, "There is no active Hangman game in this channel.");
}

#[tokio::test]
async fn test_love_jar() {
    let dispatcher = setup().await;

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/openjar").await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("The jar is empty!"));

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/lovenote   ").await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("Write something sweet first!"));

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/lovenote You make every day better")
        .await;
    assert!(reply.ephemeral);
    assert!(reply.content.contains("Note added to the Love Jar!"));

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/openjar").await;
    assert!(!reply.ephemeral);
    assert!(reply.content.contains("\"You make every day better\""));
    assert!(reply.content.contains("Left by Alice"));
}

#[tokio::test]
async fn test_decide() {
    let dispatcher = setup().await;

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/decide pizza, ").await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("I need at least two options"));

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/decide Pizza, Sushi ,, Tacos")
        .await;
    assert!(!reply.ephemeral);
    assert!(reply.content.contains("**Options:** Pizza, Sushi, Tacos"));
    assert!(["Pizza", "Sushi", "Tacos"]
        .iter()
        .any(|choice| reply.content.contains(&format!("✨ **{choice}** ✨"))));
}

#[tokio::test]
async fn test_shared_lists() {
    let dispatcher = setup().await;
    let list = |action, item: Option<&str>| Command::List {
        action,
        name: "Movies".to_string(),
        item: item.map(str::to_string),
    };

    let reply = dispatcher.dispatch(&ctx(alice()), list(ListAction::View, None)).await;
    assert_eq!(reply.content, "The **movies** list is currently empty.");

    let reply = dispatcher.dispatch(&ctx(alice()), list(ListAction::Add, None)).await;
    assert_eq!(reply.content, "You need to type the item you want to add!");

    for movie in ["Alien", "Heat", "Up"] {
        dispatcher
            .dispatch(&ctx(alice()), list(ListAction::Add, Some(movie)))
            .await;
    }

    let reply = dispatcher.dispatch(&ctx(bob()), list(ListAction::View, None)).await;
    assert_eq!(reply.content, "📝 **Movies List**\n1. Alien\n2. Heat\n3. Up");

    let reply = dispatcher
        .dispatch(&ctx(bob()), list(ListAction::Remove, Some("Heat")))
        .await;
    assert_eq!(reply.content, "🗑️ Removed **Heat** from **movies**.");

    let reply = dispatcher
        .dispatch(&ctx(bob()), list(ListAction::Remove, Some("2")))
        .await;
    assert_eq!(reply.content, "🗑️ Removed **Up** from **movies**.");

    let reply = dispatcher
        .dispatch(&ctx(bob()), list(ListAction::Remove, Some("5")))
        .await;
    assert_eq!(reply.content, "Invalid number.");

    let reply = dispatcher
        .dispatch(&ctx(bob()), list(ListAction::Remove, Some("Jaws")))
        .await;
    assert_eq!(reply.content, "Couldn't find **Jaws** in the list.");

    let reply = dispatcher.dispatch(&ctx(bob()), list(ListAction::Clear, None)).await;
    assert_eq!(reply.content, "💥 Cleared the entire **movies** list.");

    let reply = dispatcher
        .dispatch_text(&ctx(bob()), "/list clear groceries")
        .await;
    assert_eq!(reply.content, "That list doesn't exist yet.");
}

#[tokio::test]
async fn test_parse_errors_become_usage_hints() {
    let dispatcher = setup().await;

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/guess").await;
    assert!(reply.ephemeral);
    assert!(reply.content.contains("Usage: `/guess <letter>`"));

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/dance").await;
    assert!(reply.content.ends_with("Try `/help`."));
}

#[tokio::test]
async fn test_storage_failure_is_reported_generically() {
    let engine = Arc::new(GuessingGameEngine::new(Arc::new(
        InMemorySessionRepository::new(),
    )));
    let dispatcher = Dispatcher::new(
        engine,
        Arc::new(BrokenLoveJar),
        Arc::new(InMemorySharedListRepository::new()),
        Arc::new(InMemoryCountdownRepository::new()),
    );

    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/lovenote hello")
        .await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("Something went wrong"));
    assert!(!reply.content.contains("disk full"));
}

#[tokio::test]
async fn test_state_persists_across_dispatchers() {
    let temp_dir = TempDir::new().unwrap();
    let build = || {
        let engine = Arc::new(GuessingGameEngine::new(Arc::new(JsonSessionRepository::new(
            temp_dir.path().join("hangman_games.json"),
        ))));
        Dispatcher::new(
            engine,
            Arc::new(JsonLoveJarRepository::new(temp_dir.path().join("love_jar.json"))),
            Arc::new(JsonSharedListRepository::new(
                temp_dir.path().join("shared_lists.json"),
            )),
            Arc::new(JsonCountdownRepository::new(
                temp_dir.path().join("countdowns.json"),
            )),
        )
        .with_fixed_date(date(2025, 6, 1))
    };

    let first = build();
    first
        .dispatch_text(&ctx(alice()), "/hangman start 1002 kisses")
        .await;
    first.dispatch_text(&ctx(bob()), "/guess s").await;
    first
        .dispatch_text(&ctx(alice()), "/list add dates picnic")
        .await;
    first
        .dispatch_text(&ctx(alice()), "/countdown set 2025-06-11 Trip")
        .await;
    drop(first);

    let second = build();
    let reply = second.dispatch_text(&ctx(bob()), "/guess k").await;
    let view = reply.view.unwrap();
    assert_eq!(view.mask, "K _ S S _ S");

    let reply = second.dispatch_text(&ctx(bob()), "/list view dates").await;
    assert_eq!(reply.content, "📝 **Dates List**\n1. picnic");

    let reply = second.dispatch_text(&ctx(alice()), "/countdown check").await;
    assert_eq!(reply.content, "📅 **Your Countdowns**\nTrip: **10** days remaining");
}

#[tokio::test]
async fn test_remove_without_item() {
    let dispatcher = setup().await;

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/list remove movies").await;
    assert_eq!(reply.content, "The **movies** list is empty, nothing to remove.");

    dispatcher
        .dispatch_text(&ctx(alice()), "/list add movies Up")
        .await;
    let reply = dispatcher.dispatch_text(&ctx(alice()), "/list remove movies").await;
    assert_eq!(
        reply.content,
        "You need to type the item (or its number) to remove!"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_list_adds_are_all_kept() {
    let temp_dir = TempDir::new().unwrap();
    let engine = Arc::new(GuessingGameEngine::new(Arc::new(
        InMemorySessionRepository::new(),
    )));
    let dispatcher = Arc::new(Dispatcher::new(
        engine,
        Arc::new(InMemoryLoveJarRepository::new()),
        Arc::new(JsonSharedListRepository::new(
            temp_dir.path().join("shared_lists.json"),
        )),
        Arc::new(InMemoryCountdownRepository::new()),
    ));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let command = Command::List {
                    action: ListAction::Add,
                    name: "movies".to_string(),
                    item: Some(format!("m{i}")),
                };
                dispatcher.dispatch(&ctx(alice()), command).await
            })
        })
        .collect();
    for handle in handles {
        assert!(!handle.await.unwrap().ephemeral);
    }

    let reply = dispatcher.dispatch_text(&ctx(bob()), "/list view movies").await;
    let mut items: Vec<&str> = reply
        .content
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(". ").map(|(_, item)| item))
        .collect();
    items.sort();
    let mut expected: Vec<String> = (0..20).map(|i| format!("m{i}")).collect();
    expected.sort();
    assert_eq!(items, expected);
}

#[tokio::test]
async fn test_countdowns() {
    let dispatcher = setup().await;
    let me = || ctx(alice());

    let reply = dispatcher.dispatch_text(&me(), "/countdown check").await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("You haven't set any countdowns yet!"));

    let reply = dispatcher.dispatch_text(&me(), "/countdown set").await;
    assert_eq!(reply.content, "Please provide a date in YYYY-MM-DD format!");

    let reply = dispatcher.dispatch_text(&me(), "/countdown set 12/25/2025").await;
    assert!(reply.content.starts_with("Invalid date format!"));

    let reply = dispatcher.dispatch_text(&me(), "/countdown set 2025-05-31").await;
    assert!(reply.content.starts_with("That date is in the past!"));

    let reply = dispatcher
        .dispatch_text(&me(), "/countdown set 2025-12-25 Christmas together")
        .await;
    assert!(!reply.ephemeral);
    assert_eq!(
        reply.content,
        "✅ Countdown set for **Christmas together** on **2025-12-25**!"
    );
    let reply = dispatcher.dispatch_text(&me(), "/countdown set 2025-06-01").await;
    assert_eq!(reply.content, "✅ Countdown set for **Special Day** on **2025-06-01**!");

    let reply = dispatcher.dispatch_text(&me(), "/countdown check").await;
    assert_eq!(
        reply.content,
        "📅 **Your Countdowns**\n\
         Christmas together: **207** days remaining\n\
         🎉 Special Day 🎉: **IT IS TODAY!**"
    );

    // Countdowns belong to whoever set them.
    let reply = dispatcher.dispatch_text(&ctx(bob()), "/countdown delete").await;
    assert_eq!(reply.content, "You don't have any countdowns to delete.");

    let reply = dispatcher
        .dispatch(
            &me(),
            Command::Countdown {
                action: CountdownAction::Delete,
                date: None,
                title: None,
            },
        )
        .await;
    assert!(reply.ephemeral);
    assert_eq!(reply.content, "🗑️ All your countdowns have been deleted.");
}

#[tokio::test]
async fn test_passed_countdown_is_crossed_out() {
    let countdowns = Arc::new(InMemoryCountdownRepository::new());
    let build = |today| {
        let engine = Arc::new(GuessingGameEngine::new(Arc::new(
            InMemorySessionRepository::new(),
        )));
        Dispatcher::new(
            engine,
            Arc::new(InMemoryLoveJarRepository::new()),
            Arc::new(InMemorySharedListRepository::new()),
            countdowns.clone(),
        )
        .with_fixed_date(today)
    };

    build(date(2025, 6, 1))
        .dispatch_text(&ctx(alice()), "/countdown set 2025-06-03 Concert")
        .await;
    let reply = build(date(2025, 6, 8))
        .dispatch_text(&ctx(alice()), "/countdown check")
        .await;
    assert_eq!(
        reply.content,
        "📅 **Your Countdowns**\n~~Concert~~: Passed 5 days ago"
    );
}

#[tokio::test]
async fn test_party_commands() {
    let fun = FunContent {
        jokes: vec!["You still owe me a soda".to_string()],
        truths: vec!["Best date ever?".to_string()],
        dares: Vec::new(),
    };
    let dispatcher = in_memory_dispatcher().with_seed(3).with_fun_content(fun);

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/joke").await;
    assert_eq!(reply.content, "✨ **Just Between Us...**\nYou still owe me a soda");

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/truth").await;
    assert_eq!(reply.content, "🔮 **Truth**\n**Best date ever?**");

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/dare").await;
    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("I'm all out of ideas!"));

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/coinflip").await;
    assert!(reply.content.starts_with("🪙 **Alice flipped the coin!** 🪙"));
    assert!(
        reply.content.ends_with("**Heads**! 👑") || reply.content.ends_with("**Tails**! 🐍")
    );
}

#[tokio::test]
async fn test_default_party_content() {
    let dispatcher = setup().await;
    for command in ["/joke", "/truth", "/dare"] {
        let reply = dispatcher.dispatch_text(&ctx(alice()), command).await;
        assert!(!reply.ephemeral);
        assert_eq!(reply.content.lines().count(), 2);
    }
}

#[tokio::test]
async fn test_hug_and_kiss() {
    let dispatcher = setup().await;

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/hug 1002").await;
    assert!(!reply.ephemeral);
    assert_eq!(
        reply.content,
        "🤗 **Virtual Hug!** 🤗\nAlice gives Bob a big, loving hug! Aww..."
    );
    assert!(reply.image_url.unwrap().contains("placehold.co"));

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/kiss 1001").await;
    assert!(reply.ephemeral);
    assert_eq!(
        reply.content,
        "Don't kiss and tell! I'll pretend I didn't see that. 😉"
    );
    assert!(reply.image_url.is_none());

    let reply = dispatcher.dispatch_text(&ctx(alice()), "/hug").await;
    assert!(reply.content.contains("Usage: `/hug <user>`"));
}

#[tokio::test]
async fn test_participant_directory_is_bounded() {
    let dispatcher = in_memory_dispatcher().with_participant_capacity(3);
    dispatcher
        .register_participant(Participant::bot("9999", "couplebot"))
        .await;

    for i in 0..50 {
        let user = Participant::new(format!("u{i}"), format!("User {i}"));
        dispatcher.dispatch_text(&ctx(user), "/help").await;
    }
    assert!(dispatcher.known_participants().await <= 3);

    // The bot survives eviction, so it still can't be picked as a guesser.
    let reply = dispatcher
        .dispatch_text(&ctx(alice()), "/hangman start 9999 robots")
        .await;
    assert!(reply.content.contains("bots can't play"));
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use couplebot_application::{Dispatcher, Participant};
use couplebot_core::config::BotConfig;
use couplebot_core::countdown::CountdownRepository;
use couplebot_core::hangman::{GuessingGameEngine, SessionRepository};
use couplebot_core::love_jar::LoveJarRepository;
use couplebot_core::shared_list::SharedListRepository;
use couplebot_infrastructure::{
    load_config, save_config, BotPaths, InMemoryCountdownRepository, InMemoryLoveJarRepository,
    InMemorySessionRepository, InMemorySharedListRepository, JsonCountdownRepository,
    JsonLoveJarRepository, JsonSessionRepository, JsonSharedListRepository,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod repl;

/// Id the bot itself answers to in the REPL.
const BOT_ID: &str = "couplebot";

#[derive(Parser)]
#[command(name = "couplebot")]
#[command(about = "couplebot - games and little helpers for two", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the JSON stores (overrides `data_dir` in the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep all state in memory; nothing is written to disk
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the bot as one or more local users (default)
    Repl {
        /// Channel to start in
        #[arg(long, default_value = "local")]
        channel: String,
        /// User to act as first
        #[arg(long, default_value = "alice")]
        user: String,
    },
    /// List stored hangman sessions without revealing their phrases
    Sessions,
    /// Write a default config.toml if none exists
    Init,
}

struct Repositories {
    sessions: Arc<dyn SessionRepository>,
    love_jar: Arc<dyn LoveJarRepository>,
    lists: Arc<dyn SharedListRepository>,
    countdowns: Arc<dyn CountdownRepository>,
}

impl Repositories {
    fn open(cli: &Cli, config: &BotConfig) -> Result<Self> {
        if cli.in_memory {
            tracing::info!("Using in-memory storage");
            return Ok(Self {
                sessions: Arc::new(InMemorySessionRepository::new()),
                love_jar: Arc::new(InMemoryLoveJarRepository::new()),
                lists: Arc::new(InMemorySharedListRepository::new()),
                countdowns: Arc::new(InMemoryCountdownRepository::new()),
            });
        }

        let data_dir = cli.data_dir.as_deref().or(config.data_dir.as_deref());
        let paths = BotPaths::new(data_dir)?;
        tracing::info!("Using data directory {}", paths.data_dir().display());
        Ok(Self {
            sessions: Arc::new(JsonSessionRepository::from_paths(&paths)),
            love_jar: Arc::new(JsonLoveJarRepository::from_paths(&paths)),
            lists: Arc::new(JsonSharedListRepository::from_paths(&paths)),
            countdowns: Arc::new(JsonCountdownRepository::from_paths(&paths)),
        })
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => BotPaths::config_file()?,
    };
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    init_tracing(&config.log_filter);

    match &cli.command {
        Some(Commands::Init) => {
            if config_path.exists() {
                println!("{}", format!("Config already exists at {}", config_path.display()).yellow());
            } else {
                save_config(&config_path, &BotConfig::default())?;
                println!("{}", format!("Wrote {}", config_path.display()).green());
            }
        }
        Some(Commands::Sessions) => {
            let repos = Repositories::open(&cli, &config)?;
            let sessions = repos.sessions.list_all().await?;
            if sessions.is_empty() {
                println!("{}", "No stored hangman sessions.".bright_black());
            }
            for session in sessions {
                println!(
                    "{}  {}  setter={} guesser={} mistakes={}/{} updated={}",
                    session.channel_id.bold(),
                    session.status,
                    session.setter_id,
                    session.guesser_id,
                    session.mistakes,
                    session.max_mistakes,
                    session.updated_at
                );
            }
        }
        Some(Commands::Repl { channel, user }) => {
            let dispatcher = build_dispatcher(&cli, &config).await?;
            repl::run(dispatcher, &config, channel, user).await?;
        }
        None => {
            let dispatcher = build_dispatcher(&cli, &config).await?;
            repl::run(dispatcher, &config, "local", "alice").await?;
        }
    }

    Ok(())
}

async fn build_dispatcher(cli: &Cli, config: &BotConfig) -> Result<Dispatcher> {
    let repos = Repositories::open(cli, config)?;
    let engine = Arc::new(GuessingGameEngine::with_settings(
        repos.sessions,
        config.hangman,
    )?);
    let dispatcher = Dispatcher::new(engine, repos.love_jar, repos.lists, repos.countdowns)
        .with_fun_content(config.fun.clone());
    dispatcher
        .register_participant(Participant::bot(BOT_ID, BOT_ID))
        .await;
    Ok(dispatcher)
}

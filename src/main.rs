use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info, warn};
use snake_pro::feedback::{LogNotifier, Notifier, TerminalBell};
use snake_pro::game::GameConfig;
use snake_pro::logging::init_logging;
use snake_pro::modes::HumanMode;
use snake_pro::store::{FileStore, KeyValueStore, MemoryStore, StoreError};
use snake_pro::tick::GameSession;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "snake_pro")]
#[command(version, about = "Grid snake game for the terminal")]
struct Cli {
    /// File holding the high score
    #[arg(long, default_value = ".snake_pro_highscore.json")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    memory_store: bool,

    /// Log file
    #[arg(long, default_value = "snake_pro.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// No terminal bell
    #[arg(long)]
    quiet: bool,
}

fn open_store(cli: &Cli) -> Result<Box<dyn KeyValueStore>> {
    if cli.memory_store {
        return Ok(Box::new(MemoryStore::new()));
    }

    match FileStore::open(&cli.high_score_file) {
        Ok(store) => {
            info!("high scores kept in {:?}", store.path());
            Ok(Box::new(store))
        }
        Err(e @ StoreError::Malformed { .. }) => {
            warn!("{}; starting from an empty store", e);
            Ok(Box::new(FileStore::empty(&cli.high_score_file)))
        }
        Err(e) => Err(e).context("Failed to open high score store"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file, cli.log_level)?;

    let config = GameConfig::default();
    config.validate().context("Invalid game configuration")?;
    info!(
        "starting {}x{} game at {} ticks per second",
        config.grid_width, config.grid_height, config.ticks_per_second
    );

    let session = match cli.seed {
        Some(seed) => GameSession::seeded(config, seed),
        None => GameSession::new(config),
    };

    let store = open_store(&cli)?;

    let notifier: Arc<dyn Notifier> = if cli.quiet {
        Arc::new(LogNotifier)
    } else {
        Arc::new(TerminalBell)
    };

    let mut human_mode = HumanMode::new(session, store, notifier);
    human_mode.run().await?;

    Ok(())
}

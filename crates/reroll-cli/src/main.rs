use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use reroll_core::{
    BotbaseConnection, CancelToken, Game, Reroller, RunConfig, RunOutcome, parse_patterns,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod input;

#[derive(Parser)]
#[command(name = "reroll")]
#[command(about = "Trainer-id reroll bot for consoles running sys-botbase")]
struct Args {
    /// Path to the JSON run configuration
    #[arg(short, long, default_value = "reroll.json")]
    config: PathBuf,

    /// Console address (host:port), overrides the config file
    #[arg(short, long)]
    address: Option<String>,

    /// Game profile (swsh, bdsp, la, sv), overrides the config file
    #[arg(short, long)]
    game: Option<String>,

    /// Acceptance pattern such as 8xxxxx; may be given multiple times,
    /// overrides the config file
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,

    /// Give up after this many restarts instead of rerolling forever
    #[arg(long)]
    max_restarts: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("reroll=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match RunConfig::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {e}, using defaults");
            RunConfig::default()
        }
    };
    if let Some(address) = args.address {
        config.address = address;
    }
    if let Some(game) = args.game {
        config.game = game;
    }
    if !args.patterns.is_empty() {
        config.patterns = args.patterns;
    }
    if args.max_restarts.is_some() {
        config.max_restarts = args.max_restarts;
    }

    let game = Game::from_name(&config.game)?;
    let profile = game.profile();

    let patterns = if config.patterns.is_empty() {
        parse_patterns(profile.default_patterns)?
    } else {
        parse_patterns(&config.patterns)?
    };
    info!(
        "Rerolling {} until the id matches one of: {}",
        profile.name,
        patterns
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let cancel = Arc::new(CancelToken::new());
    let handler = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        handler.raise();
    })?;
    let _keyboard = input::spawn_keyboard_monitor(Arc::clone(&cancel));

    info!("Connecting to {}...", config.address);
    let mut conn = BotbaseConnection::connect(&config.address)
        .with_context(|| format!("failed to connect to {}", config.address))?;
    match conn.server_version() {
        Ok(version) => info!("sys-botbase {version}"),
        Err(e) => warn!("Could not query sys-botbase version: {e}"),
    }

    let reroller =
        Reroller::new(profile, patterns).with_restart_limit(config.max_restarts);
    match reroller.run(&mut conn, &cancel)? {
        RunOutcome::Matched(id) => info!("Done: trainer id {id} accepted"),
        RunOutcome::Cancelled => info!("Stopped before a match was found"),
    }

    Ok(())
}

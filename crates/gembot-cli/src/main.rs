//! GemBot console
//!
//! Runs the gem-tracking bot against the terminal: stdin lines become
//! inbound events, bot replies are printed with their buttons.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! gembot
//!
//! # Start with a custom config and no pauses between messages
//! gembot --config gembot.toml --no-pacing
//!
//! # Environment overrides
//! GEMBOT__BOT__MAX_GEMS=100 gembot
//! ```

mod config;
mod console;
mod display;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gembot_catalog::Catalogs;
use gembot_engine::{Dispatcher, DispatcherConfig, EventBus};
use gembot_ledger::{BalancePolicy, UserLedger};
use gembot_types::{ChatId, Gems, MAX_GEMS};

use crate::config::BotConfig;
use crate::console::{ConsoleSink, ConsoleTransport};

const EVENT_BUFFER: usize = 64;

// =============================================================================
// CLI Arguments
// =============================================================================

/// GemBot - earn gems for useful activities, spend them on rewards
#[derive(Parser, Debug)]
#[command(name = "gembot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "GEMBOT_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEMBOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "GEMBOT_LOG_FORMAT")]
    log_format: Option<String>,

    /// Disable the pauses between messages
    #[arg(long)]
    no_pacing: bool,

    /// Console chat id
    #[arg(long)]
    chat_id: Option<i64>,

    /// Console user id
    #[arg(long)]
    user_id: Option<i64>,

    /// Console user first name
    #[arg(long)]
    first_name: Option<String>,

    /// Console user last name
    #[arg(long)]
    last_name: Option<String>,

    /// Print outbound messages as JSON lines
    #[arg(long)]
    json: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut bot_config = BotConfig::load(args.config.as_deref())?;
    apply_args(&mut bot_config, &args);

    init_logging(&bot_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bot = %bot_config.bot.name,
        "Starting GemBot"
    );

    let catalogs = Arc::new(validate_config(&bot_config)?);
    tracing::info!(
        useful_activities = catalogs.useful_activities.len(),
        rewards = catalogs.rewards.len(),
        overridden = bot_config.catalog.is_overridden(),
        "Catalogs loaded"
    );
    tracing::debug!(
        update_timeout_secs = bot_config.transport.update_timeout_secs,
        token_env = %bot_config.transport.token_env,
        token_present = bot_config.transport.token_present(),
        "Transport settings"
    );

    let ledger = UserLedger::with_policy(BalancePolicy::with_cap(Gems(bot_config.bot.max_gems)));
    let pacing = bot_config.pacing.to_pacing();

    let mut dispatcher = Dispatcher::new(DispatcherConfig {
        ledger: ledger.clone(),
        catalogs,
        sink: Arc::new(ConsoleSink::new(args.json)),
        pacing,
    });

    let bus = EventBus::new(EVENT_BUFFER);
    let events = bus.sender();
    let receiver = bus.into_receiver();

    let mut transport = ConsoleTransport::new(
        ChatId::new(bot_config.console.chat_id),
        bot_config.console.sender(),
    )
    .with_json(args.json);
    if !args.json {
        display::banner(&bot_config.bot.name, &transport.sender().display_name());
    }

    // Detached: a read blocked on stdin must not hold up shutdown
    std::thread::spawn(move || {
        if let Err(err) = transport.pump(std::io::stdin().lock(), events) {
            tracing::error!(error = %err, "Console input failed");
        }
    });

    tokio::select! {
        handled = dispatcher.run(receiver) => {
            tracing::info!(handled, "Console input closed");
        }
        _ = shutdown_signal() => {}
    }

    if !args.json {
        display::ledger_summary(&ledger.users().await);
    }
    tracing::info!(
        users = ledger.user_count().await,
        entries = ledger.entry_count().await,
        "GemBot stopped"
    );

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Apply CLI overrides on top of file and environment configuration
fn apply_args(config: &mut BotConfig, args: &Args) {
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
    if args.no_pacing {
        config.pacing.enabled = false;
    }
    if let Some(chat_id) = args.chat_id {
        config.console.chat_id = chat_id;
    }
    if let Some(user_id) = args.user_id {
        config.console.user_id = user_id;
    }
    if let Some(first_name) = &args.first_name {
        config.console.first_name = first_name.clone();
    }
    if let Some(last_name) = &args.last_name {
        config.console.last_name = Some(last_name.clone());
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with the conversation on stdout.
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}

/// Validate configuration and build the catalogs it describes
fn validate_config(config: &BotConfig) -> anyhow::Result<Catalogs> {
    if config.bot.max_gems > MAX_GEMS.value() {
        anyhow::bail!(
            "bot.max_gems is {} but may not exceed {}",
            config.bot.max_gems,
            MAX_GEMS
        );
    }

    if config.bot.max_gems == 0 {
        tracing::warn!("bot.max_gems is 0, no activity can ever be tracked");
    }

    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        tracing::warn!(format = %config.logging.format, "Unknown log format, using pretty");
    }

    config
        .catalog
        .build()
        .map_err(|err| anyhow::anyhow!("Invalid catalog configuration: {err}"))
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

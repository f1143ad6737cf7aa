//! Standalone host for the wand plugin.
//!
//! Runs the plugin against the in-memory server and exposes an operator
//! console on stdin.
mod config;
mod console;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use config::ServerConfig;
use console::Console;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "wanderfuladditions", about = "Run the wand plugin with an operator console")]
struct Args {
    /// Plugin data folder (overrides WAND_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Start with ArmorStandEditor loaded
    #[arg(long)]
    armor_stand_editor: bool,

    /// Seed for trade rolls
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = ServerConfig::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    config.armor_stand_editor |= args.armor_stand_editor;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    setup_logging(config.log_dir.as_deref())?;

    let mut console = Console::start(&config)?;
    console.run()
}

/// Logs to stderr, and to a daily rolling file when a log directory is set.
fn setup_logging(log_dir: Option<&Path>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(());
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "wanderfuladditions.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Keep the file writer alive for the rest of the process
    std::mem::forget(guard);

    tracing::info!("Log directory: {}", log_dir.display());
    Ok(())
}

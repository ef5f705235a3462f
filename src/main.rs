use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::store::FileStore;
use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid-based snake game for the terminal")]
struct Cli {
    /// JSON game configuration; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cell size in viewport units (overrides the config file)
    #[arg(long)]
    cell_size: Option<u32>,

    /// Where the high score is kept
    #[arg(long, default_value = "grid_snake_scores.json")]
    high_score_file: PathBuf,

    /// Log file (the terminal is used by the game itself)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .map_err(|err| anyhow!("Failed to initialize logger: {}", err))?;

    info!("Starting grid_snake {}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }
    config.validate().context("Invalid game configuration")?;

    let store = FileStore::open(&cli.high_score_file).unwrap_or_else(|err| {
        warn!("{}; starting with an empty high score store", err);
        FileStore::empty(&cli.high_score_file)
    });

    let mut human_mode = HumanMode::new(config, store);
    human_mode.run().await?;

    Ok(())
}

//! Command-line configuration and logging setup.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::BaseDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Folder name used beneath the user's home directory for the log file.
const DATA_DIR_NAME: &str = ".reading-list";
/// Log file name stored inside the data directory.
const LOG_FILE_NAME: &str = "reading-list.log";
/// Widest card grid the UI will lay out.
pub const MAX_COLUMNS: usize = 12;

fn parse_columns(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if !(1..=MAX_COLUMNS).contains(&n) {
        Err(format!("columns must be between 1 and {MAX_COLUMNS}"))
    } else {
        Ok(n)
    }
}

#[derive(Debug, Parser)]
#[command(name = "reading-list")]
#[command(author, version, about = "Keep track of the books you are reading", long_about = None)]
pub struct Config {
    /// Start with an empty list instead of the sample books
    #[arg(long)]
    pub empty: bool,

    /// Number of cards per row
    #[arg(long, default_value = "3", value_parser = parse_columns)]
    pub columns: usize,

    /// Where to write logs (defaults to ~/.reading-list/reading-list.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Resolve the log file path, falling back to the home directory default.
    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
    }

    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "reading_list=debug"
        } else {
            "reading_list=info"
        }
    }
}

/// Send `tracing` output to the log file. Stdout belongs to the terminal UI.
pub fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}

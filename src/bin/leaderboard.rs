use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;

use gomoku_schulte::config::AppConfig;
use gomoku_schulte::leaderboard::{format_time, validate_difficulty, FileStore, Leaderboard};
use gomoku_schulte::logging;

/// Print or clear the saved Schulte grid times.
#[derive(Parser)]
#[command(name = "leaderboard", about = "Show the Schulte grid leaderboard")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Only show one grid size
    #[arg(long)]
    difficulty: Option<u32>,

    /// Maximum rows to print (defaults to leaderboard.display_limit)
    #[arg(long)]
    limit: Option<usize>,

    /// Delete every saved time
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    logging::init_stderr(&config.logging).context("setting up logging")?;

    if let Some(d) = cli.difficulty {
        validate_difficulty(d)?;
    }
    let limit = cli.limit.unwrap_or(config.leaderboard.display_limit);
    if limit == 0 {
        bail!("--limit must be at least 1");
    }

    let store = FileStore::new(config.leaderboard.storage_dir.clone());
    debug!(path = %store.path_for(&config.leaderboard.key).display(), "reading leaderboard");
    let mut leaderboard = Leaderboard::open(
        Box::new(store),
        &config.leaderboard.key,
        config.leaderboard.max_entries,
    );

    if cli.clear {
        leaderboard.clear()?;
        println!("Leaderboard cleared.");
        return Ok(());
    }

    if leaderboard.is_empty() {
        println!("No times recorded yet.");
        return Ok(());
    }

    let sizes = match cli.difficulty {
        Some(d) => vec![d],
        None => leaderboard.difficulties(),
    };
    for size in sizes {
        let entries = leaderboard.list(Some(size), Some(limit));
        println!("{size}x{size}");
        if entries.is_empty() {
            println!("  (no times)");
        }
        for (i, e) in entries.iter().enumerate() {
            println!("{:>3}  {:<20} {:>9}", i + 1, e.name, format_time(e.time));
        }
        println!();
    }
    println!(
        "{} of {} saved times",
        leaderboard.len(),
        leaderboard.max_entries()
    );
    Ok(())
}

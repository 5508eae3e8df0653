use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use gomoku_schulte::config::AppConfig;
use gomoku_schulte::game::GameMode;
use gomoku_schulte::leaderboard::{FileStore, Leaderboard};
use gomoku_schulte::logging;
use gomoku_schulte::ui::{App, Screen};

#[derive(Clone, Copy, ValueEnum)]
enum GameChoice {
    Gomoku,
    Schulte,
}

/// Play Gomoku or the Schulte grid in the terminal.
#[derive(Parser)]
#[command(name = "play", about = "Gomoku and Schulte grid in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Skip the menu and open a game directly
    #[arg(long, value_enum)]
    game: Option<GameChoice>,

    /// Gomoku mode: pvp or pvc (overrides the config)
    #[arg(long)]
    mode: Option<GameMode>,

    /// Seed for the computer opponent and grid shuffles
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(mode) = cli.mode {
        config.gomoku.mode = mode;
    }

    logging::init_file(&config.logging).context("setting up logging")?;
    info!(mode = %config.gomoku.mode, seed = ?cli.seed, "starting");

    let store = FileStore::new(config.leaderboard.storage_dir.clone());
    info!(dir = %store.dir().display(), "leaderboard storage");
    let leaderboard = Leaderboard::open(
        Box::new(store),
        &config.leaderboard.key,
        config.leaderboard.max_entries,
    );

    let mut app = App::new(config, leaderboard, cli.seed);
    match cli.game {
        Some(GameChoice::Gomoku) => app.open(Screen::Gomoku),
        Some(GameChoice::Schulte) => app.open(Screen::SchulteSetup),
        None => {}
    }

    run_tui(&mut app).context("terminal UI failed")?;
    info!("exiting");
    Ok(())
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

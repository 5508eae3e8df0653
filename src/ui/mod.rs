//! Terminal UI: main menu, Gomoku board, Schulte grid runs and the
//! leaderboard, driven by one event loop.

mod app;
mod game_view;
mod leaderboard_view;
mod menu_view;
mod schulte_view;

pub use app::{App, RunSummary, Screen};

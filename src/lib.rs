//! # Gomoku & Schulte Grid
//!
//! Two small terminal games sharing one event loop: 15×15 Gomoku played as
//! a best-of-three match (against a friend or a random computer opponent),
//! and a timed Schulte grid whose completion times go on a persisted
//! leaderboard.
//!
//! ## Modules
//!
//! - [`game`]: Gomoku board, win detection, players, scores, match state
//! - [`ai`]: Agent trait and the uniformly random opponent
//! - [`schulte`]: Schulte grid generation, click validation, timed sessions
//! - [`leaderboard`]: Entry schema, key-value storage, ranking
//! - [`timing`]: Monotonic stopwatch and delayed-event scheduler
//! - [`ui`]: Terminal UI screens
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod logging;
pub mod schulte;
pub mod timing;
pub mod ui;

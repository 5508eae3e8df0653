//! Core Gomoku logic: board and win detection, players, scores, and the
//! round/match state machine.

mod board;
mod player;
mod score;
mod state;

pub use board::{Board, Cell, PlaceError, Position, BOARD_SIZE, WIN_LENGTH};
pub use player::Player;
pub use score::Scores;
pub use state::{GameMode, GameState, MatchOutcome, MatchRules, MoveOutcome, Phase, RoundOutcome};

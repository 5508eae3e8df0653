use crate::game::{Board, Position};

/// Interface for computer-controlled players.
pub trait Agent {
    /// Choose an empty cell to play on. `None` only when the board is full.
    fn select_move(&mut self, board: &Board) -> Option<Position>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

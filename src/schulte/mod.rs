//! Schulte grid: a shuffled N×N grid of 1..N² clicked in ascending order
//! against the clock.

mod grid;
mod session;

pub use grid::{ClickResult, SchulteGrid};
pub use session::{SchulteSession, SessionStatus};

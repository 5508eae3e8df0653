use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use super::grid::{ClickResult, SchulteGrid};
use crate::error::InputError;
use crate::leaderboard::{validate_difficulty, LeaderboardEntry};
use crate::timing::Stopwatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Paused,
    Finished,
    Abandoned,
}

/// One timed attempt at a Schulte grid by a named player.
#[derive(Debug, Clone)]
pub struct SchulteSession {
    player: String,
    grid: SchulteGrid,
    stopwatch: Stopwatch,
    status: SessionStatus,
    /// Cell index of the last wrong click, until cleared
    flash: Option<usize>,
}

impl SchulteSession {
    /// Validate input, shuffle a fresh grid and start the clock at `now`.
    pub fn start<R: Rng + ?Sized>(
        player: &str,
        size: u32,
        rng: &mut R,
        now: Instant,
    ) -> Result<Self, InputError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(InputError::EmptyName);
        }
        validate_difficulty(size)?;

        let grid = SchulteGrid::generate(size as usize, rng);
        Ok(Self::with_grid(player, grid, now))
    }

    /// Start on a fixed grid layout
    pub fn with_grid(player: &str, grid: SchulteGrid, now: Instant) -> Self {
        debug!(player, size = grid.size(), "schulte session started");
        SchulteSession {
            player: player.trim().to_string(),
            grid,
            stopwatch: Stopwatch::started(now),
            status: SessionStatus::Playing,
            flash: None,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn grid(&self) -> &SchulteGrid {
        &self.grid
    }

    pub fn difficulty(&self) -> u32 {
        self.grid.size() as u32
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn flash(&self) -> Option<usize> {
        self.flash
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.stopwatch.elapsed(now)
    }

    /// Click a cell by row-major index. Only counts while playing.
    pub fn click_cell(&mut self, index: usize, now: Instant) -> ClickResult {
        if self.status != SessionStatus::Playing {
            return ClickResult::Ignored;
        }
        self.flash = None;

        let result = self.grid.click_cell(index);
        match result {
            ClickResult::Wrong => self.flash = Some(index),
            ClickResult::Completed => {
                self.stopwatch.pause(now);
                self.status = SessionStatus::Finished;
                info!(
                    player = %self.player,
                    size = self.grid.size(),
                    secs = self.stopwatch.elapsed(now).as_secs_f64(),
                    "schulte grid solved"
                );
            }
            ClickResult::Correct | ClickResult::Ignored => {}
        }
        result
    }

    pub fn clear_flash(&mut self) {
        self.flash = None;
    }

    pub fn pause(&mut self, now: Instant) -> bool {
        if self.status != SessionStatus::Playing {
            return false;
        }
        self.stopwatch.pause(now);
        self.flash = None;
        self.status = SessionStatus::Paused;
        true
    }

    pub fn resume(&mut self, now: Instant) -> bool {
        if self.status != SessionStatus::Paused {
            return false;
        }
        self.stopwatch.resume(now);
        self.status = SessionStatus::Playing;
        true
    }

    /// Give up on the run; it will not produce a score.
    pub fn exit(&mut self, now: Instant) {
        if matches!(self.status, SessionStatus::Playing | SessionStatus::Paused) {
            self.stopwatch.pause(now);
            self.flash = None;
            self.status = SessionStatus::Abandoned;
            debug!(player = %self.player, "schulte session abandoned");
        }
    }

    /// The leaderboard record for a finished run
    pub fn finish_entry(&self, date: u64) -> Option<LeaderboardEntry> {
        if self.status != SessionStatus::Finished {
            return None;
        }
        // Stopped on completion, so any instant reads the final time
        let elapsed = self.stopwatch.elapsed(Instant::now());
        Some(LeaderboardEntry::new(
            &self.player,
            self.difficulty(),
            elapsed,
            date,
        ))
    }
}

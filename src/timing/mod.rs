//! Timekeeping for the event loop: a monotonic stopwatch and a queue of
//! one-shot delayed events.

mod scheduler;
mod stopwatch;

pub use scheduler::{Scheduler, TimerId};
pub use stopwatch::Stopwatch;

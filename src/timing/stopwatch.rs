use std::time::{Duration, Instant};

/// Monotonic stopwatch. Elapsed time is derived from stored instants on
/// demand rather than accumulated by ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    running_since: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    /// A stopwatch already running from `now`
    pub fn started(now: Instant) -> Self {
        Stopwatch {
            running_since: Some(now),
            accumulated: Duration::ZERO,
        }
    }

    /// Start or resume. No effect while already running.
    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Freeze the elapsed time. No effect while stopped.
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_stopwatch_reads_zero_at_start() {
        let t0 = Instant::now();
        assert_eq!(Stopwatch::started(t0).elapsed(t0), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_while_running() {
        let t0 = Instant::now();
        let sw = Stopwatch::started(t0);
        assert_eq!(sw.elapsed(t0 + Duration::from_millis(1500)), Duration::from_millis(1500));
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::started(t0);
        sw.pause(t0 + Duration::from_secs(2));

        // Time spent paused does not count
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(10)), Duration::from_secs(2));

        sw.resume(t0 + Duration::from_secs(10));
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(13)), Duration::from_secs(5));
    }

    #[test]
    fn test_double_pause_and_resume_are_idempotent() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::started(t0);
        sw.resume(t0 + Duration::from_secs(1));
        sw.pause(t0 + Duration::from_secs(3));
        sw.pause(t0 + Duration::from_secs(5));
        assert_eq!(sw.elapsed(t0 + Duration::from_secs(9)), Duration::from_secs(3));
    }

    #[test]
    fn test_earlier_instant_does_not_underflow() {
        let t0 = Instant::now();
        let sw = Stopwatch::started(t0 + Duration::from_secs(1));
        assert_eq!(sw.elapsed(t0), Duration::ZERO);
    }
}

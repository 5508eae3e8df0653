use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Pending<E> {
    id: TimerId,
    due: Instant,
    event: E,
}

/// One-shot delayed events for a single-threaded event loop.
///
/// Nothing fires on its own: the loop calls [`Scheduler::poll_due`] after
/// handling input and dispatches whatever has come due, in due order.
pub struct Scheduler<E> {
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Scheduler {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Queue `event` to fire no earlier than `delay` after `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: now + delay,
            event,
        });
        id
    }

    /// Drop a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return all events due at `now`, earliest first; ties fire
    /// in scheduling order.
    pub fn poll_due(&mut self, now: Instant) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| p.event).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

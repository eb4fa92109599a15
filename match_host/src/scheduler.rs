use std::collections::BTreeMap;

use memory_match::Clock;

/// Delayed actions, ordered by due time and then by scheduling order.
///
/// Nothing here sleeps: the owner asks for due actions and decides how to wait.
pub struct Scheduler<T> {
    clock: Box<dyn Clock>,
    timers: BTreeMap<(u64, u64), T>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            timers: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn schedule(&mut self, delay_ms: u64, item: T) {
        let due = self.now_ms().saturating_add(delay_ms);
        self.timers.insert((due, self.next_id), item);
        self.next_id += 1;
    }

    /// Removes the earliest action whose time has come.
    pub fn pop_due(&mut self) -> Option<T> {
        let now = self.now_ms();
        let (&key, _) = self.timers.iter().next()?;
        if key.0 > now {
            return None;
        }
        self.timers.remove(&key)
    }

    /// When the earliest action is due, in clock time.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.keys().next().map(|&(due, _)| due)
    }

    /// How long until the earliest action is due, zero if it already is.
    pub fn time_until_next(&self) -> Option<u64> {
        self.next_due()
            .map(|due| due.saturating_sub(self.now_ms()))
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

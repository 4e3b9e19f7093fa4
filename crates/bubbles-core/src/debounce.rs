//! Coalesce rapid updates and apply only the latest one after an idle gap.
//!
//! The debouncer holds no timer; callers pass the current `Instant` and ask
//! for the [`Debouncer::deadline`] to sleep on.

use std::time::{Duration, Instant};

/// Default idle gap for search input.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(80);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the idle window at `now`.
    pub fn request(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its idle window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Take the pending value immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn nothing_pending_initially() {
        let mut d: Debouncer<u32> = Debouncer::default();
        assert!(!d.is_pending());
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(Instant::now()), None);
    }

    #[test]
    fn fires_only_after_idle_gap() {
        let start = Instant::now();
        let mut d = Debouncer::new(80 * MS);
        d.request("a", start);
        assert_eq!(d.poll(start + 79 * MS), None);
        assert_eq!(d.poll(start + 80 * MS), Some("a"));
        assert_eq!(d.poll(start + 200 * MS), None);
    }

    #[test]
    fn later_request_supersedes_and_restarts_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(80 * MS);
        d.request("h", start);
        d.request("hi", start + 50 * MS);
        assert_eq!(d.deadline(), Some(start + 130 * MS));
        assert_eq!(d.poll(start + 100 * MS), None);
        assert_eq!(d.poll(start + 130 * MS), Some("hi"));
    }

    #[test]
    fn flush_and_cancel() {
        let start = Instant::now();
        let mut d = Debouncer::new(80 * MS);
        d.request(1, start);
        assert_eq!(d.flush(), Some(1));
        assert_eq!(d.flush(), None);

        d.request(2, start);
        d.cancel();
        assert_eq!(d.poll(start + 500 * MS), None);
    }
}

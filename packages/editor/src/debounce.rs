use std::time::{Duration, Instant};

/// Quiet period the editor waits for before acting on a burst of edits
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Collapses a burst of events into the last one.
///
/// Each push restarts the window and replaces whatever was pending; nothing is
/// queued. Time is passed in by the caller, so the debouncer itself never
/// sleeps or spawns.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the pending event with `value`
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Replace the pending event with one built from it
    pub fn push_with(&mut self, now: Instant, combine: impl FnOnce(Option<T>) -> T) {
        let previous = self.pending.take().map(|(value, _)| value);
        self.push(combine(previous), now);
    }

    /// The pending event, once the window has passed without another push
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Fire immediately, regardless of the window
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

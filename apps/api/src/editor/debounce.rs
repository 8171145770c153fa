use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debouncer. Holds the latest value and releases it once
/// `window` has passed without another update.
///
/// No timers live in here; the caller supplies `now` and sleeps until
/// [`Debouncer::deadline`].
#[derive(Debug)]
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

    /// Replaces any pending value and restarts the quiet window.
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    /// Releases the pending value if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Releases the pending value regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(150);

    #[test]
    fn test_nothing_pending_initially() {
        let mut d: Debouncer<&str> = Debouncer::new(WINDOW);
        assert!(d.deadline().is_none());
        assert!(d.poll(Instant::now()).is_none());
        assert!(d.flush().is_none());
    }

    #[test]
    fn test_releases_after_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.update("a", start);
        assert_eq!(d.deadline(), Some(start + WINDOW));
        assert!(d.poll(start + Duration::from_millis(149)).is_none());
        assert_eq!(d.poll(start + WINDOW), Some("a"));
        assert!(d.deadline().is_none());
    }

    #[test]
    fn test_update_restarts_window_and_keeps_latest() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.update("a", start);
        d.update("ab", start + Duration::from_millis(100));
        assert!(d.poll(start + WINDOW).is_none());
        assert_eq!(
            d.poll(start + Duration::from_millis(250)),
            Some("ab"),
            "only the last value is released"
        );
        assert!(d.poll(start + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_flush_ignores_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.update(1, start);
        assert_eq!(d.flush(), Some(1));
        assert!(d.deadline().is_none());
    }
}

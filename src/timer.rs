use std::time::{Duration, Instant};

/// Cancellable trailing-edge debounce.
///
/// The caller supplies the clock: [`DebounceTimer::schedule`] records a value
/// and a deadline, and [`DebounceTimer::poll`] hands the value back once the
/// deadline has passed with no newer schedule.
#[derive(Debug, Clone)]
pub struct DebounceTimer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> DebounceTimer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the delay from `now`
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value fires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
    }

    /// Take the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(150));
        timer.schedule(1, start);

        assert_eq!(timer.poll(start + Duration::from_millis(100)), None);
        assert_eq!(timer.poll(start + Duration::from_millis(150)), Some(1));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_restarts_delay() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(150));
        timer.schedule(1, start);
        timer.schedule(2, start + Duration::from_millis(100));

        assert_eq!(timer.poll(start + Duration::from_millis(200)), None);
        assert_eq!(timer.poll(start + Duration::from_millis(250)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(10));
        timer.schedule("pan", start);

        assert_eq!(timer.cancel(), Some("pan"));
        assert_eq!(timer.poll(start + Duration::from_secs(1)), None);
        assert_eq!(timer.remaining(start), None);
    }
}

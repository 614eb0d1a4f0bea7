//! Single-slot debouncing: the last value pushed within a quiet window wins.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Holds at most one pending value. Each [`push`](Debouncer::push) replaces
/// the pending value and restarts the quiet window, so a burst of input
/// collapses into one delivery of the most recent value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.wait,
        });
    }

    /// Take the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_value() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut d = Debouncer::new(ms(150));
        d.push("s", t0);
        d.push("sm", t0 + ms(50));
        d.push("smi", t0 + ms(100));
        assert_eq!(d.poll(t0 + ms(200)), None);
        assert_eq!(d.poll(t0 + ms(250)), Some("smi"));
        assert_eq!(d.poll(t0 + ms(900)), None);
    }

    #[test]
    fn cancel_discards_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.push(1, t0);
        assert_eq!(d.cancel(), Some(1));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + Duration::from_secs(1)), None);
    }
}

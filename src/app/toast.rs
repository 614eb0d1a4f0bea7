use std::time::{Duration, Instant};

/// Transient "copied" acknowledgement with a fixed visible duration.
#[derive(Debug, Clone)]
pub struct Toast {
    duration: Duration,
    shown_at: Option<Instant>,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown_at: None,
        }
    }

    /// Show (or restart) the acknowledgement.
    pub fn show(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|t| now.saturating_duration_since(t) < self.duration)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

use std::time::{Duration, Instant};

/// Event-loop poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get event-loop poll interval
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Per-second countdown of an active slot
///
/// Driven by wall-clock deltas: the caller polls `advance` as often as it
/// likes and whole elapsed seconds are consumed. Reaching zero only unlocks
/// completion, it never completes the slot by itself.
#[derive(Debug, Clone)]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
    last_second: Instant,
}

impl Countdown {
    pub fn new(duration_minutes: u32, now: Instant) -> Self {
        let total_secs = u64::from(duration_minutes) * 60;
        Self {
            total_secs,
            remaining_secs: total_secs,
            last_second: now,
        }
    }

    /// One second passes. Clamps at zero.
    pub fn tick_second(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
    }

    /// Consume all whole seconds elapsed since the last consumed second
    pub fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_second).as_secs();
        for _ in 0..elapsed {
            self.tick_second();
        }
        self.last_second += Duration::from_secs(elapsed);
    }

    #[cfg(test)]
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Fraction of the slot already elapsed (0.0 to 1.0)
    pub fn progress_ratio(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        (self.total_secs - self.remaining_secs) as f64 / self.total_secs as f64
    }

    /// Remaining time as "m:ss"
    pub fn formatted(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_starts_at_full_duration() {
        let countdown = Countdown::new(30, Instant::now());
        assert_eq!(countdown.remaining_secs(), 1800);
        assert!(!countdown.is_expired());
        assert_eq!(countdown.formatted(), "30:00");
        assert_eq!(countdown.progress_ratio(), 0.0);
    }

    #[test]
    fn test_advance_consumes_whole_seconds() {
        let start = Instant::now();
        let mut countdown = Countdown::new(1, start);

        countdown.advance(start + Duration::from_millis(900));
        assert_eq!(countdown.remaining_secs(), 60);

        countdown.advance(start + Duration::from_millis(1100));
        assert_eq!(countdown.remaining_secs(), 59);

        // The partial second carried over is not lost
        countdown.advance(start + Duration::from_millis(2000));
        assert_eq!(countdown.remaining_secs(), 58);
        assert_eq!(countdown.formatted(), "0:58");
    }

    #[test]
    fn test_clamps_at_zero() {
        let start = Instant::now();
        let mut countdown = Countdown::new(1, start);
        for _ in 0..100 {
            countdown.tick_second();
        }
        assert_eq!(countdown.remaining_secs(), 0);
        assert!(countdown.is_expired());

        countdown.advance(start + Duration::from_secs(500));
        assert_eq!(countdown.remaining_secs(), 0);
        assert_eq!(countdown.progress_ratio(), 1.0);
        assert_eq!(countdown.formatted(), "0:00");
    }
}

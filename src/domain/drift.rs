use std::time::{Duration, Instant};

/// Default away time before a drift nudge is requested
pub const DEFAULT_DRIFT_THRESHOLD: Duration = Duration::from_secs(10);

/// Watches attention loss while a slot is active
///
/// Only listens while armed. Disarming forgets any pending loss so that
/// nothing carries over between slots.
#[derive(Debug, Clone)]
pub struct DriftMonitor {
    threshold: Duration,
    armed: bool,
    away_since: Option<Instant>,
}

impl DriftMonitor {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            armed: false,
            away_since: None,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
        self.away_since = None;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.away_since = None;
    }

    pub fn attention_lost(&mut self, now: Instant) {
        if self.armed {
            self.away_since = Some(now);
        }
    }

    /// Returns true when the user was away longer than the threshold
    pub fn attention_regained(&mut self, now: Instant) -> bool {
        if !self.armed {
            return false;
        }
        match self.away_since.take() {
            Some(since) => now.saturating_duration_since(since) > self.threshold,
            None => false,
        }
    }
}

impl Default for DriftMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT_THRESHOLD)
    }
}

/// Default minimum gap between two successful notifications: 24h.
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 86_400;

/// Last-notified timestamp, owned by the monitor loop and passed into the
/// cycle use case explicitly. `None` means no notification was ever sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CooldownState {
    last_notified_at: Option<i64>,
}

impl CooldownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff a notification may be sent at `now_epoch`: never notified,
    /// or more than `window_seconds` elapsed since the last successful send.
    pub fn ready(&self, now_epoch: i64, window_seconds: i64) -> bool {
        match self.last_notified_at {
            None => true,
            Some(last) => now_epoch - last > window_seconds,
        }
    }

    /// Record a successful send. Only called after the notifier reports
    /// success; a failed send leaves the state untouched.
    pub fn record(&mut self, now_epoch: i64) {
        self.last_notified_at = Some(now_epoch);
    }

    pub fn last_notified_at(&self) -> Option<i64> {
        self.last_notified_at
    }
}

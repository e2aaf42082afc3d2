//! Cooldown gate for outgoing notifications.
//!
//! - The first notification is always allowed.
//! - Afterwards a digest goes out only once the cooldown has strictly elapsed.
//! - The clock moves only when a send is recorded via `record_dispatch`.

use chrono::{DateTime, Duration, Utc};

/// Cooldown used when `renotify_seconds` is missing or zero.
pub const DEFAULT_RENOTIFY_SECONDS: u64 = 3600;

/// Resolve the configured cooldown, applying the default for `None` or
/// anything not positive.
pub fn resolve_cooldown(configured: Option<i64>) -> u64 {
    match configured {
        Some(secs) if secs > 0 => secs.unsigned_abs(),
        _ => DEFAULT_RENOTIFY_SECONDS,
    }
}

#[derive(Debug, Clone)]
pub struct NotificationPolicy {
    cooldown: Duration,
    last_sent: Option<DateTime<Utc>>,
}

impl NotificationPolicy {
    pub fn new(cooldown_secs: u64) -> Self {
        let secs = i64::try_from(cooldown_secs).unwrap_or(i64::MAX);
        Self {
            cooldown: Duration::try_seconds(secs).unwrap_or(Duration::MAX),
            last_sent: None,
        }
    }

    /// Whether a digest may go out at `now`. Does not mutate state.
    pub fn should_dispatch(&self, now: DateTime<Utc>) -> bool {
        match self.last_sent {
            None => true,
            Some(ts) => now.signed_duration_since(ts) > self.cooldown,
        }
    }

    /// Record a successful send at `now`. Never moves the clock backwards.
    pub fn record_dispatch(&mut self, now: DateTime<Utc>) {
        self.last_sent = Some(match self.last_sent {
            Some(ts) if ts > now => ts,
            _ => now,
        });
    }

    #[cfg(test)]
    pub fn last_sent(&self) -> Option<DateTime<Utc>> {
        self.last_sent
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

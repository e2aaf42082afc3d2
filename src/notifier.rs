//! Polling cycle driver.
//!
//! One cycle fetches the conversations, diffs them against the tracked
//! state and, if something changed and the cooldown allows it, sends a
//! digest. Cycles run back to back with a fixed sleep in between; there
//! is never more than one in flight.

use crate::digest::format_digest;
use crate::models::CycleOutcome;
use crate::policy::NotificationPolicy;
use crate::sink::MessageSink;
use crate::source::ConversationSource;
use crate::tracker::ChangeTracker;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Owns all mutable notifier state.
pub struct Notifier<S, K> {
    source: S,
    sink: K,
    source_label: String,
    poll_interval: Duration,
    tracker: ChangeTracker,
    policy: NotificationPolicy,
}

impl<S: ConversationSource, K: MessageSink> Notifier<S, K> {
    pub fn new(
        source: S,
        sink: K,
        source_label: &str,
        cooldown_secs: u64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            source_label: source_label.to_string(),
            poll_interval,
            tracker: ChangeTracker::new(),
            policy: NotificationPolicy::new(cooldown_secs),
        }
    }

    /// Run a single fetch/diff/dispatch round at time `now`.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> CycleOutcome {
        let snapshots = match self.source.fetch().await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!("Fetch failed: {}", e);
                return CycleOutcome::FetchFailed;
            }
        };
        debug!("Fetched {} conversations", snapshots.len());

        let changes = self.tracker.observe(&snapshots);
        debug!("Tracking {} conversations", self.tracker.len());
        if changes.is_empty() {
            return CycleOutcome::Idle;
        }
        info!("Detected {} changed conversations", changes.len());

        if !self.policy.should_dispatch(now) {
            info!(
                "Cooldown active ({}s), dropping digest",
                self.policy.cooldown().num_seconds()
            );
            return CycleOutcome::Suppressed { changes };
        }

        let digest = format_digest(&self.source_label, &changes);
        match self.sink.send(&digest).await {
            Ok(()) => {
                self.policy.record_dispatch(now);
                CycleOutcome::Dispatched { changes }
            }
            Err(e) => {
                error!("Dispatch failed: {}", e);
                CycleOutcome::DispatchFailed { changes }
            }
        }
    }

    /// Poll forever.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle(Utc::now()).await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Run `cycles` rounds, sleeping between them but not after the last.
    pub async fn run_for(&mut self, cycles: usize) -> Vec<CycleOutcome> {
        let mut outcomes = Vec::with_capacity(cycles);
        for i in 0..cycles {
            if i > 0 {
                tokio::time::sleep(self.poll_interval).await;
            }
            outcomes.push(self.run_cycle(Utc::now()).await);
        }
        outcomes
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    #[cfg(test)]
    pub fn policy(&self) -> &NotificationPolicy {
        &self.policy
    }
}

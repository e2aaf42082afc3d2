//! Data models for the notifier.
//!
//! This module contains the conversation snapshots produced by a fetch,
//! the change records emitted by the tracker, and the wire types of the
//! Rocket.Chat subscriptions endpoint.

use serde::Deserialize;
use std::fmt;

/// State of one conversation as seen by a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSnapshot {
    /// Display name. Not guaranteed unique across conversations.
    pub name: String,
    /// Opaque version token, compared for equality only.
    pub updated_at: String,
    /// The conversation currently demands attention.
    pub alerting: bool,
    /// The conversation is muted.
    pub notifications_disabled: bool,
    /// Informational only.
    pub unread_count: i64,
}

impl ConversationSnapshot {
    /// Alerting and not muted.
    pub fn is_alert_worthy(&self) -> bool {
        self.alerting && !self.notifications_disabled
    }
}

/// A new alert-worthy change detected by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub name: String,
    pub updated_at: String,
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.updated_at)
    }
}

/// Body of `GET /api/v1/subscriptions.get`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionsResponse {
    #[serde(default)]
    pub update: Vec<SubscriptionEntry>,
}

/// One subscription entry as returned by Rocket.Chat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionEntry {
    #[serde(rename = "_id", default)]
    #[allow(dead_code)] // Conversations are keyed by display name
    pub id: String,
    #[serde(rename = "fname", default)]
    pub name: String,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: String,
    #[serde(default)]
    pub alert: bool,
    #[serde(rename = "disableNotifications", default)]
    pub disable_notifications: bool,
    #[serde(default)]
    pub unread: i64,
}

impl From<SubscriptionEntry> for ConversationSnapshot {
    fn from(entry: SubscriptionEntry) -> Self {
        Self {
            name: entry.name,
            updated_at: entry.updated_at,
            alerting: entry.alert,
            notifications_disabled: entry.disable_notifications,
            unread_count: entry.unread,
        }
    }
}

/// What a single polling cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The fetch failed; treated as an empty fetch.
    FetchFailed,
    /// Nothing new to report.
    Idle,
    /// Changes were found but the cooldown was still running. They are dropped.
    Suppressed { changes: Vec<ChangeRecord> },
    /// The digest was delivered.
    Dispatched { changes: Vec<ChangeRecord> },
    /// The digest could not be delivered; the notification clock was left alone.
    DispatchFailed { changes: Vec<ChangeRecord> },
}

impl CycleOutcome {
    /// Changes detected during the cycle, whatever happened to them.
    pub fn changes(&self) -> &[ChangeRecord] {
        match self {
            CycleOutcome::FetchFailed | CycleOutcome::Idle => &[],
            CycleOutcome::Suppressed { changes }
            | CycleOutcome::Dispatched { changes }
            | CycleOutcome::DispatchFailed { changes } => changes,
        }
    }
}

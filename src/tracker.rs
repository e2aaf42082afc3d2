//! Change detection over successive fetches.
//!
//! The tracker remembers the last version token seen for every alerting,
//! unmuted conversation and reports the ones whose token moved.

use crate::models::{ChangeRecord, ConversationSnapshot};
use std::collections::HashMap;
use tracing::debug;

/// Last-observed version token per conversation name.
///
/// Entries are only ever added or overwritten. Conversations are keyed by
/// display name, so two conversations sharing a name share one entry.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    seen: HashMap<String, String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff a fresh fetch against the tracked state, updating it in place.
    ///
    /// Returns the changes in fetch order. Muted and non-alerting
    /// conversations are skipped entirely and never touch the state.
    pub fn observe(&mut self, snapshots: &[ConversationSnapshot]) -> Vec<ChangeRecord> {
        let mut changes = Vec::new();

        for snapshot in snapshots {
            if !snapshot.is_alert_worthy() {
                continue;
            }

            let unchanged = self
                .seen
                .get(&snapshot.name)
                .is_some_and(|token| *token == snapshot.updated_at);
            if unchanged {
                continue;
            }

            debug!("Conversation {} moved to {}", snapshot.name, snapshot.updated_at);
            self.seen
                .insert(snapshot.name.clone(), snapshot.updated_at.clone());
            changes.push(ChangeRecord {
                name: snapshot.name.clone(),
                updated_at: snapshot.updated_at.clone(),
            });
        }

        changes
    }

    /// Token last recorded for `name`.
    #[cfg(test)]
    pub fn last_seen(&self, name: &str) -> Option<&str> {
        self.seen.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

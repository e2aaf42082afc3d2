//! Digest message formatting.

use crate::models::ChangeRecord;

/// Build the chat message for a batch of changes.
///
/// Returns an empty string when there is nothing to report. Otherwise the
/// first line names `source` and each change follows on its own line, in
/// the order given.
pub fn format_digest(source: &str, changes: &[ChangeRecord]) -> String {
    if changes.is_empty() {
        return String::new();
    }

    let mut digest = format!("New messages in chats at {}:\n", source);
    for change in changes {
        digest.push_str(&format!("- {}\n", change));
    }
    digest
}

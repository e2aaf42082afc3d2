//! Error types for the notifier.
//!
//! Every error here is recoverable: the polling loop logs it and moves on
//! to the next cycle.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while querying the conversation source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the per-call timeout.
    #[error("subscriptions request timed out after {0}s")]
    Timeout(u64),

    /// Connection or other transport failure.
    #[error("subscriptions request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("subscriptions endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON shape.
    #[error("failed to decode subscriptions response: {0}")]
    Decode(String),
}

/// Failure while sending the digest to the messaging bot.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("sendMessage request timed out after {0}s")]
    Timeout(u64),

    #[error("sendMessage request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Failure while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

//! Command-line interface argument parsing.
//!
//! Every flag is optional; running the binary bare polls forever using
//! `config.json` from the working directory.

use clap::Parser;
use std::path::PathBuf;

/// ChatPulse - Rocket.Chat to Telegram unread notifier
///
/// Polls the Rocket.Chat subscriptions API and forwards a digest of
/// newly alerting conversations to a Telegram chat, at most once per
/// renotify period.
///
/// Examples:
///   chatpulse
///   chatpulse --config /etc/chatpulse/config.json
///   chatpulse --config chatpulse.toml --once --verbose
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (JSON, or TOML when ending in .toml)
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = crate::config::DEFAULT_CONFIG_PATH,
        env = "CHATPULSE_CONFIG"
    )]
    pub config: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Run a single polling cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

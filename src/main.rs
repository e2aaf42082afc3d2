//! ChatPulse - Rocket.Chat unread notifier
//!
//! Polls the Rocket.Chat subscriptions API every cycle, detects
//! conversations with new alerting activity and forwards a digest to a
//! Telegram chat, throttled by a renotify cooldown.
//!
//! The process runs until it is terminated. Fetch, dispatch and config
//! failures are logged and never stop the loop.

mod cli;
mod config;
mod digest;
mod error;
mod models;
mod notifier;
mod policy;
mod sink;
mod source;
#[cfg(test)]
mod test_support;
mod tracker;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use notifier::Notifier;
use sink::TelegramSink;
use source::RocketChatSource;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    init_logging(&args);

    info!("ChatPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Notifier failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Build the collaborators from config and hand control to the notifier.
async fn run(args: Args) -> Result<()> {
    let config = Config::load_or_default(&args.config);

    let cooldown = config.renotify_cooldown_secs();
    let poll_interval = config.poll_interval();
    let timeout = config.http_timeout();

    info!("Polling {}", config.rocket_api_url);
    info!(
        "   Every {}s, renotify after {}s, request timeout {}s",
        poll_interval.as_secs(),
        cooldown,
        timeout.as_secs()
    );

    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let source = RocketChatSource::new(
        http_client.clone(),
        &config.rocket_api_url,
        &config.rocket_api_user,
        &config.rocket_api_token,
        timeout,
    );
    let sink = TelegramSink::new(
        http_client,
        &config.tg_api_url,
        &config.tg_api_token,
        &config.tg_chat_id,
        timeout,
    );

    let mut notifier = Notifier::new(
        source,
        sink,
        &config.rocket_api_url,
        cooldown,
        poll_interval,
    );

    if args.once {
        for outcome in notifier.run_for(1).await {
            info!("Cycle finished with {} changes", outcome.changes().len());
            debug!("Cycle outcome: {:?}", outcome);
        }
        return Ok(());
    }

    notifier.run().await;
    Ok(())
}

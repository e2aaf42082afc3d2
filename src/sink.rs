//! Message sink backed by the Telegram Bot API.

use crate::error::DispatchError;
use chrono::Local;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// Something that can deliver a text message.
pub trait MessageSink {
    async fn send(&self, text: &str) -> Result<(), DispatchError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Posts to `/bot{token}/sendMessage`.
pub struct TelegramSink {
    http_client: reqwest::Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
    timeout: Duration,
}

impl TelegramSink {
    pub fn new(
        http_client: reqwest::Client,
        api_url: &str,
        bot_token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
            timeout,
        }
    }

    /// Full address of the `sendMessage` method. Contains the bot token.
    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}

impl MessageSink for TelegramSink {
    /// Any response counts as delivered; the status is only logged.
    async fn send(&self, text: &str) -> Result<(), DispatchError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .http_client
            .post(self.send_message_url())
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout.as_secs())
                } else {
                    // The URL embeds the bot token.
                    DispatchError::Transport(e.without_url())
                }
            })?;

        info!(
            "[{}] Send telegram message status = {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            response.status()
        );
        Ok(())
    }
}

//! Conversation source backed by the Rocket.Chat REST API.

use crate::error::FetchError;
use crate::models::{ConversationSnapshot, SubscriptionsResponse};
use std::time::Duration;
use tracing::debug;

/// Something that can report the current state of every conversation.
pub trait ConversationSource {
    async fn fetch(&self) -> Result<Vec<ConversationSnapshot>, FetchError>;
}

/// Polls `GET /api/v1/subscriptions.get` for the configured user.
pub struct RocketChatSource {
    http_client: reqwest::Client,
    base_url: String,
    user_id: String,
    auth_token: String,
    timeout: Duration,
}

impl RocketChatSource {
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        user_id: &str,
        auth_token: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            auth_token: auth_token.to_string(),
            timeout,
        }
    }

    /// Full address of the subscriptions endpoint.
    pub fn subscriptions_url(&self) -> String {
        format!("{}/api/v1/subscriptions.get", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Transport(e)
        }
    }
}

impl ConversationSource for RocketChatSource {
    async fn fetch(&self) -> Result<Vec<ConversationSnapshot>, FetchError> {
        let url = self.subscriptions_url();
        debug!("Fetching subscriptions from {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("X-User-Id", &self.user_id)
            .header("X-Auth-Token", &self.auth_token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        parse_subscriptions(&body)
    }
}

/// Decode a subscriptions body into snapshots, preserving order.
pub fn parse_subscriptions(body: &str) -> Result<Vec<ConversationSnapshot>, FetchError> {
    let parsed: SubscriptionsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(parsed
        .update
        .into_iter()
        .map(ConversationSnapshot::from)
        .collect())
}

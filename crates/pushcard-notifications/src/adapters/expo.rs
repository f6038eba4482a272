use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::PushRelay;
use crate::error::NotificationError;
use crate::types::{PushMessage, PushTicket, PushToken, TicketStatus};

/// Base URL of the hosted push relay API.
pub const DEFAULT_BASE_URL: &str = "https://exp.host/--/api/v2";

const SEND_PATH: &str = "push/send";
const TOKEN_PATH: &str = "push/getExpoPushToken";

/// Native push channel the device token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTokenType {
    Apns,
    Fcm,
}

/// Exchange of a native device token for a relay token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePushTokenRequest {
    #[serde(rename = "type")]
    pub token_type: DeviceTokenType,
    pub device_id: String,
    pub development: bool,
    pub app_id: String,
    pub device_token: String,
    pub project_id: String,
}

#[derive(Deserialize)]
struct TicketEnvelope {
    data: PushTicket,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenEnvelope {
    data: TokenData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    expo_push_token: String,
}

/// HTTP client for the hosted push relay.
pub struct ExpoPushClient {
    http_client: Client,
    base_url: String,
}

impl ExpoPushClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at another relay deployment (or a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Ask the relay for a token addressing this device.
    pub async fn get_push_token(
        &self,
        request: &DevicePushTokenRequest,
    ) -> Result<PushToken, NotificationError> {
        let response = self
            .http_client
            .post(self.url(TOKEN_PATH))
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| NotificationError::TokenRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::TokenRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let envelope: TokenEnvelope = response
            .json()
            .await
            .map_err(|e| NotificationError::TokenRequestFailed(e.to_string()))?;
        PushToken::new(envelope.data.expo_push_token)
    }
}

impl Default for ExpoPushClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushRelay for ExpoPushClient {
    async fn send(&self, message: &PushMessage) -> Result<PushTicket, NotificationError> {
        let response = self
            .http_client
            .post(self.url(SEND_PATH))
            .header("Accept", "application/json")
            .header("Accept-encoding", "gzip, deflate")
            .header("Content-Type", "application/json")
            .json(message)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotificationError::SendFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        // A 2xx means the relay accepted the request; the ticket body is informative only.
        let ticket = serde_json::from_str::<TicketEnvelope>(&body)
            .map(|envelope| envelope.data)
            .unwrap_or_else(|e| {
                debug!(error = %e, "Unreadable push ticket");
                PushTicket::unknown()
            });

        if ticket.status == TicketStatus::Error {
            warn!(
                reason = ticket.message.as_deref().unwrap_or_default(),
                "Push relay rejected message"
            );
        }
        Ok(ticket)
    }
}

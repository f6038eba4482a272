use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::error::NotificationError;

/// Action identifier reported when the user taps the notification body itself.
pub const DEFAULT_ACTION_IDENTIFIER: &str = "expo.modules.notifications.actions.DEFAULT";

/// Routing token issued by the push relay for one installed app instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    pub fn new(token: impl Into<String>) -> Result<Self, NotificationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(NotificationError::InvalidConfig("Empty push token".into()));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PushToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token state of the running session. Moves `Absent -> Present` at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenState {
    #[default]
    Absent,
    Present(PushToken),
}

impl TokenState {
    pub fn token(&self) -> Option<&PushToken> {
        match self {
            Self::Absent => None,
            Self::Present(token) => Some(token),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Notification permission status as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Operating system family of the host. Only Android needs an explicit channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformOs {
    Android,
    Ios,
    Other,
}

/// How a notification that arrives in the foreground is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBehavior {
    pub should_show_alert: bool,
    pub should_play_sound: bool,
    pub should_set_badge: bool,
}

impl Default for NotificationBehavior {
    fn default() -> Self {
        Self {
            should_show_alert: true,
            should_play_sound: true,
            should_set_badge: true,
        }
    }
}

/// A notification delivered to the running app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub identifier: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Custom payload sent alongside the notification
    #[serde(default)]
    pub data: serde_json::Value,

    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
}

impl NotificationContent {
    pub fn new(
        identifier: impl Into<String>,
        title: Option<String>,
        body: Option<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title,
            body,
            data: serde_json::Value::Null,
            received_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// The user interacted with a delivered notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationContent,
    pub action_identifier: String,
}

impl NotificationResponse {
    /// Response for a plain tap on the notification.
    pub fn tapped(notification: NotificationContent) -> Self {
        Self {
            notification,
            action_identifier: DEFAULT_ACTION_IDENTIFIER.to_string(),
        }
    }
}

/// Title and body typed into the send form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftMessage {
    pub title: String,
    pub body: String,
}

/// Message posted to the push relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: PushToken,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

impl PushMessage {
    pub fn new(to: PushToken, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            sound: "default".to_string(),
            title: title.into(),
            body: body.into(),
            data: json!({ "someData": "goes here" }),
        }
    }
}

/// Delivery status reported by the relay for one accepted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Ok,
    Error,
    #[serde(other)]
    Unknown,
}

/// Push ticket returned by the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushTicket {
    pub status: TicketStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PushTicket {
    /// Ticket for a 2xx response whose body could not be read.
    pub fn unknown() -> Self {
        Self {
            status: TicketStatus::Unknown,
            id: None,
            message: None,
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_token_rejects_blank() {
        assert!(PushToken::new("").is_err());
        assert!(PushToken::new("   ").is_err());
        let token = PushToken::new("ExponentPushToken[abc]").unwrap();
        assert_eq!(token.as_str(), "ExponentPushToken[abc]");
        assert_eq!(token.to_string(), "ExponentPushToken[abc]");
    }

    #[test]
    fn test_token_state_defaults_to_absent() {
        let state = TokenState::default();
        assert!(!state.is_present());
        assert!(state.token().is_none());
    }

    #[test]
    fn test_push_message_wire_shape() {
        let token = PushToken::new("ExponentPushToken[abc]").unwrap();
        let message = PushMessage::new(token, "Hello", "World");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "to": "ExponentPushToken[abc]",
                "sound": "default",
                "title": "Hello",
                "body": "World",
                "data": { "someData": "goes here" }
            })
        );
    }

    #[test]
    fn test_ticket_unknown_status_is_tolerated() {
        let ticket: PushTicket =
            serde_json::from_value(json!({ "status": "queued", "id": "x" })).unwrap();
        assert_eq!(ticket.status, TicketStatus::Unknown);
        assert_eq!(ticket.id.as_deref(), Some("x"));
    }

    #[test]
    fn test_default_behavior_presents_everything() {
        let behavior = NotificationBehavior::default();
        assert!(behavior.should_show_alert);
        assert!(behavior.should_play_sound);
        assert!(behavior.should_set_badge);
    }

    #[test]
    fn test_tapped_response_uses_default_action() {
        let content = NotificationContent::new("n-1", Some("Hi".into()), None);
        let response = NotificationResponse::tapped(content);
        assert_eq!(response.action_identifier, DEFAULT_ACTION_IDENTIFIER);
    }
}

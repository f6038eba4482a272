//! Terminal implementation of the platform services the push screen needs.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use colored::Colorize;
use pushcard_notifications::{
    AlertSink, DevicePushTokenRequest, DeviceTokenType, ExpoPushClient, NotificationBehavior,
    NotificationCenter, NotificationChannel, NotificationContent, NotificationError,
    NotificationResponse, PermissionStatus, PlatformOs, PushPlatform, PushToken,
};
use tracing::{debug, info};

use crate::config::{DEFAULT_APP_ID, ProfileConfig};
use crate::output;

/// Identity of this host towards the push relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub os: PlatformOs,
    pub device_id: Option<String>,
    pub device_token: Option<String>,
    pub app_id: String,
    pub development: bool,
}

impl DeviceIdentity {
    pub fn from_profile(cfg: &ProfileConfig) -> anyhow::Result<Self> {
        Ok(Self {
            os: cfg.os()?,
            device_id: cfg.device_id.clone(),
            device_token: cfg.device_token.clone(),
            app_id: cfg.app_id.clone().unwrap_or_else(|| DEFAULT_APP_ID.to_string()),
            development: cfg.development.unwrap_or(false),
        })
    }

    fn token_type(&self) -> DeviceTokenType {
        match self.os {
            PlatformOs::Ios => DeviceTokenType::Apns,
            PlatformOs::Android | PlatformOs::Other => DeviceTokenType::Fcm,
        }
    }
}

pub struct TerminalPlatform {
    device: DeviceIdentity,
    client: Arc<ExpoPushClient>,
    permission: Mutex<PermissionStatus>,
    behavior: Mutex<NotificationBehavior>,
    center: NotificationCenter,
}

impl TerminalPlatform {
    /// With `assume_yes` the permission counts as already granted.
    pub fn new(device: DeviceIdentity, client: Arc<ExpoPushClient>, assume_yes: bool) -> Self {
        let permission = if assume_yes {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Undetermined
        };
        Self {
            device,
            client,
            permission: Mutex::new(permission),
            behavior: Mutex::new(NotificationBehavior::default()),
            center: NotificationCenter::new(),
        }
    }

    fn behavior(&self) -> NotificationBehavior {
        *self.behavior.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Present an incoming notification and hand it to the listeners.
    pub fn deliver(&self, notification: &NotificationContent) -> usize {
        let behavior = self.behavior();
        if behavior.should_show_alert {
            output::print_banner(notification);
        }
        if behavior.should_play_sound {
            print!("\x07");
            let _ = io::stdout().flush();
        }
        self.center.emit_received(notification)
    }

    /// Report that the user interacted with a notification.
    pub fn respond(&self, response: &NotificationResponse) -> usize {
        self.center.emit_response(response)
    }
}

#[async_trait]
impl PushPlatform for TerminalPlatform {
    fn os(&self) -> PlatformOs {
        self.device.os
    }

    fn is_device(&self) -> bool {
        self.device.device_id.is_some() && self.device.device_token.is_some()
    }

    async fn set_notification_channel(
        &self,
        channel_id: &str,
        channel: &NotificationChannel,
    ) -> Result<(), NotificationError> {
        info!(
            channel_id,
            name = %channel.name,
            importance = ?channel.importance,
            "Notification channel configured"
        );
        Ok(())
    }

    async fn get_permissions(&self) -> Result<PermissionStatus, NotificationError> {
        Ok(*self.permission.lock().unwrap_or_else(PoisonError::into_inner))
    }

    async fn request_permissions(&self) -> Result<PermissionStatus, NotificationError> {
        let granted = tokio::task::spawn_blocking(|| {
            confirm("Allow pushcard to show notifications? [y/N] ")
        })
        .await
        .map_err(|e| NotificationError::Platform(e.to_string()))?
        .map_err(|e| NotificationError::Platform(e.to_string()))?;

        let status = if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner) = status;
        debug!(?status, "Notification permission answered");
        Ok(status)
    }

    async fn get_push_token(&self, project_id: &str) -> Result<PushToken, NotificationError> {
        let (Some(device_id), Some(device_token)) =
            (&self.device.device_id, &self.device.device_token)
        else {
            return Err(NotificationError::NotPhysicalDevice);
        };
        let request = DevicePushTokenRequest {
            token_type: self.device.token_type(),
            device_id: device_id.clone(),
            development: self.device.development,
            app_id: self.device.app_id.clone(),
            device_token: device_token.clone(),
            project_id: project_id.to_string(),
        };
        self.client.get_push_token(&request).await
    }

    fn set_notification_handler(&self, behavior: NotificationBehavior) {
        *self.behavior.lock().unwrap_or_else(PoisonError::into_inner) = behavior;
    }

    fn notifications(&self) -> &NotificationCenter {
        &self.center
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Prints notices; in interactive mode waits for Enter before continuing.
pub struct TerminalAlerts {
    interactive: bool,
}

impl TerminalAlerts {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl AlertSink for TerminalAlerts {
    fn alert(&self, message: &str) {
        output::print_notice(message);
        if self.interactive {
            print!("{}", "  Press Enter to continue".dimmed());
            let _ = io::stdout().flush();
            let mut line = String::new();
            let _ = io::stdin().lock().read_line(&mut line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn identity(os: PlatformOs) -> DeviceIdentity {
        DeviceIdentity {
            os,
            device_id: Some("device-1".into()),
            device_token: Some("native-token".into()),
            app_id: DEFAULT_APP_ID.into(),
            development: true,
        }
    }

    #[test]
    fn test_host_without_native_token_is_not_a_device() {
        let mut device = identity(PlatformOs::Other);
        device.device_token = None;
        let platform = TerminalPlatform::new(device, Arc::new(ExpoPushClient::new()), true);
        assert!(!platform.is_device());
    }

    #[test]
    fn test_identity_from_profile_defaults() {
        let device = DeviceIdentity::from_profile(&ProfileConfig::default()).unwrap();
        assert_eq!(device.os, PlatformOs::Other);
        assert_eq!(device.app_id, DEFAULT_APP_ID);
        assert!(!device.development);
        assert_eq!(identity(PlatformOs::Ios).token_type(), DeviceTokenType::Apns);
    }

    #[tokio::test]
    async fn test_assume_yes_grants_permission() {
        let platform =
            TerminalPlatform::new(identity(PlatformOs::Ios), Arc::new(ExpoPushClient::new()), true);
        assert_eq!(
            platform.get_permissions().await.unwrap(),
            PermissionStatus::Granted
        );
    }

    #[tokio::test]
    async fn test_token_is_exchanged_with_relay() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/getExpoPushToken"))
            .and(body_partial_json(json!({
                "type": "apns",
                "deviceToken": "native-token",
                "projectId": "proj-1",
                "development": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "expoPushToken": "ExponentPushToken[host]" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Arc::new(ExpoPushClient::with_base_url(mock_server.uri()));
        let platform = TerminalPlatform::new(identity(PlatformOs::Ios), client, true);
        let token = platform.get_push_token("proj-1").await.unwrap();
        assert_eq!(token.as_str(), "ExponentPushToken[host]");
    }

    #[test]
    fn test_deliver_reaches_listeners_with_quiet_handler() {
        let platform =
            TerminalPlatform::new(identity(PlatformOs::Ios), Arc::new(ExpoPushClient::new()), true);
        platform.set_notification_handler(NotificationBehavior {
            should_show_alert: false,
            should_play_sound: false,
            should_set_badge: false,
        });
        let _sub = platform.notifications().add_notification_received_listener(|_| {});
        let delivered =
            platform.deliver(&NotificationContent::new("n-1", Some("Hi".into()), None));
        assert_eq!(delivered, 1);
    }
}

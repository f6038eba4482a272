//! One-time registration of this app instance with the push relay.

use tracing::{debug, info, warn};

use crate::channel::{DEFAULT_CHANNEL_ID, NotificationChannel};
use crate::error::NotificationError;
use crate::platform::{AlertSink, PushPlatform};
use crate::types::{PlatformOs, PushToken};

/// Where the project identifier may be configured, in lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectIdSource {
    /// `extra.eas.projectId` from the app config
    pub app_config: Option<String>,
    /// `projectId` from the EAS build config
    pub eas_config: Option<String>,
}

impl ProjectIdSource {
    /// First non-blank identifier, app config first.
    pub fn resolve(&self) -> Option<String> {
        [&self.app_config, &self.eas_config]
            .into_iter()
            .flatten()
            .map(|id| id.trim())
            .find(|id| !id.is_empty())
            .map(str::to_string)
    }
}

/// Obtain a push token for this app instance.
///
/// Each failure the user can act on raises a blocking notice through `alerts`
/// before the error is returned. The token-issuing API is only contacted once
/// the device check, the permission grant and the project id all pass.
pub async fn register_for_push_notifications(
    platform: &dyn PushPlatform,
    alerts: &dyn AlertSink,
    project_id: Option<&str>,
) -> Result<PushToken, NotificationError> {
    if platform.os() == PlatformOs::Android {
        let channel = NotificationChannel::default_channel();
        if let Err(e) = platform
            .set_notification_channel(DEFAULT_CHANNEL_ID, &channel)
            .await
        {
            warn!(error = %e, "Failed to configure default notification channel");
        }
    }

    if !platform.is_device() {
        return Err(fail(alerts, NotificationError::NotPhysicalDevice));
    }

    let existing = platform.get_permissions().await?;
    let status = if existing.is_granted() {
        existing
    } else {
        debug!(?existing, "Requesting notification permission");
        platform.request_permissions().await?
    };
    if !status.is_granted() {
        return Err(fail(alerts, NotificationError::PermissionDenied));
    }

    let Some(project_id) = project_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Err(fail(alerts, NotificationError::MissingProjectId));
    };

    let token = platform.get_push_token(project_id).await?;
    info!(project_id, "Obtained push token");
    Ok(token)
}

fn fail(alerts: &dyn AlertSink, error: NotificationError) -> NotificationError {
    if let Some(notice) = error.notice() {
        warn!(%error, "Push registration aborted");
        alerts.alert(notice);
    }
    error
}

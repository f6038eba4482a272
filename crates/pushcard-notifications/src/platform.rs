use async_trait::async_trait;

use crate::channel::NotificationChannel;
use crate::error::NotificationError;
use crate::subscription::NotificationCenter;
use crate::types::{NotificationBehavior, PermissionStatus, PlatformOs, PushToken};

/// Host platform services the screen depends on: permissions, channels and token issuing.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Operating system family of the host
    fn os(&self) -> PlatformOs;

    /// False on simulators and hosts that cannot receive native pushes
    fn is_device(&self) -> bool;

    /// Create or overwrite a notification channel
    async fn set_notification_channel(
        &self,
        channel_id: &str,
        channel: &NotificationChannel,
    ) -> Result<(), NotificationError>;

    /// Current permission status, without prompting
    async fn get_permissions(&self) -> Result<PermissionStatus, NotificationError>;

    /// Ask the user for permission
    async fn request_permissions(&self) -> Result<PermissionStatus, NotificationError>;

    /// Obtain a relay token scoped to the project
    async fn get_push_token(&self, project_id: &str) -> Result<PushToken, NotificationError>;

    /// Install how foreground notifications are presented
    fn set_notification_handler(&self, behavior: NotificationBehavior);

    /// Hub the platform delivers incoming notifications into
    fn notifications(&self) -> &NotificationCenter;
}

/// Blocking notice shown to the user.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

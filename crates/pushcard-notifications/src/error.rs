use thiserror::Error;

/// Notice shown when registration runs on a simulator or a host without a native device token.
pub const NOTICE_NOT_PHYSICAL_DEVICE: &str = "Must use a physical device for push notifications";

/// Notice shown when the user declines the notification permission.
pub const NOTICE_PERMISSION_DENIED: &str =
    "Permission not granted to get push token for push notification!";

/// Notice shown when no project identifier is configured.
pub const NOTICE_MISSING_PROJECT_ID: &str = "Project ID not found";

/// Notice shown when the send form is pressed with an empty field.
pub const NOTICE_INCOMPLETE_FORM: &str = "Please fill out all fields";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Push notifications require a physical device")]
    NotPhysicalDevice,

    #[error("Project ID not found")]
    MissingProjectId,

    #[error("Token, title and body are all required")]
    IncompleteForm,

    #[error("A send is already in flight")]
    SendInFlight,

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Push token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NotificationError {
    /// The blocking notice the user sees for this failure, if it has one.
    ///
    /// Transport and platform failures have no notice; they are logged instead.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied => Some(NOTICE_PERMISSION_DENIED),
            Self::NotPhysicalDevice => Some(NOTICE_NOT_PHYSICAL_DEVICE),
            Self::MissingProjectId => Some(NOTICE_MISSING_PROJECT_ID),
            Self::IncompleteForm => Some(NOTICE_INCOMPLETE_FORM),
            _ => None,
        }
    }
}

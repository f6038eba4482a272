use serde::{Deserialize, Serialize};

/// Channel identifier used for every notification this app posts.
pub const DEFAULT_CHANNEL_ID: &str = "default";

/// Android channel importance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidImportance {
    Unspecified,
    None,
    Min,
    Low,
    Default,
    High,
    Max,
}

/// Visibility of notification content on the lock screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockscreenVisibility {
    Public,
    Private,
    Secret,
}

/// Presentation settings of a notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
    pub name: String,
    pub importance: AndroidImportance,

    /// Alternating off/on durations in milliseconds
    pub vibration_pattern: Vec<u64>,

    /// Accent colour as `#RRGGBB`
    pub light_color: String,

    /// Sound resource name; empty selects the platform default
    pub sound: String,

    pub enable_lights: bool,
    pub enable_vibrate: bool,
    pub lockscreen_visibility: LockscreenVisibility,
}

impl NotificationChannel {
    /// The fixed channel created at registration on Android.
    pub fn default_channel() -> Self {
        Self {
            name: DEFAULT_CHANNEL_ID.to_string(),
            importance: AndroidImportance::High,
            vibration_pattern: vec![500, 500, 100, 500],
            light_color: "#FF1493".to_string(),
            sound: String::new(),
            enable_lights: true,
            enable_vibrate: true,
            lockscreen_visibility: LockscreenVisibility::Public,
        }
    }
}

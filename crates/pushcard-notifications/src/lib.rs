pub mod adapters;
pub mod channel;
pub mod error;
pub mod platform;
pub mod registration;
pub mod screen;
pub mod state;
pub mod subscription;
pub mod types;

#[cfg(test)]
mod testing;

pub use adapters::{DevicePushTokenRequest, DeviceTokenType, ExpoPushClient, PushRelay};
pub use channel::{AndroidImportance, LockscreenVisibility, NotificationChannel};
pub use error::NotificationError;
pub use platform::{AlertSink, PushPlatform};
pub use registration::{ProjectIdSource, register_for_push_notifications};
pub use screen::PushScreen;
pub use state::ScreenState;
pub use subscription::{NotificationCenter, Subscription};
pub use types::*;

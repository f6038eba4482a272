pub mod expo;

use async_trait::async_trait;

use crate::error::NotificationError;
use crate::types::{PushMessage, PushTicket};

/// Outbound side of the push relay
#[async_trait]
pub trait PushRelay: Send + Sync {
    /// Post one message. Transport failures and non-2xx statuses are errors.
    async fn send(&self, message: &PushMessage) -> Result<PushTicket, NotificationError>;
}

pub use expo::{DevicePushTokenRequest, DeviceTokenType, ExpoPushClient};

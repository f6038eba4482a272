//! Scripted collaborators shared by the unit tests.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::adapters::PushRelay;
use crate::channel::NotificationChannel;
use crate::error::NotificationError;
use crate::platform::{AlertSink, PushPlatform};
use crate::subscription::NotificationCenter;
use crate::types::{
    NotificationBehavior, PermissionStatus, PlatformOs, PushMessage, PushTicket, PushToken,
    TicketStatus,
};

pub struct ScriptedPlatform {
    os: PlatformOs,
    is_device: bool,
    existing: PermissionStatus,
    on_request: PermissionStatus,
    center: NotificationCenter,
    channels: Mutex<Vec<(String, NotificationChannel)>>,
    permission_requests: Mutex<usize>,
    token_requests: Mutex<Vec<String>>,
    handlers: Mutex<Vec<NotificationBehavior>>,
}

impl ScriptedPlatform {
    pub fn device(existing: PermissionStatus) -> Self {
        Self {
            os: PlatformOs::Ios,
            is_device: true,
            existing,
            on_request: existing,
            center: NotificationCenter::new(),
            channels: Mutex::new(Vec::new()),
            permission_requests: Mutex::new(0),
            token_requests: Mutex::new(Vec::new()),
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn simulator() -> Self {
        Self {
            is_device: false,
            ..Self::device(PermissionStatus::Granted)
        }
    }

    pub fn granting_on_request(mut self, status: PermissionStatus) -> Self {
        self.on_request = status;
        self
    }

    pub fn on(mut self, os: PlatformOs) -> Self {
        self.os = os;
        self
    }

    pub fn channels(&self) -> Vec<(String, NotificationChannel)> {
        self.channels.lock().unwrap().clone()
    }

    pub fn permission_requests(&self) -> usize {
        *self.permission_requests.lock().unwrap()
    }

    pub fn token_requests(&self) -> Vec<String> {
        self.token_requests.lock().unwrap().clone()
    }

    pub fn handlers(&self) -> Vec<NotificationBehavior> {
        self.handlers.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushPlatform for ScriptedPlatform {
    fn os(&self) -> PlatformOs {
        self.os
    }

    fn is_device(&self) -> bool {
        self.is_device
    }

    async fn set_notification_channel(
        &self,
        channel_id: &str,
        channel: &NotificationChannel,
    ) -> Result<(), NotificationError> {
        self.channels
            .lock()
            .unwrap()
            .push((channel_id.to_string(), channel.clone()));
        Ok(())
    }

    async fn get_permissions(&self) -> Result<PermissionStatus, NotificationError> {
        Ok(self.existing)
    }

    async fn request_permissions(&self) -> Result<PermissionStatus, NotificationError> {
        *self.permission_requests.lock().unwrap() += 1;
        Ok(self.on_request)
    }

    async fn get_push_token(&self, project_id: &str) -> Result<PushToken, NotificationError> {
        self.token_requests
            .lock()
            .unwrap()
            .push(project_id.to_string());
        PushToken::new(format!("ExponentPushToken[{project_id}]"))
    }

    fn set_notification_handler(&self, behavior: NotificationBehavior) {
        self.handlers.lock().unwrap().push(behavior);
    }

    fn notifications(&self) -> &NotificationCenter {
        &self.center
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Relay that records messages. With a gate set, each send waits for a permit.
#[derive(Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<PushMessage>>,
    gate: Option<Arc<Notify>>,
    fail: bool,
}

impl RecordingRelay {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushRelay for RecordingRelay {
    async fn send(&self, message: &PushMessage) -> Result<PushTicket, NotificationError> {
        self.sent.lock().unwrap().push(message.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(NotificationError::SendFailed("connection refused".into()));
        }
        Ok(PushTicket {
            status: TicketStatus::Ok,
            id: Some("ticket-1".into()),
            message: None,
            details: None,
        })
    }
}

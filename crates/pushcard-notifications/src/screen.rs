//! Controller for the single push screen.
//!
//! Owns the screen state and wires it to the platform: mounting installs the
//! foreground presentation handler, binds the received/response listeners and
//! registers for a token; unmounting (or dropping the screen) releases the
//! listeners again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, info, warn};

use crate::adapters::PushRelay;
use crate::error::NotificationError;
use crate::platform::{AlertSink, PushPlatform};
use crate::registration::register_for_push_notifications;
use crate::state::ScreenState;
use crate::subscription::{NotificationCenter, Subscription};
use crate::types::{NotificationBehavior, PushTicket, TokenState};

/// Header text of the screen
pub const HEADER: &str = "PUSH NOTIFICATION";
/// Placeholder of the title input
pub const TITLE_PLACEHOLDER: &str = "Enter title here";
/// Placeholder of the body input
pub const BODY_PLACEHOLDER: &str = "Enter body text";
/// Label of the send button
pub const SEND_LABEL: &str = "Send Notification";

type SharedState = Arc<RwLock<ScreenState>>;

fn read_state(state: &RwLock<ScreenState>) -> RwLockReadGuard<'_, ScreenState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_state(state: &RwLock<ScreenState>) -> RwLockWriteGuard<'_, ScreenState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// The two listeners a mounted screen holds.
struct ListenerBindings {
    _received: Subscription,
    _response: Subscription,
}

impl ListenerBindings {
    fn bind(center: &NotificationCenter, state: &SharedState) -> Self {
        let target = state.clone();
        let received = center.add_notification_received_listener(move |notification| {
            debug!(identifier = %notification.identifier, "Notification received");
            write_state(&target).set_notification(notification.clone());
        });

        let response = center.add_notification_response_received_listener(|response| {
            info!(
                identifier = %response.notification.identifier,
                action = %response.action_identifier,
                title = response.notification.title.as_deref().unwrap_or_default(),
                "Notification response received"
            );
        });

        Self {
            _received: received,
            _response: response,
        }
    }
}

/// Clears the in-flight flag when the send finishes, however it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PushScreen {
    platform: Arc<dyn PushPlatform>,
    relay: Arc<dyn PushRelay>,
    alerts: Arc<dyn AlertSink>,
    project_id: Option<String>,
    state: SharedState,
    bindings: Option<ListenerBindings>,
    sending: AtomicBool,
}

impl PushScreen {
    pub fn new(
        platform: Arc<dyn PushPlatform>,
        relay: Arc<dyn PushRelay>,
        alerts: Arc<dyn AlertSink>,
        project_id: Option<String>,
    ) -> Self {
        Self {
            platform,
            relay,
            alerts,
            project_id,
            state: Arc::new(RwLock::new(ScreenState::new())),
            bindings: None,
            sending: AtomicBool::new(false),
        }
    }

    /// Bind listeners and register for a token.
    ///
    /// Registration failures leave the token absent for the rest of the session;
    /// the user has already been alerted for the ones they can act on.
    pub async fn mount(&mut self) -> TokenState {
        if self.bindings.is_some() {
            debug!("Push screen already mounted");
            return self.token_state();
        }

        self.platform
            .set_notification_handler(NotificationBehavior::default());
        self.bindings = Some(ListenerBindings::bind(
            self.platform.notifications(),
            &self.state,
        ));

        if self.token_state().is_present() {
            return self.token_state();
        }

        match register_for_push_notifications(
            self.platform.as_ref(),
            self.alerts.as_ref(),
            self.project_id.as_deref(),
        )
        .await
        {
            Ok(token) => {
                write_state(&self.state).set_token(token);
            }
            Err(e) => error!(error = %e, "Push registration failed"),
        }
        self.token_state()
    }

    /// Release both listeners.
    pub fn unmount(&mut self) {
        if self.bindings.take().is_some() {
            debug!("Push screen unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.bindings.is_some()
    }

    pub fn set_title_input(&self, title: impl Into<String>) {
        write_state(&self.state).set_title_input(title);
    }

    pub fn set_body_input(&self, body: impl Into<String>) {
        write_state(&self.state).set_body_input(body);
    }

    /// Snapshot of the current screen state.
    pub fn state(&self) -> ScreenState {
        read_state(&self.state).clone()
    }

    pub fn token_state(&self) -> TokenState {
        read_state(&self.state).token_state().clone()
    }

    /// Send the drafted message to this device.
    ///
    /// An incomplete form raises the notice and never reaches the relay. A press
    /// while a previous send is still running is rejected.
    pub async fn press_send(&self) -> Result<PushTicket, NotificationError> {
        let ready = read_state(&self.state).ready_message();
        let message = match ready {
            Ok(message) => message,
            Err(e) => {
                if let Some(notice) = e.notice() {
                    self.alerts.alert(notice);
                }
                return Err(e);
            }
        };

        let Some(_in_flight) = InFlight::acquire(&self.sending) else {
            warn!("Send pressed while a previous send is in flight");
            return Err(NotificationError::SendInFlight);
        };

        match self.relay.send(&message).await {
            Ok(ticket) => {
                info!(status = ?ticket.status, id = ?ticket.id, "Push notification sent");
                Ok(ticket)
            }
            Err(e) => {
                error!(error = %e, "Push notification send failed");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for PushScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushScreen")
            .field("project_id", &self.project_id)
            .field("mounted", &self.is_mounted())
            .field("sending", &self.sending.load(Ordering::Relaxed))
            .finish()
    }
}

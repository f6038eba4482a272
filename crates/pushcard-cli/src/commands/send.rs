use anyhow::{Context, Result};
use pushcard_notifications::{
    AlertSink, NotificationError, PushRelay, PushTicket, PushToken, ScreenState,
};

use crate::output::print_ticket;

/// One-shot send through the same validation as the screen's send button.
pub async fn send(
    relay: &dyn PushRelay,
    alerts: &dyn AlertSink,
    token: Option<&str>,
    title: &str,
    body: &str,
) -> Result<PushTicket> {
    let mut state = ScreenState::new();
    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        state.set_token(PushToken::new(token)?);
    }
    state.set_title_input(title);
    state.set_body_input(body);

    let message = match state.ready_message() {
        Ok(message) => message,
        Err(e) => {
            if let Some(notice) = e.notice() {
                alerts.alert(notice);
            }
            return Err(e.into());
        }
    };

    let ticket = relay
        .send(&message)
        .await
        .context("Failed to send push notification")?;
    print_ticket(&ticket);
    Ok(ticket)
}

/// True when the error was already shown to the user as a notice.
pub fn was_noticed(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<NotificationError>()
        .and_then(NotificationError::notice)
        .is_some()
}

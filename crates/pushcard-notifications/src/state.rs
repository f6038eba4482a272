use crate::error::NotificationError;
use crate::types::{DraftMessage, NotificationContent, PushMessage, PushToken, TokenState};

/// Placeholder shown on the card before anything has been received.
pub const NOT_AVAILABLE: &str = "N/A";

/// Everything the push screen displays or edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    token: TokenState,
    notification: Option<NotificationContent>,
    draft: DraftMessage,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&PushToken> {
        self.token.token()
    }

    pub fn token_state(&self) -> &TokenState {
        &self.token
    }

    /// Store the registered token. A second token is ignored.
    pub fn set_token(&mut self, token: PushToken) -> bool {
        if self.token.is_present() {
            return false;
        }
        self.token = TokenState::Present(token);
        true
    }

    pub fn notification(&self) -> Option<&NotificationContent> {
        self.notification.as_ref()
    }

    /// Replace the last received notification.
    pub fn set_notification(&mut self, notification: NotificationContent) {
        self.notification = Some(notification);
    }

    pub fn draft(&self) -> &DraftMessage {
        &self.draft
    }

    pub fn set_title_input(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_body_input(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    pub fn display_title(&self) -> String {
        format!(
            "Title: {}",
            shown(self.notification.as_ref().and_then(|n| n.title.as_deref()))
        )
    }

    pub fn display_body(&self) -> String {
        format!(
            "Body: {}",
            shown(self.notification.as_ref().and_then(|n| n.body.as_deref()))
        )
    }

    /// Build the outbound message from the draft; every field must be non-empty.
    pub fn ready_message(&self) -> Result<PushMessage, NotificationError> {
        match self.token.token() {
            Some(token) if !self.draft.title.is_empty() && !self.draft.body.is_empty() => Ok(
                PushMessage::new(token.clone(), &self.draft.title, &self.draft.body),
            ),
            _ => Err(NotificationError::IncompleteForm),
        }
    }
}

fn shown(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> PushToken {
        PushToken::new("ExponentPushToken[abc]").unwrap()
    }

    fn received(title: &str, body: &str) -> NotificationContent {
        NotificationContent::new("n-1", Some(title.to_string()), Some(body.to_string()))
    }

    #[test]
    fn test_card_shows_placeholder_before_first_notification() {
        let state = ScreenState::new();
        assert_eq!(state.display_title(), "Title: N/A");
        assert_eq!(state.display_body(), "Body: N/A");
    }

    #[test]
    fn test_card_shows_latest_notification() {
        let mut state = ScreenState::new();
        state.set_notification(received("First", "One"));
        state.set_notification(received("Hello", "World"));
        assert_eq!(state.display_title(), "Title: Hello");
        assert_eq!(state.display_body(), "Body: World");
    }

    #[test]
    fn test_empty_fields_render_as_placeholder() {
        let mut state = ScreenState::new();
        state.set_notification(NotificationContent::new("n-2", Some(String::new()), None));
        assert_eq!(state.display_title(), "Title: N/A");
        assert_eq!(state.display_body(), "Body: N/A");
    }

    #[test]
    fn test_token_moves_to_present_once() {
        let mut state = ScreenState::new();
        assert!(state.token().is_none());
        assert!(state.set_token(token()));
        assert!(!state.set_token(PushToken::new("ExponentPushToken[other]").unwrap()));
        assert_eq!(state.token().unwrap().as_str(), "ExponentPushToken[abc]");
    }

    #[test]
    fn test_ready_message_requires_every_field() {
        let mut state = ScreenState::new();
        state.set_title_input("Hello");
        state.set_body_input("World");
        assert!(matches!(
            state.ready_message(),
            Err(NotificationError::IncompleteForm)
        ));

        state.set_token(token());
        state.set_title_input("");
        assert!(state.ready_message().is_err());

        state.set_title_input("Hello");
        state.set_body_input("");
        assert!(state.ready_message().is_err());
    }

    #[test]
    fn test_ready_message_keeps_draft() {
        let mut state = ScreenState::new();
        state.set_token(token());
        state.set_title_input("Hello");
        state.set_body_input("World");

        let message = state.ready_message().unwrap();
        assert_eq!(message.to, token());
        assert_eq!(message.title, "Hello");
        assert_eq!(message.body, "World");
        assert_eq!(state.draft().title, "Hello");
    }
}

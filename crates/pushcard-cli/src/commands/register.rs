use anyhow::Result;
use colored::Colorize;
use pushcard_notifications::{AlertSink, PushPlatform, PushToken, register_for_push_notifications};

use crate::output::print_success;

pub async fn register(
    platform: &dyn PushPlatform,
    alerts: &dyn AlertSink,
    project_id: Option<&str>,
) -> Result<PushToken> {
    let token = register_for_push_notifications(platform, alerts, project_id).await?;
    print_success(&format!("Registered for push notifications: {}", token.as_str().cyan()));
    Ok(token)
}

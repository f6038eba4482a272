use colored::Colorize;
use pushcard_notifications::screen::{BODY_PLACEHOLDER, HEADER, SEND_LABEL, TITLE_PLACEHOLDER};
use pushcard_notifications::{NotificationContent, PushTicket, ScreenState, TicketStatus};
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Blocking notice for the user.
pub fn print_notice(msg: &str) {
    println!("{} {}", "!".yellow().bold(), msg.yellow().bold());
}

/// Foreground banner for an incoming notification.
pub fn print_banner(notification: &NotificationContent) {
    let title = notification.title.as_deref().unwrap_or_default();
    let body = notification.body.as_deref().unwrap_or_default();
    println!("{} {} {}", "🔔".cyan(), title.bold(), body);
}

pub fn print_ticket(ticket: &PushTicket) {
    let id = ticket.id.as_deref().unwrap_or("-");
    match ticket.status {
        TicketStatus::Ok => print_success(&format!("Sent (ticket {})", id.cyan())),
        TicketStatus::Error => print_error(&format!(
            "Relay rejected message: {}",
            ticket.message.as_deref().unwrap_or("unknown error")
        )),
        TicketStatus::Unknown => print_success("Sent"),
    }
}

/// The notification card: last received title and body.
pub fn render_card(state: &ScreenState) -> String {
    let title = state.display_title();
    let body = state.display_body();
    let mut builder = Builder::default();
    builder.push_record([title.as_str()]);
    builder.push_record([body.as_str()]);
    builder.build().with(Style::rounded()).to_string()
}

fn render_input(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("[ {} ]", placeholder.dimmed())
    } else {
        format!("[ {} ]", value.cyan())
    }
}

pub fn print_screen(state: &ScreenState) {
    println!();
    println!("{}", HEADER.blue().bold());
    println!("{}", render_card(state));
    println!("{}", render_input(&state.draft().title, TITLE_PLACEHOLDER));
    println!("{}", render_input(&state.draft().body, BODY_PLACEHOLDER));
    println!("{}", format!("< {SEND_LABEL} >").white().on_blue().bold());
    if state.token().is_none() {
        println!("{}", "(no push token, sending is unavailable)".dimmed());
    }
}

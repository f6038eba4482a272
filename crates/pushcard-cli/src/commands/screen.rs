use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use pushcard_notifications::{NotificationContent, NotificationResponse, PushRelay, PushScreen};

use crate::host::{TerminalAlerts, TerminalPlatform};
use crate::output::{print_error, print_screen, print_ticket};

/// One line typed at the screen prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    Title(String),
    Body(String),
    Send,
    Receive {
        title: Option<String>,
        body: Option<String>,
    },
    Tap,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn parse_command(line: &str) -> ScreenCommand {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match verb {
        "" => ScreenCommand::Empty,
        "title" => ScreenCommand::Title(rest.to_string()),
        "body" => ScreenCommand::Body(rest.to_string()),
        "send" => ScreenCommand::Send,
        "receive" => {
            let (title, body) = rest.split_once('|').unwrap_or((rest, ""));
            ScreenCommand::Receive {
                title: non_empty(title),
                body: non_empty(body),
            }
        }
        "tap" => ScreenCommand::Tap,
        "show" => ScreenCommand::Show,
        "help" | "?" => ScreenCommand::Help,
        "quit" | "exit" | "q" => ScreenCommand::Quit,
        other => ScreenCommand::Unknown(other.to_string()),
    }
}

fn print_help() {
    println!("{}", "Commands:".cyan());
    println!("  title <text>             set the title input");
    println!("  body <text>              set the body input");
    println!("  send                     send the drafted notification");
    println!("  receive <title> | <body> deliver a notification to this screen");
    println!("  tap                      tap the last received notification");
    println!("  show                     redraw the screen");
    println!("  quit                     leave");
}

pub async fn run(
    platform: Arc<TerminalPlatform>,
    relay: Arc<dyn PushRelay>,
    project_id: Option<String>,
) -> Result<()> {
    let alerts = Arc::new(TerminalAlerts::new(true));
    let mut screen = PushScreen::new(platform.clone(), relay, alerts, project_id);
    screen.mount().await;
    print_screen(&screen.state());
    print_help();

    let mut delivered = 0u64;
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin()
            .read_line(&mut line)
            .context("Failed to read from stdin")?
            == 0
        {
            break;
        }

        match parse_command(&line) {
            ScreenCommand::Title(title) => {
                screen.set_title_input(title);
                print_screen(&screen.state());
            }
            ScreenCommand::Body(body) => {
                screen.set_body_input(body);
                print_screen(&screen.state());
            }
            ScreenCommand::Send => match screen.press_send().await {
                Ok(ticket) => print_ticket(&ticket),
                // Incomplete form was already shown as a notice.
                Err(e) if e.notice().is_some() => {}
                Err(e) => print_error(&e.to_string()),
            },
            ScreenCommand::Receive { title, body } => {
                delivered += 1;
                let notification =
                    NotificationContent::new(format!("local-{delivered}"), title, body);
                platform.deliver(&notification);
                print_screen(&screen.state());
            }
            ScreenCommand::Tap => match screen.state().notification() {
                Some(notification) => {
                    platform.respond(&NotificationResponse::tapped(notification.clone()));
                }
                None => print_error("No notification to tap"),
            },
            ScreenCommand::Show => print_screen(&screen.state()),
            ScreenCommand::Help => print_help(),
            ScreenCommand::Quit => break,
            ScreenCommand::Empty => {}
            ScreenCommand::Unknown(verb) => {
                print_error(&format!("Unknown command: {verb} (type `help`)"));
            }
        }
    }

    screen.unmount();
    Ok(())
}

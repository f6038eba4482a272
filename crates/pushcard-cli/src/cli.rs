use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pushcard")]
#[command(about = "pushcard — register for, receive and send push notifications from a terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Push relay base URL (overrides config and PUSHCARD_ENDPOINT env var)
    #[arg(short, long, global = true, env = "PUSHCARD_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "PUSHCARD_PROFILE", default_value = "default")]
    pub profile: String,

    /// Project ID that scopes issued push tokens
    #[arg(long, global = true, env = "PUSHCARD_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Grant the notification permission without prompting
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one push notification
    Send(SendArgs),
    /// Register this host with the push relay and print the token
    Register,
    /// Open the interactive push screen
    Screen,
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct SendArgs {
    /// Push token of the receiving app instance
    #[arg(long, env = "PUSHCARD_TOKEN")]
    pub token: Option<String>,
    /// Notification title
    #[arg(long, default_value = "")]
    pub title: String,
    /// Notification body
    #[arg(long, default_value = "")]
    pub body: String,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (see `pushcard config show`)
    pub key: String,
    /// Value
    pub value: String,
}

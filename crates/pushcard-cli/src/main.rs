mod cli;
mod commands;
mod config;
mod host;
mod observability;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use pushcard_notifications::ExpoPushClient;

use cli::{Cli, Commands};
use config::ProfileConfig;
use host::{DeviceIdentity, TerminalAlerts, TerminalPlatform};
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv()
        && !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
    {
        eprintln!("Warning: Failed to load .env file: {e}");
    }

    observability::init_tracing();

    if let Err(e) = run().await {
        if !commands::send::was_noticed(&e) {
            print_error(&format!("{e:#}"));
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let profile = &cli.profile;
    let cfg = config::load_profile(profile)?;

    let level = cli
        .log_level
        .as_deref()
        .or(cfg.log_level.as_deref())
        .unwrap_or(config::DEFAULT_LOG_LEVEL);
    observability::apply_logging_level(level);
    tracing::debug!(profile = %profile, level, "Configuration loaded");

    match &cli.command {
        Commands::Send(args) => {
            let client = make_client(&cli, &cfg)?;
            let token = config::resolve_token(&args.token, &cfg);
            let alerts = TerminalAlerts::new(false);
            commands::send::send(&client, &alerts, token.as_deref(), &args.title, &args.body)
                .await?;
        }
        Commands::Register => {
            let platform = make_platform(&cli, &cfg)?;
            let project_id = config::resolve_project_id(&cli.project_id, &cfg);
            let alerts = TerminalAlerts::new(false);
            commands::register::register(&platform, &alerts, project_id.as_deref()).await?;
        }
        Commands::Screen => {
            let client = Arc::new(make_client(&cli, &cfg)?);
            let device = DeviceIdentity::from_profile(&cfg)?;
            let platform = Arc::new(TerminalPlatform::new(device, client.clone(), cli.yes));
            let project_id = config::resolve_project_id(&cli.project_id, &cfg);
            commands::screen::run(platform, client, project_id).await?;
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                println!("{}: {}", "Profile".cyan(), profile);
                for key in config::KEYS {
                    println!(
                        "{}: {}",
                        key.cyan(),
                        cfg.get(key).as_deref().unwrap_or("(not set)")
                    );
                }
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = cfg.clone();
                cfg.set(&set_args.key, &set_args.value)?;
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
    }

    Ok(())
}

fn make_client(cli: &Cli, cfg: &ProfileConfig) -> Result<ExpoPushClient> {
    let endpoint = config::resolve_endpoint(&cli.endpoint, cfg)?;
    Ok(ExpoPushClient::with_base_url(endpoint))
}

fn make_platform(cli: &Cli, cfg: &ProfileConfig) -> Result<TerminalPlatform> {
    let client = Arc::new(make_client(cli, cfg)?);
    let device = DeviceIdentity::from_profile(cfg)?;
    Ok(TerminalPlatform::new(device, client, cli.yes))
}

mod api;
mod app;
mod auth;
mod commands;
mod config;
mod logging;
mod models;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use app::run_tui;
use config::AppConfig;

#[derive(Parser)]
#[command(name = "infrapilot")]
#[command(version)]
#[command(about = "Terminal client for the InfraPilot DevOps assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend API stage URL, overriding `api.base_url`
    #[arg(long, env = "INFRAPILOT_API_URL", global = true)]
    api_url: Option<String>,

    /// ID token issued by the identity provider
    #[arg(long, env = "INFRAPILOT_ID_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one chat message and print the reply
    Send {
        /// Message text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Fetch and print current deployments
    Deployments,
    /// Print the hosted sign-in URL
    LoginUrl,
    /// Print the hosted sign-out URL
    LogoutUrl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("could not load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    match cli.command {
        None => {
            // The guard flushes buffered log lines on exit
            let _guard = match logging::init_file(&config.logging) {
                Ok(guard) => Some(guard),
                Err(e) => {
                    eprintln!("WARN: file logging disabled: {:#}", e);
                    None
                }
            };
            run_tui(config, cli.token).await?;
        }
        Some(command) => {
            logging::init_stderr(&config.logging)?;
            match command {
                Commands::Send { message } => {
                    commands::send(&config, cli.token, &message.join(" ")).await?
                }
                Commands::Deployments => commands::deployments(&config, cli.token).await?,
                Commands::LoginUrl => commands::login_url(&config)?,
                Commands::LogoutUrl => commands::logout_url(&config)?,
            }
        }
    }

    Ok(())
}

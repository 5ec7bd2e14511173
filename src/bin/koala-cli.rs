//! Koala CLI
//!
//! Runs the client over the built-in sample data and prints query results
//! as JSON. Logs go to stderr and, optionally, to a file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use koala_core::koala::auth::{AuthListener, AuthState};
use koala_core::koala::directory::EMPTY_DIRECTORY_TEXT;
use koala_core::koala::feed::EMPTY_FEED_TEXT;
use koala_core::koala::profile::Setting;
use koala_core::{ClientConfig, Command, KoalaClient, StatusFilter};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Koala neighborhood library CLI
#[derive(Parser, Debug)]
#[command(name = "koala-cli")]
#[command(about = "Koala CLI - query the sample library, friends and feed", long_about = None)]
struct Args {
    /// Log level (RUST_LOG takes precedence when set)
    #[arg(long, default_value = "info,koala_core=debug")]
    log_level: String,

    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<String>,

    /// Simulated session-restore delay in milliseconds
    #[arg(long, default_value = "1000")]
    auth_delay_ms: u64,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Search my library
    Books {
        /// Matches title or author, case-insensitive
        #[arg(short, long, default_value = "")]
        query: String,
        /// all | available | borrowed | on_hold
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
    /// Search nearby friends' libraries
    Friends {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Print map markers instead of list entries
        #[arg(long)]
        markers: bool,
    },
    /// Show the activity feed
    Feed,
    /// Show profile stats and settings
    Profile {
        /// Toggle a setting before printing, e.g. notify_returns=false
        #[arg(long, value_parser = parse_setting)]
        set: Vec<(Setting, bool)>,
    },
    /// Restore the session, sign in, and print the resulting state
    SignIn {
        #[arg(short, long)]
        phone: String,
    },
    /// Sign in, then dispatch a command such as scan_book
    Dispatch {
        command: Command,
        #[arg(short, long, default_value = "555-0100")]
        phone: String,
    },
}

fn parse_setting(raw: &str) -> Result<(Setting, bool), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <setting>=<true|false>, got '{}'", raw))?;
    let setting = name.parse::<Setting>().map_err(|e| e.to_string())?;
    let value = value
        .parse::<bool>()
        .map_err(|e| format!("invalid value for {}: {}", name, e))?;
    Ok((setting, value))
}

/// Initialise logging (stderr plus optional file)
fn init_logger(log_level: &str, log_file: Option<&str>) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        info!("[CLI] logging to stderr and {}", path);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialising output")?;
    println!("{}", json);
    Ok(())
}

/// Logs every auth transition
struct CliAuthListener;

#[async_trait::async_trait]
impl AuthListener for CliAuthListener {
    async fn on_auth_state_changed(&self, state: AuthState) {
        match state.current_user() {
            Some(user) => info!("[CLI/Auth] {} ({})", state.name(), user.phone),
            None => info!("[CLI/Auth] {}", state.name()),
        }
    }
}

async fn ready_client(args: &Args) -> Result<KoalaClient> {
    let config =
        ClientConfig::new().with_auth_restore_delay(Duration::from_millis(args.auth_delay_ms));
    let mut client = KoalaClient::new(config).context("building client")?;
    client.set_auth_listener(Arc::new(CliAuthListener));
    client
        .start()
        .await
        .context("session restore task failed")?;
    Ok(client)
}

async fn run(args: Args) -> Result<()> {
    let mut client = ready_client(&args).await?;

    match &args.command {
        CliCommand::Books { query, status } => {
            let view = client.books(query, *status);
            if let Some(text) = view.empty_text() {
                info!("[CLI] {}", text);
            }
            print_json(&view)?;
        }
        CliCommand::Friends { query, markers } => {
            if *markers {
                print_json(&client.map_markers(query))?;
            } else {
                let found = client.friend_libraries(query);
                if found.is_empty() {
                    info!("[CLI] {}", EMPTY_DIRECTORY_TEXT);
                }
                print_json(&found)?;
            }
        }
        CliCommand::Feed => {
            let items = client.feed(chrono::Utc::now());
            if items.is_empty() {
                info!("[CLI] {}", EMPTY_FEED_TEXT);
            }
            print_json(&items)?;
        }
        CliCommand::Profile { set } => {
            for (setting, value) in set {
                client.set_setting(*setting, *value);
            }
            print_json(&client.profile())?;
        }
        CliCommand::SignIn { phone } => {
            client.sign_in(phone).await?;
            print_json(&client.auth_state())?;
        }
        CliCommand::Dispatch { command, phone } => {
            client.sign_in(phone).await?;
            let outcome = client.dispatch(*command).await?;
            print_json(&outcome)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level, args.log_file.as_deref())?;

    if let Err(e) = run(args).await {
        error!("[CLI] {:#}", e);
        return Err(e);
    }
    Ok(())
}

mod adapter;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod events;
mod infra;
mod logging;
mod services;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::{health, record};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::status::AdapterStatus;
use crate::error::AppResult;
use crate::events::StatusPublisher;
use crate::infra::servicenow::ServiceNowClient;

#[derive(Parser)]
#[command(
    name = "snowcr",
    author,
    version,
    about = "ServiceNow change request adapter"
)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List change requests as ticket summaries.
    Get(RecordArgs),
    /// Create a change request and print its summary.
    Post(RecordArgs),
    /// Check that the ServiceNow instance is reachable.
    Health,
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct RecordArgs {
    /// Override the configured change request table.
    #[arg(short, long)]
    table: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Get(args) => {
            let ctx = build_context(args.table)?;
            println!("{}", record::run_get(&ctx).await?);
            Ok(())
        }
        Commands::Post(args) => {
            let ctx = build_context(args.table)?;
            println!("{}", record::run_post(&ctx).await?);
            Ok(())
        }
        Commands::Health => {
            let ctx = build_context(None)?;
            if health::run(&ctx).await == AdapterStatus::Offline {
                std::process::exit(2);
            }
            Ok(())
        }
    }
}

fn build_context(table_override: Option<String>) -> AppResult<AppContext> {
    let mut config = AppConfig::load()?;
    if let Some(table) = table_override {
        config.table = table;
    }

    if config.url.is_none() {
        warn!("ServiceNow instance URL not configured; requests will fail.");
    }
    if config.username.is_none() || config.password.is_none() {
        warn!("ServiceNow credentials not configured; requests will fail.");
    }

    let connector = Arc::new(ServiceNowClient::new(
        config.url.clone(),
        config.username.clone(),
        config.password.clone(),
        config.table.clone(),
    ));

    Ok(AppContext::new(
        config,
        connector,
        Arc::new(StatusPublisher::new()),
    ))
}

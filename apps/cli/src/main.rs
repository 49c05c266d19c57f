use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use auth_cell::{AuthService, FileSessionStore, SessionState};
use shared_api::{ApiClient, TokenProvider};
use shared_config::AppConfig;

use crate::cli::Cli;
use crate::commands::Context;

#[tokio::main]
async fn main() -> ExitCode {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.api_base_url = AppConfig::with_base_url(url).api_base_url;
    }
    if let Some(path) = &cli.session {
        config.session_path = path.clone();
    }
    debug!("Using API at {}", config.api_base_url);

    let store = Arc::new(FileSessionStore::new(config.session_path.clone()));
    let session = Arc::new(SessionState::load(store));
    let tokens: Arc<dyn TokenProvider> = session.clone();
    let api = ApiClient::new(&config, tokens)?;

    let ctx = Context {
        auth: AuthService::new(api.clone(), session),
        api,
        offset: cli.utc_offset,
    };
    commands::run(&ctx, cli.command).await
}

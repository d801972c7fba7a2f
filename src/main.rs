use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

use availcheck::config;
use availcheck::probe::Prober;
use availcheck::worker;

/// Endpoint availability checker.
#[derive(Parser)]
struct Cli {
    /// Path to the YAML config file
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let endpoints = match config::load(&cli.config) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let prober = match Prober::new() {
        Ok(prober) => prober,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    let monitor = tokio::spawn(worker::monitor(endpoints, prober, token.clone()));

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down gracefully... Bye!"),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }

    token.cancel();
    let _ = monitor.await;

    ExitCode::SUCCESS
}

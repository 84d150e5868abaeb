//! Backoffice access-control service

#![allow(missing_docs)]

use backoffice_rbac::server::builder::{load_config, run_server};
use backoffice_rbac::utils::{LogFormat, init_logging};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Backoffice RBAC, impersonation and audit service
#[derive(Debug, Parser)]
#[command(name = "backoffice", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "BACKOFFICE_CONFIG",
        default_value = "config/backoffice.yaml"
    )]
    config: PathBuf,

    /// Log output format
    #[arg(long, env = "BACKOFFICE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_format);

    let result = match load_config(&cli.config).await {
        Ok(config) => run_server(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

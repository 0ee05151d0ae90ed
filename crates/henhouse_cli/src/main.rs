//! `henhouse` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the record store.
//! - Run one command and print its result as JSON on stdout.
//!
//! # Invariants
//! - Failures print `{ "error": code, "message": text }` on stderr and exit
//!   non-zero; stdout only ever carries a successful payload.

mod args;
mod commands;

use args::Cli;
use clap::Parser;
use henhouse_core::db::open_db_with_timeout;
use henhouse_core::{init_logging, CoreConfig, ServiceError};
use log::info;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

#[derive(Debug)]
enum CliError {
    Config(String),
    Service(ServiceError),
    Output(serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Service(err) => err.code(),
            Self::Output(_) => "output_error",
        }
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::Service(ServiceError::Validation(_)) | Self::Config(_) => 2,
            Self::Service(ServiceError::NotFound { .. }) => 3,
            // EX_TEMPFAIL
            Self::Service(ServiceError::UpstreamUnavailable(_)) => 75,
            _ => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "{message}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to encode output: {err}"),
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let payload = serde_json::json!({
                "error": err.code(),
                "message": err.to_string(),
            });
            eprintln!("{payload}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = resolve_config(&cli)?;
    init_logging(&config.log_level, config.log_target()).map_err(CliError::Config)?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        henhouse_core::core_version()
    );

    let conn = open_db_with_timeout(&config.db_path, config.store_timeout)
        .map_err(ServiceError::from)?;
    let value = commands::dispatch(&conn, cli.command)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig, CliError> {
    let mut config = CoreConfig::from_env().map_err(CliError::Config)?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(millis) = cli.timeout_ms {
        config.store_timeout = std::time::Duration::from_millis(millis);
    }
    Ok(config)
}

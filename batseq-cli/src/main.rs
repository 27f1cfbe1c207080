use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod server;

use crate::cli::{Cli, Commands};
use batseq_core::BatseqError;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

/// `-v`/`-vv` win over BATSEQ_LOG, which wins over the `warn` default
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("BATSEQ_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Exit codes by error class
fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<BatseqError>() {
        Some(BatseqError::Configuration(_)) => 2,
        Some(BatseqError::InvalidInput(_)) => 3,
        Some(BatseqError::DatabaseUnavailable { .. }) => 4,
        Some(BatseqError::ExecutionFailed(_)) | Some(BatseqError::ParseFailed(_)) => 5,
        _ => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    tracing::debug!(?config, "Resolved configuration");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Serve(args) => crate::cli::commands::serve::run(args, &config).await,
            Commands::Search(args) => crate::cli::commands::search::run(args, &config).await,
            Commands::Check(args) => crate::cli::commands::check::run(args, &config).await,
        }
    })
}

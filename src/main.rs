mod auth;
mod cli;
mod client;
mod commands;
mod config;
mod context;
mod error;
mod output;
mod repo;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::debug;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.global.log_filter()),
    )
    .init();

    debug!("Starting pipectl {}", env!("CARGO_PKG_VERSION"));
    cli.execute().await
}

//! Binary crate for the `skycast` command-line tools.
//!
//! This crate focuses on:
//! - Parsing and validating tool invocations
//! - Interactive credential configuration
//! - Printing the formatted output the core produces
//!
//! Logs go to stderr so stdout carries only tool output.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

//! # somfyctl — gateway command-line client
//!
//! Composition root that wires the reqwest transport into the application
//! controllers, or serves the virtual gateway.
//!
//! ## Responsibilities
//! - Parse the command line and load the configuration (file, env vars, flags)
//! - Initialise logging
//! - Build the transport and the controllers for the chosen subcommand
//! - Print results; report failures and exit non-zero
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod commands;
mod config;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.gateway.base_url = base_url;
        config.validate()?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(base_url = %config.gateway.base_url, "configuration loaded");

    commands::run(cli.command, &config).await
}

//! SiMetrics CLI
//!
//! Drives a synthetic workload through a configured metrics sink and manages
//! configuration files.
//!
//! ```bash
//! simetrics run --backend stdout --duration 15s
//! simetrics config init simetrics.toml
//! simetrics config show --config simetrics.toml
//! ```

mod args;
mod commands;
mod router;

use args::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set RUST_LOG=debug (or pass --log-level) for verbose logging
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    router::route(cli).await
}

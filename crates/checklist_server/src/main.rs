//! Server entry point.

use anyhow::Context;
use checklist_server::ServerConfig;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    let log_dir = config.resolved_log_dir()?;
    checklist_core::init_logging(config.resolved_log_level(), &log_dir)
        .context("failed to initialize logging")?;

    checklist_server::run(config).await
}

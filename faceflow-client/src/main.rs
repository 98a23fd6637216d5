//! Faceflow client (faceflow) - Main entry point
//!
//! Talks to the face-grouping backend over HTTP: create albums, upload photo
//! embeddings, trigger clustering, and display the resulting clusters.

use anyhow::{Context, Result};
use clap::Parser;
use faceflow_client::cli::Cli;
use faceflow_client::HttpApi;
use faceflow_common::config::ClientConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = ClientConfig::load(&cli.overrides(), cli.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing; stdout is reserved for rendered views
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("faceflow_client={0},faceflow_common={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting Faceflow client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let api = HttpApi::from_config(&config).context("Failed to create HTTP client")?;

    let mut stdout = tokio::io::stdout();
    cli.command
        .run(&api, &mut stdout)
        .await
        .context("Failed to write output")?;

    Ok(())
}

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod replay;
mod telemetry;

use std::process;

use anyhow::Context;
use bikeroutes_reqwest::ApiClient;
use bikeroutes_workflow::WorkflowSession;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "bikeroutes_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "bikeroutes_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "bikeroutes_cli::config";
pub const TRACING_TARGET_REPLAY: &str = "bikeroutes_cli::replay";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let workflow = cli.session.workflow_config()?;
    let paths = cli.replay.load_paths().await?;

    let client = ApiClient::new(cli.api.clone()).context("failed to create API client")?;
    let (routes, snap, _) = client.into_services();
    let handle = WorkflowSession::spawn(workflow, routes, snap);

    let summary = replay::replay(&handle, cli.replay.attributes(), paths).await;
    handle.shutdown().await;

    let summary = summary?;
    tracing::info!(
        target: TRACING_TARGET_REPLAY,
        replayed = summary.replayed,
        skipped = summary.skipped,
        added = summary.added.len(),
        total_routes = summary.total_routes,
        "replay finished"
    );

    Ok(())
}

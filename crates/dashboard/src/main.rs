//! Headless dashboard host: fetch once, print the dashboard, exit.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;

use logidash_dashboard::{DashboardConfig, DashboardView, DashboardWorker, HttpDashboardSource, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logidash_observability::init();

    let config = DashboardConfig::from_env().context("failed to load dashboard configuration")?;

    let session = Session::from_env();
    if session.token().is_some() {
        tracing::info!("Starting dashboard against {} with authentication token", config.api_url);
    } else {
        tracing::info!("Starting dashboard against {} without authentication token", config.api_url);
    }

    let source = Arc::new(HttpDashboardSource::new(&config));

    // The sender stays alive until exit; dropping it stops the worker.
    let (_session_tx, sessions) = watch::channel(session);
    let mut handle = DashboardWorker::spawn(source, sessions);

    let state = handle.settled().await;
    handle.shutdown().await;

    println!("{}", DashboardView::from_state(&state));
    Ok(())
}

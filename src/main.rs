//! Quotidian — Binary Entrypoint
//! Boots the Axum HTTP server: config, metrics, source chain, orchestrator.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quotidian::config::AppConfig;
use quotidian::metrics::Metrics;
use quotidian::orchestrator::Orchestrator;
use quotidian::{api, sources};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quotidian=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::load().context("loading configuration")?;
    let metrics = Metrics::init();

    let chain = sources::build_chain(&cfg);
    tracing::info!(
        sources = chain.len(),
        attempt_timeout_ms = cfg.attempt_timeout_ms,
        history_capacity = cfg.history_capacity,
        "source chain assembled"
    );

    let orchestrator =
        Orchestrator::new(chain, cfg.history_capacity).context("constructing orchestrator")?;
    let state = api::AppState {
        orchestrator: Arc::new(orchestrator),
    };
    let router = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind)
        .await
        .with_context(|| format!("binding {}", cfg.bind))?;
    tracing::info!(bind = %cfg.bind, "quotidian listening");

    axum::serve(listener, router).await.context("serving http")?;
    Ok(())
}

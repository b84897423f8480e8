//! Caller Lookup - Main Entry Point

use anyhow::Context;
use caller_lookup_core::{LookupWorkflow, TwilioLookupClient};
use caller_lookup_web::{build_router, config::Args, AppState};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Caller Lookup v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let settings = args.twilio_settings().context("Twilio settings are required")?;
    let client = TwilioLookupClient::new(&settings).context("invalid Twilio settings")?;

    let state = AppState::new(LookupWorkflow::new(Arc::new(client)))
        .context("failed to load the lookup page template")?;
    let app = build_router(state);

    tracing::info!("Caller Lookup listening on {}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Solana Actions payment HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Run with default config (config.toml in current directory)
//! cargo run -p blinkpay-server --release
//!
//! # Run with custom config path
//! CONFIG=/path/to/config.toml cargo run -p blinkpay-server
//!
//! # Configure logging level
//! RUST_LOG=debug cargo run -p blinkpay-server
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to TOML configuration file (default: `config.toml`)
//! - `HOST` - Override bind address (default: `0.0.0.0`)
//! - `PORT` - Override port (default: `3000`)
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first when present.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router};
use blinkpay::headers::ActionHeaders;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use blinkpay_server::config::ServerConfig;
use blinkpay_server::handlers::{ActionState, PaymentAction, action_router};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Payment server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        cluster = %config.cluster,
        "Loaded configuration"
    );

    let default_recipient = config.recipient()?;
    let blockhash = Arc::new(config.blockhash_provider());
    tracing::info!(
        rpc_url = %blockhash.url(),
        commitment = ?config.commitment,
        "Using RPC endpoint"
    );
    let headers = ActionHeaders::for_chain(config.cluster.caip2()).to_header_map()?;

    let action = PaymentAction::new(blockhash, default_recipient, config.campaign.clone())
        .with_public_url(config.public_url.clone());
    let state: ActionState = Arc::new(action);
    tracing::info!(
        recipient = %default_recipient,
        amount = %config.campaign.amount,
        "Payment action ready"
    );

    let app = Router::new()
        .merge(action_router(state, headers))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Payment server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Payment server shut down gracefully");
    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Waits for Ctrl-C or SIGTERM (Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down..."),
                    _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                if let Err(e) = ctrl_c.await {
                    tracing::error!("Failed to listen for Ctrl-C: {e}");
                }
                tracing::info!("Received Ctrl-C, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = ctrl_c.await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
        tracing::info!("Received Ctrl-C, shutting down...");
    }
}

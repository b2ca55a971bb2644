//! HTTP server initialization and runtime setup.
//!
//! Handles sink assembly, transport construction, and Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;

use crate::config::Config;
use crate::routes::app_router;
use crate::sink::{LogSink, MultiSink, RemoteSink, TracingSink};
use crate::state::AppState;
use crate::transport;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Local tracing sink
/// - Remote aggregator transport (or local-only fallback)
/// - Axum HTTP server with graceful shutdown
///
/// A transport that fails to construct disables shipping for the
/// process lifetime; requests are still logged locally.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address does not parse
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let mut sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(TracingSink::new())];
    let mut remote: Option<Arc<RemoteSink>> = None;

    if let Some(graylog) = &config.graylog {
        match transport::build(graylog.transport_config()).await {
            Ok(handle) => {
                tracing::info!("Log shipping enabled ({})", graylog.endpoint());
                let sink = Arc::new(RemoteSink::new(handle));
                remote = Some(Arc::clone(&sink));
                sinks.push(sink);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to log aggregator at {}: {}. Shipping disabled.",
                    graylog.endpoint(),
                    e
                );
            }
        }
    } else {
        tracing::info!("Log shipping disabled");
    }

    let state = AppState::new(Arc::new(MultiSink::new(sinks)));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(remote) = remote {
        if let Err(e) = remote.close().await {
            tracing::warn!("Failed to close aggregator connection: {}", e);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

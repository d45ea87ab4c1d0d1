// ABOUTME: HTTP server bootstrap for the analytics API
// ABOUTME: Binds the listener, serves the router and shuts down on SIGINT or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::config::ServerConfig;
use crate::routes;
use crate::service::AnalyticsService;
use anyhow::{Context, Result};
use std::future;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Serve the analytics API until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(config: ServerConfig, service: AnalyticsService) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;
    serve_on(listener, config, service).await
}

/// Serve on an already bound listener
///
/// # Errors
///
/// Returns an error if the server fails
pub async fn serve_on(
    listener: TcpListener,
    config: ServerConfig,
    service: AnalyticsService,
) -> Result<()> {
    let app = routes::router(service, &config);
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C signal, shutting down gracefully"),
            Err(e) => warn!("Failed to install Ctrl+C handler: {e}"),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down gracefully");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

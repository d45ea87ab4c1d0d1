// ABOUTME: Analytics API server binary
// ABOUTME: Loads environment configuration and serves reports computed from users.csv
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! # Stepcoin Analytics Server Binary
//!
//! Serves the wellness analytics report over HTTP.

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use stepcoin_server::{
    config::ServerConfig,
    constants::routes,
    logging, server,
    service::AnalyticsService,
    sources::CsvUserRepository,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "stepcoin-server")]
#[command(about = "Stepcoin wellness analytics API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the users CSV snapshot location
    #[arg(long)]
    users_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(users_csv) = args.users_csv {
        config.users_csv_path = users_csv;
    }

    logging::init_from_env()?;

    info!("Starting Stepcoin analytics server");
    info!("{}", config.summary());

    let repository = Arc::new(CsvUserRepository::new(config.users_csv_path.clone()));
    let service = AnalyticsService::new(repository, config.analytics_config());
    info!(source = %service.source(), "Users snapshot source configured");

    display_available_endpoints(&config);

    if let Err(e) = server::serve(config, service).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Analytics Report:  GET http://{host}:{port}{}", routes::ANALYTICS);
    info!("   Seeded Report:     GET http://{host}:{port}{}?seed=7", routes::ANALYTICS);
    info!("   Health:            GET http://{host}:{port}{}", routes::HEALTH);
    info!("   Readiness:         GET http://{host}:{port}{}", routes::READY);
    info!("=== End of Endpoint List ===");
}

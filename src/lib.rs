// ABOUTME: Main library entry point for the Stepcoin wellness analytics server
// ABOUTME: Wires snapshot sources, the analytics engine and the HTTP API together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

#![deny(unsafe_code)]

//! # Stepcoin Server
//!
//! HTTP front end for the Stepcoin analytics engine. Every request to
//! `/api/analytics` loads the current users snapshot, runs the full
//! pipeline and returns the report as JSON.
//!
//! ## Architecture
//!
//! - **Sources**: where user snapshots come from (`users.csv`, memory)
//! - **Service**: loads a snapshot and runs the engine off the async runtime
//! - **Routes**: thin axum handlers delegating to the service
//! - **Middleware**: request ids, request spans and CORS
//! - **Config**: environment-driven server and clustering settings
//!
//! The analytics themselves live in [`stepcoin_analytics`]; shared errors,
//! constants and records live in [`stepcoin_core`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stepcoin_server::config::ServerConfig;
//! use stepcoin_server::service::AnalyticsService;
//! use stepcoin_server::sources::CsvUserRepository;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let repository = Arc::new(CsvUserRepository::new(config.users_csv_path.clone()));
//!     let service = AnalyticsService::new(repository, config.analytics_config());
//!     let report = service.report().await?;
//!     println!("{} users in {} teams", report.summary.total_users, report.summary.total_teams);
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware layers
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Server bootstrap and graceful shutdown
pub mod server;

/// Analytics service over a snapshot repository
pub mod service;

/// User snapshot sources
pub mod sources;

pub use stepcoin_analytics as analytics;
pub use stepcoin_core::{constants, errors, models};

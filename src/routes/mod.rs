// ABOUTME: Route module organization for the Stepcoin analytics HTTP endpoints
// ABOUTME: Assembles domain routers and wraps them in request-id, tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Route module for the Stepcoin server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to [`AnalyticsService`].

/// Analytics report routes
pub mod analytics;
/// Health check and readiness routes
pub mod health;

pub use analytics::AnalyticsRoutes;
pub use health::HealthRoutes;

use crate::config::ServerConfig;
use crate::middleware::{
    propagate_request_id_layer, set_request_id_layer, setup_cors, trace_layer,
};
use crate::service::AnalyticsService;
use axum::Router;
use tower::ServiceBuilder;

/// Build the full application router
///
/// The request id is assigned before the trace span opens so every log line
/// for a request carries it.
pub fn router(service: AnalyticsService, config: &ServerConfig) -> Router {
    Router::new()
        .merge(AnalyticsRoutes::routes(service.clone()))
        .merge(HealthRoutes::routes(service))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer())
                .layer(setup_cors(config)),
        )
}

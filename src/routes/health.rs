// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness always answers; readiness confirms the users snapshot is reachable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Health check routes for load balancers and orchestrators

use crate::service::AnalyticsService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use stepcoin_core::constants::routes;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(service: AnalyticsService) -> Router {
        Router::new()
            .route(routes::HEALTH, get(Self::handle_health))
            .route(routes::READY, get(Self::handle_ready))
            .with_state(service)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    /// Ready once the snapshot source answers
    async fn handle_ready(State(service): State<AnalyticsService>) -> Response {
        match service.probe().await {
            Ok(rows) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "source": service.source(),
                    "users": rows,
                    "timestamp": Utc::now().to_rfc3339()
                })),
            )
                .into_response(),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "source": service.source(),
                    "reason": e.message,
                    "timestamp": Utc::now().to_rfc3339()
                })),
            )
                .into_response(),
        }
    }
}

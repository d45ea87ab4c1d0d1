// ABOUTME: Analytics report route handlers
// ABOUTME: Serves the full analytics report computed from the current users snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Analytics routes
//!
//! `GET /api/analytics` recomputes the report from a fresh snapshot on every
//! call. An optional `seed` query parameter overrides the configured
//! clustering seed for that one request.

use crate::service::AnalyticsService;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use stepcoin_core::constants::{routes, service::REQUEST_ID_HEADER};
use stepcoin_core::errors::AppError;

/// Query parameters for the analytics report
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Clustering seed override
    pub seed: Option<u64>,
}

/// Analytics routes implementation
pub struct AnalyticsRoutes;

impl AnalyticsRoutes {
    /// Create all analytics routes
    pub fn routes(service: AnalyticsService) -> Router {
        Router::new()
            .route(routes::ANALYTICS, get(Self::handle_report))
            .with_state(service)
    }

    /// Handle analytics report request
    async fn handle_report(
        State(service): State<AnalyticsService>,
        headers: HeaderMap,
        query: Result<Query<AnalyticsQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let tag = |e: AppError| match request_id {
            Some(id) => e.with_request_id(id),
            None => e,
        };

        let Query(params) = query.map_err(|rejection| {
            tag(AppError::invalid_input(format!(
                "Invalid query string: {}",
                rejection.body_text()
            )))
        })?;

        let result = match params.seed {
            Some(seed) => service.report_with_seed(seed).await,
            None => service.report().await,
        };

        let report = result.map_err(tag)?;

        Ok((StatusCode::OK, Json(report)).into_response())
    }
}

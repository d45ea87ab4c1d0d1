// ABOUTME: CORS middleware configuration for the analytics HTTP API
// ABOUTME: Lets dashboard front-ends on other origins read the report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::config::ServerConfig;
use http::{header::HeaderName, HeaderValue, Method};
use stepcoin_core::constants::service::REQUEST_ID_HEADER;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// `*` or an empty value allows any origin; otherwise a comma-separated list
/// of origins is accepted. Entries that are not valid header values are
/// skipped, and a list with no valid entry falls back to any origin.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://wellness.example.com,https://admin.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allowed = config.cors.allowed_origins.trim();
    let allow_origin = if allowed.is_empty() || allowed == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_methods([Method::GET, Method::OPTIONS])
}

// ABOUTME: Axum response conversion for AppError
// ABOUTME: Maps error codes to HTTP status and renders the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use super::{AppError, ErrorResponse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(
                error.code = ?self.code,
                request_id = self.request_id.as_deref().unwrap_or("-"),
                "{}",
                self.message
            );
        } else {
            warn!(error.code = ?self.code, "{}", self.message);
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

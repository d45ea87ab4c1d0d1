// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates x-request-id values and opens one span per HTTP request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use axum::body::Body;
use http::{HeaderName, HeaderValue, Request};
use stepcoin_core::constants::service::REQUEST_ID_HEADER;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{info_span, Level, Span};
use uuid::Uuid;

/// Generates `req_<uuid>` identifiers for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestIdentifier;

impl MakeRequestId for MakeRequestIdentifier {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

const fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Assign a request id when the client did not send one
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestIdentifier> {
    SetRequestIdLayer::new(request_id_header(), MakeRequestIdentifier)
}

/// Copy the request id onto the response
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(request_id_header())
}

/// Request id of a request, if one was assigned
#[must_use]
pub fn request_id_of<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// Create a tracing span for an HTTP request
#[must_use]
pub fn create_request_span(request: &Request<Body>) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = request_id_of(request).unwrap_or("-"),
    )
}

/// HTTP trace layer logging one span per request and its response status
#[must_use]
pub fn trace_layer(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span> {
    TraceLayer::new_for_http()
        .make_span_with(create_request_span as fn(&Request<Body>) -> Span)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

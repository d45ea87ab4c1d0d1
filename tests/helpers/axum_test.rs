// ABOUTME: Drives the router in-process for HTTP integration tests
// ABOUTME: One GET or OPTIONS request per call through tower oneshot, body read eagerly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use axum::{
    body::{to_bytes, Body},
    http::{request::Builder, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// A request under construction
pub struct AxumTestRequest {
    builder: Builder,
}

impl AxumTestRequest {
    fn with_method(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
        }
    }

    /// GET `uri`
    pub fn get(uri: &str) -> Self {
        Self::with_method(Method::GET, uri)
    }

    /// OPTIONS `uri`, for CORS preflights
    pub fn options(uri: &str) -> Self {
        Self::with_method(Method::OPTIONS, uri)
    }

    /// Attach a request header
    pub fn header(self, name: &str, value: &str) -> Self {
        Self {
            builder: self.builder.header(name, value),
        }
    }

    /// Run the request through `app` and collect the response
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self.builder.body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("router is infallible");
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await.expect("response body");

        AxumTestResponse {
            status: parts.status,
            headers: parts.headers,
            body: body.to_vec(),
        }
    }
}

/// Status, headers and body of a finished request
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    /// Numeric status
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Header value, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&self.body))
        })
    }

    /// Panic with the body when the status differs
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}

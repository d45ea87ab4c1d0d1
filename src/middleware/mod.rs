// ABOUTME: HTTP middleware for request tracing, request ids and CORS
// ABOUTME: Layers wrapped around every route of the analytics server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

/// CORS configuration
pub mod cors;

/// Request id generation and per-request spans
pub mod request_tracing;

pub use cors::setup_cors;
pub use request_tracing::{
    create_request_span, propagate_request_id_layer, request_id_of, set_request_id_layer,
    trace_layer, MakeRequestIdentifier,
};

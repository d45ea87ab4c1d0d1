// ABOUTME: Configuration management module for server settings and analytics parameters
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Configuration module for the Stepcoin server
//!
//! - **Environment**: server, CORS and analytics settings read from environment variables
//!
//! Analytics tunables themselves ([`stepcoin_analytics::AnalyticsConfig`]) live in the
//! analytics crate; this module only decides which values the server feeds it.

/// Environment and server configuration
pub mod environment;

pub use environment::{AnalyticsSettings, CorsConfig, Environment, ServerConfig};

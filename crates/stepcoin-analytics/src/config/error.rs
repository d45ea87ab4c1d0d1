// ABOUTME: Configuration error types for analytics engine validation
// ABOUTME: Defines error variants for invalid ranges and non-positive multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Configuration error types for analytics engine validation.

use stepcoin_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., zero clusters)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Multiplier or weight is not a finite positive number
    #[error("Invalid multiplier: {0}")]
    InvalidMultiplier(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config_invalid(error.to_string())
    }
}

// ABOUTME: Core types and constants for the Stepcoin wellness analytics platform
// ABOUTME: Foundation crate with error handling, typed user records, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

#![deny(unsafe_code)]

//! # Stepcoin Core
//!
//! Foundation crate providing shared types and constants for the Stepcoin
//! wellness platform. The analytics engine and the server crate both build on
//! it, so it is kept small and free of I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Analytics, scheduling, and server constants organized by domain
//! - **models**: Raw and normalized user records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (`RawUserRecord`, `UserRecord`, `Metric`)
pub mod models;

// ABOUTME: Core data models for the Stepcoin analytics platform
// ABOUTME: Re-exports the raw and normalized user records and the metric enumeration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! # Data Models
//!
//! `RawUserRecord` mirrors one row of the user snapshot exactly as the source
//! delivers it (every column a string). `UserRecord` is the typed shape the
//! analytics pipeline works on; the only place that turns one into the other
//! is the loader in `stepcoin-analytics`.

mod user;

pub use user::{FeatureVector, Metric, RawUserRecord, UserRecord};

// ABOUTME: Re-exports command modules for stepcoin-cli
// ABOUTME: Provides the report and summary commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

pub mod report;
pub mod summary;

use stepcoin_server::analytics::AnalyticsReport;
use stepcoin_server::errors::AppResult;
use stepcoin_server::service::AnalyticsService;

/// Compute a report, honouring an optional seed override
async fn compute(service: &AnalyticsService, seed: Option<u64>) -> AppResult<AnalyticsReport> {
    match seed {
        Some(seed) => service.report_with_seed(seed).await,
        None => service.report().await,
    }
}

// ABOUTME: Report command for stepcoin-cli
// ABOUTME: Writes the analytics report JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use stepcoin_server::errors::AppResult;
use stepcoin_server::service::AnalyticsService;
use tracing::info;

/// Print the analytics report as JSON
pub async fn run(service: &AnalyticsService, seed: Option<u64>, pretty: bool) -> AppResult<()> {
    let report = super::compute(service, seed).await?;
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    info!(users = report.summary.total_users, "report written");
    Ok(())
}

// ABOUTME: Summary command for stepcoin-cli
// ABOUTME: Prints a text overview of the population instead of the full report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::helpers::display::{
    display_clusters, display_outliers, display_population, display_teams, display_top_engagement,
};
use stepcoin_server::errors::AppResult;
use stepcoin_server::service::AnalyticsService;

/// Print the population summary
pub async fn run(service: &AnalyticsService, seed: Option<u64>) -> AppResult<()> {
    let report = super::compute(service, seed).await?;

    display_population(&report, &service.source());
    display_clusters(&report);
    display_teams(&report);
    display_top_engagement(&report);
    display_outliers(&report);
    Ok(())
}

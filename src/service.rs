// ABOUTME: Analytics service wiring a snapshot repository to the analytics engine
// ABOUTME: Loads, normalizes and analyses one snapshot per request on a blocking task
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::sources::UserRepository;
use std::sync::Arc;
use stepcoin_analytics::{load_users, AnalyticsConfig, AnalyticsEngine, AnalyticsReport};
use stepcoin_core::errors::{AppError, AppResult};
use tokio::task;
use tracing::{info, warn};

/// Computes reports from whatever repository it was given
///
/// Holds no analytics state between calls; every report is recomputed from
/// a fresh snapshot.
#[derive(Clone)]
pub struct AnalyticsService {
    repository: Arc<dyn UserRepository>,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    /// Create a service over `repository`
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>, config: AnalyticsConfig) -> Self {
        Self { repository, config }
    }

    /// Default analytics configuration
    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Description of the backing repository
    #[must_use]
    pub fn source(&self) -> String {
        self.repository.describe()
    }

    /// Compute a report with the configured seed
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be loaded
    pub async fn report(&self) -> AppResult<AnalyticsReport> {
        self.report_with(self.config.clone()).await
    }

    /// Compute a report with an explicit clustering seed
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be loaded
    pub async fn report_with_seed(&self, seed: u64) -> AppResult<AnalyticsReport> {
        self.report_with(self.config.clone().with_seed(seed)).await
    }

    /// Load the snapshot without analysing it and return its row count
    ///
    /// # Errors
    ///
    /// Returns the repository error when the snapshot cannot be loaded
    pub async fn probe(&self) -> AppResult<usize> {
        Ok(self.repository.load_snapshot().await?.len())
    }

    async fn report_with(&self, config: AnalyticsConfig) -> AppResult<AnalyticsReport> {
        let rows = self.repository.load_snapshot().await.inspect_err(|e| {
            warn!(source = %self.repository.describe(), error = %e, "failed to load users snapshot");
        })?;

        let report = task::spawn_blocking(move || {
            let users = load_users(&rows);
            AnalyticsEngine::new(config).run(&users)
        })
        .await
        .map_err(|e| AppError::internal(format!("Analytics task failed: {e}")))?;

        info!(
            source = %self.repository.describe(),
            users = report.summary.total_users,
            teams = report.summary.total_teams,
            "analytics report ready"
        );
        Ok(report)
    }
}

// ABOUTME: Pipeline entry point running statistics, clustering, scoring and recommendations
// ABOUTME: Injectable clustering strategy and clock so report runs are reproducible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::aggregator::Aggregator;
use crate::clustering::{ClusteringStrategy, KMeans};
use crate::config::AnalyticsConfig;
use crate::deadline::DeadlineScheduler;
use crate::recommendation::RecommendationEngine;
use crate::report::{AnalyticsReport, ClusteringMetadata, EnrichedUser};
use crate::scoring::{engagement_percentiles, ScoringEngine};
use crate::similarity::nearest_neighbors;
use crate::statistics::PopulationStatistics;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Instant;
use stepcoin_core::constants::clustering::FEATURE_DIMENSIONS;
use stepcoin_core::models::{FeatureVector, UserRecord};
use tracing::field::Empty;
use tracing::{info, info_span};

/// Compute the report with the default configuration and today's date
#[must_use]
pub fn compute_analytics(users: &[UserRecord]) -> AnalyticsReport {
    AnalyticsEngine::new(AnalyticsConfig::default()).run(users)
}

/// Analytics pipeline over one user snapshot
///
/// Each [`run`](Self::run) is a pure function of its input, the
/// configuration, the clustering strategy and the clock. With both
/// [`with_today`](Self::with_today) and
/// [`with_generated_at`](Self::with_generated_at) pinned, repeated runs over
/// the same snapshot serialize identically.
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    strategy: Box<dyn ClusteringStrategy>,
    today: Option<NaiveDate>,
    generated_at: Option<DateTime<Utc>>,
}

impl AnalyticsEngine {
    /// Create an engine using k-means configured from `config.clustering`
    #[must_use]
    pub fn new(config: AnalyticsConfig) -> Self {
        let strategy = Box::new(KMeans::from_config(&config.clustering));
        Self {
            config,
            strategy,
            today: None,
            generated_at: None,
        }
    }

    /// Replace the clustering algorithm
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn ClusteringStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Pin the date deadlines are counted from
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Pin the report timestamp; deadlines count from its date unless
    /// [`with_today`](Self::with_today) is also set
    #[must_use]
    pub const fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Run the full pipeline
    #[must_use]
    pub fn run(&self, users: &[UserRecord]) -> AnalyticsReport {
        let span = info_span!(
            "analytics_run",
            users = users.len(),
            iterations = Empty,
            elapsed_ms = Empty
        );
        let _guard = span.enter();
        let started = Instant::now();

        let statistics = PopulationStatistics::compute(users);
        let points: Vec<FeatureVector> = users.iter().map(UserRecord::features).collect();
        let assignment = self.strategy.cluster(&points);

        let scoring = ScoringEngine::new(&self.config.scoring, &statistics);
        let scores: Vec<_> = users.iter().map(|user| scoring.score(user)).collect();
        let engagement: Vec<f64> = scores.iter().map(|score| score.engagement_index).collect();
        let percentiles = engagement_percentiles(&engagement);
        let neighbors = nearest_neighbors(&points);

        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        let today = self.today.unwrap_or_else(|| generated_at.date_naive());
        let recommender = RecommendationEngine::new(&self.config.recommendation);
        let scheduler = DeadlineScheduler::new(&self.config.deadline, today);

        let enriched: Vec<EnrichedUser> = users
            .iter()
            .enumerate()
            .map(|(position, user)| {
                let cluster = assignment.labels.get(position).copied().unwrap_or(0);
                let centroid = assignment
                    .centroids
                    .get(cluster)
                    .copied()
                    .unwrap_or([f64::NAN; FEATURE_DIMENSIONS]);
                let score = scores[position];
                let percentile = percentiles[position];

                let recommendation = recommender.recommend(user, score.engagement_index, &centroid);
                let deadline = scheduler.schedule(
                    score.activity_consistency,
                    percentile,
                    recommendation.target_value,
                    recommendation.current_value,
                );
                let neighbor = neighbors[position];

                EnrichedUser {
                    record: user.clone(),
                    cluster,
                    engagement_index: score.engagement_index,
                    activity_consistency: score.activity_consistency,
                    z_scores: score.z_scores,
                    is_outlier: score.is_outlier,
                    engagement_percentile: percentile,
                    primary_challenge: recommendation.primary_challenge,
                    recommended_steps: recommendation.recommended_steps,
                    recommended_pushups: recommendation.recommended_pushups,
                    recommended_squats: recommendation.recommended_squats,
                    challenge_description: recommendation.challenge_description,
                    challenge_deadline: deadline.date,
                    deadline_days: deadline.days,
                    deadline_reason: deadline.reason,
                    similar_user: neighbor.map(|found| users[found.index].username.clone()),
                    similar_user_distance: neighbor.map(|found| found.distance),
                }
            })
            .collect();

        let metadata = ClusteringMetadata {
            k: self.strategy.k(),
            seed: self.strategy.seed(),
            iterations: assignment.iterations,
            converged: assignment.converged,
        };

        let report = Aggregator::new(self.config.top_n).assemble(
            enriched,
            &assignment,
            statistics,
            metadata,
            generated_at,
        );

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        span.record("iterations", assignment.iterations);
        span.record("elapsed_ms", elapsed_ms);
        info!(
            users = users.len(),
            clusters = metadata.k,
            iterations = assignment.iterations,
            converged = assignment.converged,
            outliers = report.top_performers.outliers.len(),
            elapsed_ms,
            "analytics report computed"
        );

        report
    }
}

// ABOUTME: Per-user scoring: engagement index, activity consistency and z-score outliers
// ABOUTME: Also ranks engagement into population percentiles for the deadline scheduler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness
#![allow(clippy::cast_precision_loss)] // Safe: population sizes are far below 2^52

use crate::config::{EngagementWeights, ScoringConfig};
use crate::statistics::{population_std_dev, PopulationStatistics};
use serde::{Deserialize, Serialize};
use stepcoin_core::models::{Metric, UserRecord};

/// Z-score of each metric against the population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricZScores {
    /// Step count z-score
    pub stepcount: f64,
    /// Pushup z-score
    pub pushup: f64,
    /// Squat z-score
    pub squat: f64,
    /// Balance z-score
    pub balance: f64,
}

impl MetricZScores {
    /// Z-scores in feature-vector order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.stepcount, self.pushup, self.squat, self.balance]
    }
}

/// Scores derived for one user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserScores {
    /// Weighted sum of the raw metrics
    pub engagement_index: f64,
    /// `1 / (1 + stddev(steps, pushups, squats))`, in (0, 1]
    pub activity_consistency: f64,
    /// Per-metric z-scores
    pub z_scores: MetricZScores,
    /// Any metric beyond the outlier threshold
    pub is_outlier: bool,
}

/// Engagement index: weighted sum of raw metrics, no cross-metric normalization
#[must_use]
pub fn engagement_index(user: &UserRecord, weights: &EngagementWeights) -> f64 {
    weights.steps.mul_add(
        user.stepcount,
        weights.pushups.mul_add(
            user.pushup,
            weights
                .squats
                .mul_add(user.squat, weights.balance * user.balance),
        ),
    )
}

/// Activity consistency across steps, pushups and squats (balance excluded)
#[must_use]
pub fn activity_consistency(user: &UserRecord) -> f64 {
    let spread = population_std_dev(&[user.stepcount, user.pushup, user.squat]);
    1.0 / (1.0 + spread)
}

/// Per-metric z-scores; 0 for a metric whose population spread is 0
#[must_use]
pub fn z_scores(user: &UserRecord, statistics: &PopulationStatistics) -> MetricZScores {
    let z = |metric: Metric| statistics.get(metric).z_score(user.metric(metric));
    MetricZScores {
        stepcount: z(Metric::Steps),
        pushup: z(Metric::Pushups),
        squat: z(Metric::Squats),
        balance: z(Metric::Balance),
    }
}

/// Fraction of the population whose engagement index is `<=` each user's
///
/// A `NaN` index compares false against everything and ranks at 0.
#[must_use]
pub fn engagement_percentiles(indices: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = indices.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    let population = indices.len() as f64;

    indices
        .iter()
        .map(|&index| {
            if index.is_nan() {
                return 0.0;
            }
            sorted.partition_point(|&other| other <= index) as f64 / population
        })
        .collect()
}

/// Scores users against precomputed population statistics
pub struct ScoringEngine<'a> {
    config: &'a ScoringConfig,
    statistics: &'a PopulationStatistics,
}

impl<'a> ScoringEngine<'a> {
    /// Create a scoring engine
    #[must_use]
    pub const fn new(config: &'a ScoringConfig, statistics: &'a PopulationStatistics) -> Self {
        Self { config, statistics }
    }

    /// Score a single user
    #[must_use]
    pub fn score(&self, user: &UserRecord) -> UserScores {
        let z_scores = z_scores(user, self.statistics);
        let threshold = self.config.outlier_z_threshold;

        UserScores {
            engagement_index: engagement_index(user, &self.config.weights),
            activity_consistency: activity_consistency(user),
            z_scores,
            is_outlier: z_scores.as_array().iter().any(|z| z.abs() > threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_index_weights() {
        let user = UserRecord::new("ada", 1000.0, 50.0, 50.0, 100.0);
        let index = engagement_index(&user, &EngagementWeights::default());
        // 400 + 10 + 10 + 20
        assert!((index - 440.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_activity_is_fully_consistent() {
        let user = UserRecord::new("ada", 30.0, 30.0, 30.0, 9999.0);
        assert!((activity_consistency(&user) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consistency_stays_in_unit_interval() {
        let user = UserRecord::new("ada", 20_000.0, 0.0, 3.0, 0.0);
        let consistency = activity_consistency(&user);
        assert!(consistency > 0.0 && consistency < 1.0);
    }

    #[test]
    fn test_percentiles_count_ties_inclusively() {
        let percentiles = engagement_percentiles(&[10.0, 20.0, 20.0, 40.0]);
        assert_eq!(percentiles, vec![0.25, 0.75, 0.75, 1.0]);
    }

    #[test]
    fn test_nan_engagement_ranks_at_zero() {
        let percentiles = engagement_percentiles(&[f64::NAN, 5.0]);
        assert!(percentiles[0].abs() < f64::EPSILON);
        assert!((percentiles[1] - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outlier_flag_uses_threshold() {
        let mut users: Vec<UserRecord> = (0..30)
            .map(|i| {
                let steps = f64::from(i % 2).mul_add(100.0, 5000.0);
                UserRecord::new(format!("u{i}"), steps, 20.0, 20.0, 50.0)
            })
            .collect();
        users.push(UserRecord::new("spike", 50_000.0, 20.0, 20.0, 50.0));

        let statistics = PopulationStatistics::compute(&users);
        let config = ScoringConfig::default();
        let engine = ScoringEngine::new(&config, &statistics);

        assert!(engine.score(&users[30]).is_outlier);
        assert!(!engine.score(&users[0]).is_outlier);
        // pushup, squat and balance have no spread
        assert!(engine.score(&users[30]).z_scores.pushup.abs() < f64::EPSILON);
    }
}

// ABOUTME: Analytics engine configuration for clustering, scoring, recommendations and deadlines
// ABOUTME: Defaults reproduce the fixed business rules; validate() guards hand-built configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Analytics Engine Configuration
//!
//! Every tunable of the pipeline lives here so tests and callers can pin the
//! clustering seed or swap thresholds without touching the algorithms. The
//! [`Default`] implementations are the production rules.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use stepcoin_core::constants::{clustering, deadline, recommendation, report, scoring};

/// Top-level analytics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// K-means parameters
    pub clustering: ClusteringConfig,
    /// Engagement weights and outlier threshold
    pub scoring: ScoringConfig,
    /// Target multipliers
    pub recommendation: RecommendationConfig,
    /// Deadline base and bounds
    pub deadline: DeadlineConfig,
    /// Size of the engagement and consistency leaderboards
    pub top_n: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            clustering: ClusteringConfig::default(),
            scoring: ScoringConfig::default(),
            recommendation: RecommendationConfig::default(),
            deadline: DeadlineConfig::default(),
            top_n: report::TOP_PERFORMERS,
        }
    }
}

impl AnalyticsConfig {
    /// Replace the clustering seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.clustering.seed = seed;
        self
    }

    /// Replace the centroid initialization
    #[must_use]
    pub const fn with_init(mut self, init: CentroidInit) -> Self {
        self.clustering.init = init;
        self
    }

    /// Check the configuration for values the pipeline cannot work with
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clustering.k == 0 {
            return Err(ConfigError::InvalidRange("clustering.k must be at least 1"));
        }
        if self.clustering.max_iterations == 0 {
            return Err(ConfigError::InvalidRange(
                "clustering.max_iterations must be at least 1",
            ));
        }
        if self.deadline.base_days == 0 {
            return Err(ConfigError::InvalidRange("deadline.base_days must be positive"));
        }
        if self.deadline.min_days > self.deadline.max_days {
            return Err(ConfigError::InvalidRange(
                "deadline.min_days must not exceed deadline.max_days",
            ));
        }

        let weights = &self.scoring.weights;
        let multipliers = [
            (weights.steps, "scoring.weights.steps"),
            (weights.pushups, "scoring.weights.pushups"),
            (weights.squats, "scoring.weights.squats"),
            (weights.balance, "scoring.weights.balance"),
            (self.scoring.outlier_z_threshold, "scoring.outlier_z_threshold"),
            (self.recommendation.step_multiplier, "recommendation.step_multiplier"),
            (
                self.recommendation.strength_multiplier,
                "recommendation.strength_multiplier",
            ),
            (
                self.recommendation.overall_multiplier,
                "recommendation.overall_multiplier",
            ),
        ];
        for (value, name) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier(name));
            }
        }

        Ok(())
    }
}

/// How initial centroids are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidInit {
    /// Sample `k` distinct users with a ChaCha RNG seeded from the config
    #[default]
    Seeded,
    /// Sort users by feature vector and take evenly spaced ones
    SortedSpread,
}

impl FromStr for CentroidInit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seeded" | "random" => Ok(Self::Seeded),
            "sorted" | "sorted_spread" => Ok(Self::SortedSpread),
            other => Err(ConfigError::Parse(format!(
                "unknown centroid initialization '{other}' (expected 'seeded' or 'sorted')"
            ))),
        }
    }
}

/// K-means parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Number of clusters
    pub k: usize,
    /// RNG seed for [`CentroidInit::Seeded`]
    pub seed: u64,
    /// Lloyd iteration cap
    pub max_iterations: usize,
    /// Centroid initialization
    pub init: CentroidInit,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: clustering::DEFAULT_CLUSTER_COUNT,
            seed: clustering::DEFAULT_SEED,
            max_iterations: clustering::DEFAULT_MAX_ITERATIONS,
            init: CentroidInit::Seeded,
        }
    }
}

/// Engagement index weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementWeights {
    /// Weight for steps
    pub steps: f64,
    /// Weight for pushups
    pub pushups: f64,
    /// Weight for squats
    pub squats: f64,
    /// Weight for stepcoin balance
    pub balance: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            steps: scoring::STEP_WEIGHT,
            pushups: scoring::PUSHUP_WEIGHT,
            squats: scoring::SQUAT_WEIGHT,
            balance: scoring::BALANCE_WEIGHT,
        }
    }
}

/// Scoring engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Engagement index weights
    pub weights: EngagementWeights,
    /// Absolute z-score above which a user is an outlier
    pub outlier_z_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: EngagementWeights::default(),
            outlier_z_threshold: scoring::OUTLIER_Z_THRESHOLD,
        }
    }
}

/// Recommendation multipliers applied to cluster averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Steps target multiplier
    pub step_multiplier: f64,
    /// Pushup and squat target multiplier
    pub strength_multiplier: f64,
    /// Engagement multiplier for the overall challenge
    pub overall_multiplier: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            step_multiplier: recommendation::STEP_MULTIPLIER,
            strength_multiplier: recommendation::STRENGTH_MULTIPLIER,
            overall_multiplier: recommendation::OVERALL_MULTIPLIER,
        }
    }
}

/// Deadline base and clamp bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineConfig {
    /// Deadline before multipliers
    pub base_days: u32,
    /// Lower clamp
    pub min_days: u32,
    /// Upper clamp
    pub max_days: u32,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            base_days: deadline::BASE_DAYS,
            min_days: deadline::MIN_DAYS,
            max_days: deadline::MAX_DAYS,
        }
    }
}

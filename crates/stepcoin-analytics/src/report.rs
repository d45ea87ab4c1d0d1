// ABOUTME: Output types of the analytics pipeline, serialized as the report JSON
// ABOUTME: Enriched users, clusters, team rollups, leaderboards and run metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Report types
//!
//! These structs are serialize-only: non-finite values (from malformed input
//! rows) are written as JSON `null`, which cannot be read back into `f64`.

use crate::recommendation::ChallengeKind;
use crate::scoring::MetricZScores;
use crate::statistics::PopulationStatistics;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use stepcoin_core::models::{FeatureVector, UserRecord};

/// A user record with every derived score attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedUser {
    /// Original record (password omitted on serialization)
    #[serde(flatten)]
    pub record: UserRecord,
    /// Assigned cluster id
    pub cluster: usize,
    /// Weighted sum of the raw metrics
    pub engagement_index: f64,
    /// Uniformity of steps, pushups and squats, in (0, 1]
    pub activity_consistency: f64,
    /// Per-metric z-scores
    pub z_scores: MetricZScores,
    /// Any z-score beyond the outlier threshold
    pub is_outlier: bool,
    /// Fraction of the population with an engagement index at or below this user's
    pub engagement_percentile: f64,
    /// Selected challenge
    pub primary_challenge: ChallengeKind,
    /// Step target
    pub recommended_steps: f64,
    /// Pushup target
    pub recommended_pushups: f64,
    /// Squat target
    pub recommended_squats: f64,
    /// Human-readable challenge
    pub challenge_description: String,
    /// Deadline date (`YYYY-MM-DD`)
    pub challenge_deadline: NaiveDate,
    /// Days until the deadline
    pub deadline_days: u32,
    /// Explanation of the deadline factors
    pub deadline_reason: String,
    /// Username of the nearest other user
    pub similar_user: Option<String>,
    /// Euclidean distance to `similar_user`
    pub similar_user_distance: Option<f64>,
}

impl EnrichedUser {
    /// Username shortcut
    #[must_use]
    pub fn username(&self) -> &str {
        &self.record.username
    }
}

/// One behavioral cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster id, `0..k`
    pub cluster_id: usize,
    /// Mean `[stepcount, pushup, squat, balance]` of the members
    pub centroid: FeatureVector,
    /// Number of members
    pub user_count: usize,
}

/// Per-team averages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    /// Team name (`"None"` for users without a team)
    pub team: String,
    /// Number of members
    pub member_count: usize,
    /// Mean step count
    pub avg_stepcount: f64,
    /// Mean pushups
    pub avg_pushup: f64,
    /// Mean squats
    pub avg_squat: f64,
    /// Mean balance
    pub avg_balance: f64,
    /// Mean engagement index
    pub avg_engagement: f64,
}

/// Compact leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedUser {
    /// Username
    pub username: String,
    /// Team
    pub team: String,
    /// Cluster id
    pub cluster: usize,
    /// Engagement index
    pub engagement_index: f64,
    /// Activity consistency
    pub activity_consistency: f64,
    /// Outlier flag
    pub is_outlier: bool,
}

impl From<&EnrichedUser> for RankedUser {
    fn from(user: &EnrichedUser) -> Self {
        Self {
            username: user.record.username.clone(),
            team: user.record.team.clone(),
            cluster: user.cluster,
            engagement_index: user.engagement_index,
            activity_consistency: user.activity_consistency,
            is_outlier: user.is_outlier,
        }
    }
}

/// Leaderboards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformers {
    /// Highest engagement index first
    pub by_engagement: Vec<RankedUser>,
    /// Highest activity consistency first
    pub by_consistency: Vec<RankedUser>,
    /// Every outlier, in input order
    pub outliers: Vec<RankedUser>,
}

/// Population-level summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    /// Number of users analysed
    pub total_users: usize,
    /// Number of distinct teams
    pub total_teams: usize,
    /// Pearson correlation between balance and step count
    pub correlation_balance_steps: f64,
    /// Every cluster, including empty ones
    pub clusters: Vec<Cluster>,
}

/// How the clustering step went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusteringMetadata {
    /// Number of clusters
    pub k: usize,
    /// Seed used for initialization, if any
    pub seed: Option<u64>,
    /// Assignment passes performed
    pub iterations: usize,
    /// Whether assignments stabilized before the cap
    pub converged: bool,
}

/// Final output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// Population summary
    pub summary: PopulationSummary,
    /// Every user in input order
    pub users: Vec<EnrichedUser>,
    /// Team rollups sorted by team name
    pub teams: Vec<TeamSummary>,
    /// Leaderboards
    pub top_performers: TopPerformers,
    /// Per-metric descriptive statistics
    pub statistics: PopulationStatistics,
    /// Clustering run metadata
    pub clustering: ClusteringMetadata,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

impl AnalyticsReport {
    /// Find an enriched user by username
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&EnrichedUser> {
        self.users.iter().find(|user| user.username() == username)
    }
}

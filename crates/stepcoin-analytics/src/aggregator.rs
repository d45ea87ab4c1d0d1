// ABOUTME: Final aggregation stage assembling team rollups, leaderboards and the report
// ABOUTME: Also computes the balance/steps correlation and per-cluster member counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::clustering::ClusterAssignment;
use crate::report::{
    AnalyticsReport, Cluster, ClusteringMetadata, EnrichedUser, PopulationSummary, RankedUser,
    TeamSummary, TopPerformers,
};
use crate::statistics::{descending, mean, pearson_correlation, PopulationStatistics};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Group users by team, sorted by team name
#[must_use]
pub fn team_summaries(users: &[EnrichedUser]) -> Vec<TeamSummary> {
    let mut teams: BTreeMap<&str, Vec<&EnrichedUser>> = BTreeMap::new();
    for user in users {
        teams.entry(user.record.team.as_str()).or_default().push(user);
    }

    teams
        .into_iter()
        .map(|(team, members)| {
            let average = |value: fn(&EnrichedUser) -> f64| {
                let values: Vec<f64> = members.iter().map(|member| value(member)).collect();
                mean(&values)
            };
            TeamSummary {
                team: team.to_owned(),
                member_count: members.len(),
                avg_stepcount: average(|user| user.record.stepcount),
                avg_pushup: average(|user| user.record.pushup),
                avg_squat: average(|user| user.record.squat),
                avg_balance: average(|user| user.record.balance),
                avg_engagement: average(|user| user.engagement_index),
            }
        })
        .collect()
}

/// Engagement and consistency top lists plus every outlier
#[must_use]
pub fn top_performers(users: &[EnrichedUser], top_n: usize) -> TopPerformers {
    let ranked = |key: fn(&EnrichedUser) -> f64| -> Vec<RankedUser> {
        let mut sorted: Vec<&EnrichedUser> = users.iter().collect();
        sorted.sort_by(|a, b| descending(key(a), key(b)));
        sorted.into_iter().take(top_n).map(RankedUser::from).collect()
    };

    TopPerformers {
        by_engagement: ranked(|user| user.engagement_index),
        by_consistency: ranked(|user| user.activity_consistency),
        outliers: users
            .iter()
            .filter(|user| user.is_outlier)
            .map(RankedUser::from)
            .collect(),
    }
}

/// One `Cluster` per centroid, empty clusters included
#[must_use]
pub fn cluster_summaries(assignment: &ClusterAssignment) -> Vec<Cluster> {
    assignment
        .centroids
        .iter()
        .zip(assignment.sizes())
        .enumerate()
        .map(|(cluster_id, (centroid, user_count))| Cluster {
            cluster_id,
            centroid: *centroid,
            user_count,
        })
        .collect()
}

/// Pearson correlation between balance and step count
#[must_use]
pub fn balance_step_correlation(users: &[EnrichedUser]) -> f64 {
    let balances: Vec<f64> = users.iter().map(|user| user.record.balance).collect();
    let steps: Vec<f64> = users.iter().map(|user| user.record.stepcount).collect();
    pearson_correlation(&balances, &steps)
}

/// Builds the final report from the per-user results
pub struct Aggregator {
    top_n: usize,
}

impl Aggregator {
    /// Create an aggregator producing leaderboards of `top_n` entries
    #[must_use]
    pub const fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Assemble the report
    #[must_use]
    pub fn assemble(
        &self,
        users: Vec<EnrichedUser>,
        assignment: &ClusterAssignment,
        statistics: PopulationStatistics,
        clustering: ClusteringMetadata,
        generated_at: DateTime<Utc>,
    ) -> AnalyticsReport {
        let teams = team_summaries(&users);
        let summary = PopulationSummary {
            total_users: users.len(),
            total_teams: teams.len(),
            correlation_balance_steps: balance_step_correlation(&users),
            clusters: cluster_summaries(assignment),
        };

        AnalyticsReport {
            summary,
            top_performers: top_performers(&users, self.top_n),
            users,
            teams,
            statistics,
            clustering,
            generated_at,
        }
    }
}

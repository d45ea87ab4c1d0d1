// ABOUTME: Output formatting helpers for stepcoin-cli
// ABOUTME: Renders report sections as aligned plain-text tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use stepcoin_server::analytics::AnalyticsReport;

const RULE_WIDTH: usize = 72;

fn heading(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Population size, source and clustering run
pub fn display_population(report: &AnalyticsReport, source: &str) {
    heading("POPULATION");
    println!("   Source:        {source}");
    println!("   Users:         {}", report.summary.total_users);
    println!("   Teams:         {}", report.summary.total_teams);
    println!(
        "   Balance/steps correlation: {:.3}",
        report.summary.correlation_balance_steps
    );
    println!(
        "   Clustering:    k={} seed={} iterations={} converged={}",
        report.clustering.k,
        report
            .clustering
            .seed
            .map_or_else(|| "-".to_owned(), |seed| seed.to_string()),
        report.clustering.iterations,
        report.clustering.converged
    );
    println!("   Generated:     {}", report.generated_at.format("%Y-%m-%d %H:%M UTC"));
}

/// Cluster sizes and centroids
pub fn display_clusters(report: &AnalyticsReport) {
    heading("CLUSTERS");
    println!(
        "   {:>2}  {:>6}  {:>10}  {:>8}  {:>8}  {:>10}",
        "id", "users", "steps", "pushups", "squats", "balance"
    );
    for cluster in &report.summary.clusters {
        let [steps, pushups, squats, balance] = cluster.centroid;
        println!(
            "   {:>2}  {:>6}  {steps:>10.1}  {pushups:>8.1}  {squats:>8.1}  {balance:>10.1}",
            cluster.cluster_id, cluster.user_count
        );
    }
}

/// Team averages
pub fn display_teams(report: &AnalyticsReport) {
    heading("TEAMS");
    for team in &report.teams {
        println!(
            "   {:<20} members={:<4} engagement={:.3}",
            team.team, team.member_count, team.avg_engagement
        );
    }
}

/// Engagement leaderboard
pub fn display_top_engagement(report: &AnalyticsReport) {
    heading("TOP ENGAGEMENT");
    for (rank, user) in report.top_performers.by_engagement.iter().enumerate() {
        println!(
            "   {:>2}. {:<20} {:<16} {:.3}",
            rank + 1,
            user.username,
            user.team,
            user.engagement_index
        );
    }
}

/// Users flagged as statistical outliers
pub fn display_outliers(report: &AnalyticsReport) {
    heading("OUTLIERS");
    if report.top_performers.outliers.is_empty() {
        println!("   none");
        return;
    }
    for user in &report.top_performers.outliers {
        println!("   {:<20} cluster={} team={}", user.username, user.cluster, user.team);
    }
}

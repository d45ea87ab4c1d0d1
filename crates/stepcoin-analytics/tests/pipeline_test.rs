// ABOUTME: Integration tests for the analytics pipeline through its public entry points
// ABOUTME: Checks population-level guarantees on synthetic and hand-built snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stepcoin_analytics::{
    compute_analytics, load_users, AnalyticsConfig, AnalyticsEngine, AnalyticsReport, CentroidInit,
};
use stepcoin_analytics::recommendation::ChallengeKind;
use stepcoin_core::models::{RawUserRecord, UserRecord};

const TEAMS: [&str; 4] = ["Falcons", "Otters", "Wolves", "None"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()
}

/// Reproducible population with a realistic spread of activity
fn synthetic_population(size: usize, seed: u64) -> Vec<UserRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            UserRecord::new(
                format!("user{i:03}"),
                rng.gen_range(500.0_f64..15_000.0).round(),
                rng.gen_range(0.0_f64..120.0).round(),
                rng.gen_range(0.0_f64..150.0).round(),
                rng.gen_range(0.0_f64..2_000.0).round(),
            )
            .with_team(TEAMS[i % TEAMS.len()])
        })
        .collect()
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 12, 8, 0, 0).unwrap()
}

fn run(users: &[UserRecord], config: AnalyticsConfig) -> AnalyticsReport {
    AnalyticsEngine::new(config)
        .with_today(today())
        .with_generated_at(generated_at())
        .run(users)
}

fn ladder() -> Vec<UserRecord> {
    (1..=8)
        .map(|i| UserRecord::new(format!("rung{i}"), f64::from(i) * 1000.0, 20.0, 20.0, 100.0))
        .collect()
}

#[test]
fn test_seeded_runs_are_identical() {
    let users = synthetic_population(120, 9);
    let first = run(&users, AnalyticsConfig::default().with_seed(1234));
    let second = run(&users, AnalyticsConfig::default().with_seed(1234));

    assert_eq!(first.generated_at, generated_at());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_every_user_belongs_to_one_cluster() {
    let users = synthetic_population(75, 3);
    for seed in [0, 1, 42, 999] {
        let report = run(&users, AnalyticsConfig::default().with_seed(seed));
        assert_eq!(report.summary.clusters.len(), 4);
        assert!(report.users.iter().all(|user| user.cluster < 4));
        let total: usize = report
            .summary
            .clusters
            .iter()
            .map(|cluster| cluster.user_count)
            .sum();
        assert_eq!(total, users.len());
    }
}

#[test]
fn test_per_user_bounds_hold() {
    let users = synthetic_population(200, 17);
    let report = run(&users, AnalyticsConfig::default());

    for (user, enriched) in users.iter().zip(&report.users) {
        assert!(enriched.activity_consistency > 0.0 && enriched.activity_consistency <= 1.0);
        assert!((7..=60).contains(&enriched.deadline_days));
        assert!(enriched.recommended_steps >= user.stepcount);
        assert!(enriched.recommended_pushups >= user.pushup);
        assert!(enriched.recommended_squats >= user.squat);
        assert_ne!(enriched.similar_user.as_deref(), Some(user.username.as_str()));
        assert!(enriched.engagement_percentile > 0.0 && enriched.engagement_percentile <= 1.0);
    }
}

#[test]
fn test_ten_sigma_user_is_outlier_and_mean_user_is_not() {
    let base: Vec<UserRecord> = (0..48)
        .map(|i| {
            let steps = if i % 2 == 0 { 4000.0 } else { 6000.0 };
            UserRecord::new(format!("u{i}"), steps, 25.0, 25.0, 300.0)
        })
        .collect();

    // base mean 5000, stddev 1000
    let mut with_spike = base.clone();
    with_spike.push(UserRecord::new("spike", 15_000.0, 25.0, 25.0, 300.0));
    let report = run(&with_spike, AnalyticsConfig::default());
    assert!(report.user("spike").unwrap().is_outlier);
    assert_eq!(report.top_performers.outliers.len(), 1);
    assert_eq!(report.top_performers.outliers[0].username, "spike");

    let mut with_average = base;
    with_average.push(UserRecord::new("average", 5000.0, 25.0, 25.0, 300.0));
    let report = run(&with_average, AnalyticsConfig::default());
    let average = report.user("average").unwrap();
    assert!(!average.is_outlier);
    assert!(average.z_scores.stepcount.abs() < 1e-12);
}

#[test]
fn test_identical_stepcounts_give_zero_z_scores() {
    let users: Vec<UserRecord> = (0..10)
        .map(|i| UserRecord::new(format!("u{i}"), 7000.0, f64::from(i), 10.0, 50.0))
        .collect();
    let report = compute_analytics(&users);

    assert!(report.statistics.stepcount.std_dev.abs() < f64::EPSILON);
    for user in &report.users {
        assert!(user.z_scores.stepcount.abs() < f64::EPSILON);
    }
}

#[test]
fn test_ladder_statistics_and_even_split() {
    let users = ladder();
    let report = run(
        &users,
        AnalyticsConfig::default().with_init(CentroidInit::SortedSpread),
    );

    let steps = report.statistics.stepcount;
    assert!((steps.mean - 4500.0).abs() < 1e-9);
    assert!((steps.std_dev - 5_250_000.0_f64.sqrt()).abs() < 1e-9);
    assert!((steps.median - 4500.0).abs() < 1e-9);

    let sizes: Vec<usize> = report
        .summary
        .clusters
        .iter()
        .map(|cluster| cluster.user_count)
        .collect();
    assert_eq!(sizes, vec![2, 2, 2, 2]);
    assert_eq!(report.clustering.seed, None);
}

#[test]
fn test_ladder_with_seeded_init_does_not_fail() {
    let report = run(&ladder(), AnalyticsConfig::default());
    assert_eq!(report.users.len(), 8);
    assert!(report.users.iter().all(|user| user.cluster < 4));
    assert_eq!(report.clustering.seed, Some(42));
}

#[test]
fn test_identical_twins_are_each_others_match() {
    let users = vec![
        UserRecord::new("twin_a", 6400.0, 30.0, 35.0, 410.0),
        UserRecord::new("loner", 12_000.0, 90.0, 80.0, 1500.0),
        UserRecord::new("twin_b", 6400.0, 30.0, 35.0, 410.0),
    ];
    let report = compute_analytics(&users);

    let a = report.user("twin_a").unwrap();
    let b = report.user("twin_b").unwrap();
    assert_eq!(a.similar_user.as_deref(), Some("twin_b"));
    assert_eq!(b.similar_user.as_deref(), Some("twin_a"));
    assert!(a.similar_user_distance.unwrap().abs() < f64::EPSILON);
}

#[test]
fn test_single_user_population() {
    let users = vec![UserRecord::new("solo", 5000.0, 20.0, 20.0, 100.0)];
    let report = run(&users, AnalyticsConfig::default());

    let solo = &report.users[0];
    assert_eq!(solo.cluster, 0);
    assert_eq!(solo.similar_user, None);
    assert!(!solo.is_outlier);
    assert_eq!(report.summary.clusters.len(), 4);
    assert_eq!(report.summary.clusters[0].user_count, 1);
    assert!(report.summary.correlation_balance_steps.abs() < f64::EPSILON);
}

#[test]
fn test_empty_population_reports_no_data() {
    let report = compute_analytics(&[]);

    assert_eq!(report.summary.total_users, 0);
    assert!(report.users.is_empty());
    assert!(report.teams.is_empty());
    assert!(report.statistics.stepcount.mean.is_nan());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["statistics"]["stepcount"]["mean"].is_null());
}

#[test]
fn test_malformed_rows_propagate_instead_of_failing() {
    let rows = vec![
        RawUserRecord {
            username: "ok".into(),
            balance: "120".into(),
            stepcount: "6000".into(),
            pushup: "20".into(),
            squat: "30".into(),
            ..RawUserRecord::default()
        },
        RawUserRecord {
            username: "broken".into(),
            balance: "lots".into(),
            stepcount: "".into(),
            pushup: "20".into(),
            squat: "30".into(),
            team: "Otters".into(),
            ..RawUserRecord::default()
        },
    ];
    let users = load_users(&rows);
    let report = run(&users, AnalyticsConfig::default());

    assert_eq!(report.users.len(), 2);
    assert_eq!(report.user("ok").unwrap().record.team, "None");
    let broken = report.user("broken").unwrap();
    assert!(broken.engagement_index.is_nan());
    assert_eq!(broken.cluster, 0);
    assert!((7..=60).contains(&broken.deadline_days));
    assert!(broken.recommended_steps.is_nan());
    assert!(broken.recommended_pushups.is_finite());
    assert!(report.statistics.stepcount.mean.is_nan());
}

/// Four pairs where the second member is ahead of the first on every metric
fn leapfrog_pairs() -> Vec<UserRecord> {
    (1..=4)
        .flat_map(|i| {
            let scale = f64::from(i);
            [
                UserRecord::new(
                    format!("steady{i}"),
                    scale * 10_000.0,
                    scale * 100.0,
                    scale * 100.0,
                    scale * 1_000.0,
                ),
                UserRecord::new(
                    format!("ahead{i}"),
                    scale * 11_000.0,
                    scale * 120.0,
                    scale * 130.0,
                    scale * 1_050.0,
                ),
            ]
        })
        .collect()
}

#[test]
fn test_user_ahead_of_centroid_on_every_metric_gets_overall() {
    let report = run(
        &leapfrog_pairs(),
        AnalyticsConfig::default().with_init(CentroidInit::SortedSpread),
    );
    assert!(report.summary.clusters.iter().all(|cluster| cluster.user_count == 2));

    for i in 1..=4 {
        let ahead = report.user(&format!("ahead{i}")).unwrap();
        let centroid = report.summary.clusters[ahead.cluster].centroid;
        assert!(ahead
            .record
            .features()
            .iter()
            .zip(centroid)
            .all(|(value, average)| *value > average));
        assert_eq!(ahead.primary_challenge, ChallengeKind::Overall);
        assert!(ahead.challenge_description.starts_with("Overall challenge"));

        let steady = report.user(&format!("steady{i}")).unwrap();
        assert_eq!(steady.cluster, ahead.cluster);
        assert_eq!(steady.primary_challenge, ChallengeKind::Squats);
    }
}

#[test]
fn test_report_json_shape() {
    let mut users = synthetic_population(12, 5);
    users[0].password = "hunter2".into();
    let report = run(&users, AnalyticsConfig::default());
    let json = serde_json::to_value(&report).unwrap();

    let cluster = &json["summary"]["clusters"][0];
    assert!(cluster["clusterId"].is_u64());
    assert!(cluster["userCount"].is_u64());
    assert_eq!(cluster["centroid"].as_array().unwrap().len(), 4);

    let user = &json["users"][0];
    assert_eq!(user["username"], "user000");
    assert!(user.get("password").is_none());
    assert!(user["challenge_deadline"]
        .as_str()
        .unwrap()
        .starts_with("2025-"));
    assert!(["steps", "pushups", "squats", "overall"]
        .contains(&user["primary_challenge"].as_str().unwrap()));
    assert!(json["generated_at"].is_string());
    assert_eq!(json["clustering"]["k"], 4);
}

#[test]
fn test_top_performers_are_bounded_and_sorted() {
    let users = synthetic_population(40, 21);
    let report = run(&users, AnalyticsConfig::default());

    let by_engagement = &report.top_performers.by_engagement;
    assert_eq!(by_engagement.len(), 10);
    assert!(by_engagement
        .windows(2)
        .all(|pair| pair[0].engagement_index >= pair[1].engagement_index));

    let by_consistency = &report.top_performers.by_consistency;
    assert_eq!(by_consistency.len(), 10);
    assert!(by_consistency
        .windows(2)
        .all(|pair| pair[0].activity_consistency >= pair[1].activity_consistency));

    assert_eq!(report.summary.total_teams, 4);
    let members: usize = report.teams.iter().map(|team| team.member_count).sum();
    assert_eq!(members, 40);
}

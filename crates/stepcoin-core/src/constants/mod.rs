// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for clustering, scoring, recommendations, deadlines and serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Constants module
//!
//! Constants are grouped by the pipeline stage that consumes them. The
//! analytics configuration uses them as defaults, so changing a value here
//! changes the behavior of every report computed with `AnalyticsConfig::default()`.

/// Clustering engine defaults
pub mod clustering {
    /// Number of behavioral clusters
    pub const DEFAULT_CLUSTER_COUNT: usize = 4;
    /// Lloyd iteration cap
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;
    /// Seed used for centroid initialization when none is configured
    pub const DEFAULT_SEED: u64 = 42;
    /// Dimensionality of the feature vector (stepcount, pushup, squat, balance)
    pub const FEATURE_DIMENSIONS: usize = 4;
}

/// Scoring engine weights and thresholds
pub mod scoring {
    /// Engagement weight for steps
    pub const STEP_WEIGHT: f64 = 0.4;
    /// Engagement weight for pushups
    pub const PUSHUP_WEIGHT: f64 = 0.2;
    /// Engagement weight for squats
    pub const SQUAT_WEIGHT: f64 = 0.2;
    /// Engagement weight for stepcoin balance
    pub const BALANCE_WEIGHT: f64 = 0.2;
    /// Absolute z-score above which a metric marks a user as an outlier
    pub const OUTLIER_Z_THRESHOLD: f64 = 3.0;
}

/// Recommendation engine multipliers
pub mod recommendation {
    /// Steps target relative to the cluster average
    pub const STEP_MULTIPLIER: f64 = 1.15;
    /// Pushup and squat targets relative to the cluster average
    pub const STRENGTH_MULTIPLIER: f64 = 1.10;
    /// Engagement target for the `overall` challenge
    pub const OVERALL_MULTIPLIER: f64 = 1.2;
}

/// Deadline scheduler bounds and factor tables
pub mod deadline {
    /// Starting deadline before multipliers
    pub const BASE_DAYS: u32 = 30;
    /// Shortest deadline ever assigned
    pub const MIN_DAYS: u32 = 7;
    /// Longest deadline ever assigned
    pub const MAX_DAYS: u32 = 60;

    /// Consistency score above which the deadline shrinks
    pub const HIGH_CONSISTENCY: f64 = 0.7;
    /// Consistency score above which the deadline is left unchanged
    pub const MODERATE_CONSISTENCY: f64 = 0.5;

    /// Engagement percentile thresholds, highest first
    pub const PERCENTILE_TOP: f64 = 0.8;
    /// Upper-middle percentile threshold
    pub const PERCENTILE_UPPER: f64 = 0.6;
    /// Median percentile threshold
    pub const PERCENTILE_MIDDLE: f64 = 0.4;

    /// Relative target gap considered a stretch goal
    pub const GAP_LARGE: f64 = 0.5;
    /// Relative target gap considered demanding
    pub const GAP_MEDIUM: f64 = 0.3;
    /// Relative target gap considered modest
    pub const GAP_SMALL: f64 = 0.1;
}

/// Report assembly
pub mod report {
    /// Size of the engagement and consistency leaderboards
    pub const TOP_PERFORMERS: usize = 10;
}

/// Record normalization defaults
pub mod records {
    /// Team assigned to users without one
    pub const DEFAULT_TEAM: &str = "None";
    /// Expected CSV header, in order
    pub const CSV_COLUMNS: [&str; 9] = [
        "username",
        "balance",
        "stepcount",
        "pushup",
        "squat",
        "team",
        "email",
        "transactions",
        "password",
    ];
}

/// Service identity and network defaults
pub mod service {
    /// Service name used in structured logs
    pub const SERVICE_NAME: &str = "stepcoin-server";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default location of the user snapshot
    pub const DEFAULT_USERS_CSV: &str = "data/users.csv";
    /// Header carrying the request ID
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// API routes
pub mod routes {
    /// Analytics report endpoint
    pub const ANALYTICS: &str = "/api/analytics";
    /// Liveness endpoint
    pub const HEALTH: &str = "/health";
    /// Readiness endpoint
    pub const READY: &str = "/ready";
}

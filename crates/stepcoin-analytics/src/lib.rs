// ABOUTME: Wellness analytics engine segmenting a user snapshot into behavioral clusters
// ABOUTME: Scores engagement, recommends challenges with adaptive deadlines, finds similar users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

#![deny(unsafe_code)]

//! # Stepcoin Analytics
//!
//! Single-pass batch pipeline over a snapshot of user records:
//!
//! 1. **loader**: coerce raw rows into typed records
//! 2. **statistics**: per-metric mean, min, max, median and population stddev
//! 3. **clustering**: k-means (k = 4) on `[stepcount, pushup, squat, balance]`
//! 4. **scoring**: engagement index, activity consistency and z-score outliers
//! 5. **recommendation**: primary challenge relative to the cluster centroid
//! 6. **deadline**: personalized 7-60 day deadlines
//! 7. **similarity**: nearest neighbour per user
//! 8. **aggregator**: team rollups, leaderboards and the final report
//!
//! Nothing here performs I/O. Malformed metric values become `NaN` and are
//! carried through to the report instead of failing the run.
//!
//! ```
//! use stepcoin_analytics::compute_analytics;
//! use stepcoin_core::models::UserRecord;
//!
//! let users = vec![
//!     UserRecord::new("ada", 8000.0, 30.0, 40.0, 250.0),
//!     UserRecord::new("bob", 3000.0, 10.0, 5.0, 90.0),
//! ];
//! let report = compute_analytics(&users);
//! assert_eq!(report.summary.total_users, 2);
//! assert_eq!(report.users[0].similar_user.as_deref(), Some("bob"));
//! ```

/// Team rollups, leaderboards and report assembly
pub mod aggregator;

/// K-means behind the `ClusteringStrategy` trait
pub mod clustering;

/// Tunables for every pipeline stage
pub mod config;

/// Adaptive deadline scheduling
pub mod deadline;

/// Pipeline entry points
pub mod engine;

/// Raw row normalization
pub mod loader;

/// Challenge recommendations
pub mod recommendation;

/// Report output types
pub mod report;

/// Engagement, consistency and outlier scoring
pub mod scoring;

/// Nearest-neighbour search
pub mod similarity;

/// Descriptive statistics
pub mod statistics;

pub use clustering::{ClusterAssignment, ClusteringStrategy, KMeans};
pub use config::{AnalyticsConfig, CentroidInit, ConfigError};
pub use engine::{compute_analytics, AnalyticsEngine};
pub use loader::load_users;
pub use report::{AnalyticsReport, Cluster, EnrichedUser, TeamSummary};

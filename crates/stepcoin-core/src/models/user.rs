// ABOUTME: User record models for the analytics snapshot
// ABOUTME: RawUserRecord (string columns), UserRecord (typed metrics), and Metric definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::constants::records::DEFAULT_TEAM;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature vector used by clustering and similarity search:
/// `[stepcount, pushup, squat, balance]` on raw scale
pub type FeatureVector = [f64; 4];

/// One row of the user snapshot, exactly as the source provides it
///
/// Columns missing from the source deserialize as empty strings so that a
/// partial export still loads; the loader decides what empty means for each
/// field.
///
/// # Examples
///
/// ```rust
/// use stepcoin_core::models::RawUserRecord;
///
/// let raw = RawUserRecord {
///     username: "ada".into(),
///     stepcount: "8421".into(),
///     ..RawUserRecord::default()
/// };
/// assert!(raw.team.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUserRecord {
    /// Login name, unique per user
    pub username: String,
    /// Stepcoin balance
    pub balance: String,
    /// Total logged steps
    pub stepcount: String,
    /// Total logged pushups
    pub pushup: String,
    /// Total logged squats
    pub squat: String,
    /// Team name, possibly blank
    pub team: String,
    /// Contact address, possibly blank
    pub email: String,
    /// Serialized transaction history, passed through untouched
    pub transactions: String,
    /// Credential column, never analysed and never reported
    pub password: String,
}

/// A normalized user record
///
/// Numeric fields hold `NaN` when the source value was malformed; the
/// pipeline lets that propagate instead of rejecting the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Login name, unique per user
    pub username: String,
    /// Stepcoin balance
    pub balance: f64,
    /// Total logged steps
    pub stepcount: f64,
    /// Total logged pushups
    pub pushup: f64,
    /// Total logged squats
    pub squat: f64,
    /// Team name, `"None"` when the user has no team
    pub team: String,
    /// Contact address
    pub email: String,
    /// Serialized transaction history
    pub transactions: String,
    /// Credential column
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl UserRecord {
    /// Build a record with the given metrics and empty passthrough fields
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        stepcount: f64,
        pushup: f64,
        squat: f64,
        balance: f64,
    ) -> Self {
        Self {
            username: username.into(),
            balance,
            stepcount,
            pushup,
            squat,
            team: String::from(DEFAULT_TEAM),
            email: String::new(),
            transactions: String::new(),
            password: String::new(),
        }
    }

    /// Assign the user to a team
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    /// Raw-scale feature vector `[stepcount, pushup, squat, balance]`
    #[must_use]
    pub const fn features(&self) -> FeatureVector {
        [self.stepcount, self.pushup, self.squat, self.balance]
    }

    /// Value of a single metric
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Steps => self.stepcount,
            Metric::Pushups => self.pushup,
            Metric::Squats => self.squat,
            Metric::Balance => self.balance,
        }
    }
}

/// The four analysed metrics, in feature-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Step count
    Steps,
    /// Pushup count
    Pushups,
    /// Squat count
    Squats,
    /// Stepcoin balance
    Balance,
}

impl Metric {
    /// All metrics in feature-vector order
    pub const ALL: [Self; 4] = [Self::Steps, Self::Pushups, Self::Squats, Self::Balance];

    /// Position of this metric in a [`FeatureVector`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Steps => 0,
            Self::Pushups => 1,
            Self::Squats => 2,
            Self::Balance => 3,
        }
    }

    /// Name of the source column holding this metric
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Steps => "stepcount",
            Self::Pushups => "pushup",
            Self::Squats => "squat",
            Self::Balance => "balance",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Steps => "steps",
            Self::Pushups => "pushups",
            Self::Squats => "squats",
            Self::Balance => "balance",
        };
        f.write_str(label)
    }
}

// ABOUTME: Adaptive challenge deadline scheduling from consistency, engagement rank and difficulty
// ABOUTME: Multiplies a 30-day base by three factors, rounds, and clamps to [7, 60] days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness
#![allow(clippy::cast_possible_truncation)] // Safe: rounded day counts are clamped right after
#![allow(clippy::cast_sign_loss)] // Safe: clamp lower bound is non-negative

use crate::config::DeadlineConfig;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use stepcoin_core::constants::deadline::{
    GAP_LARGE, GAP_MEDIUM, GAP_SMALL, HIGH_CONSISTENCY, MODERATE_CONSISTENCY, PERCENTILE_MIDDLE,
    PERCENTILE_TOP, PERCENTILE_UPPER,
};

/// The three independent factors behind a deadline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadlineFactors {
    /// Multiplier from activity consistency
    pub consistency_multiplier: f64,
    /// Multiplier from engagement percentile
    pub engagement_multiplier: f64,
    /// Multiplier from the relative size of the target
    pub difficulty_multiplier: f64,
    /// Relative distance between target and current value
    pub target_gap: f64,
}

impl DeadlineFactors {
    /// Product of the three multipliers
    #[must_use]
    pub fn combined(&self) -> f64 {
        self.consistency_multiplier * self.engagement_multiplier * self.difficulty_multiplier
    }
}

/// Scheduled deadline for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    /// Days from today, within the configured bounds
    pub days: u32,
    /// Calendar date of the deadline
    pub date: NaiveDate,
    /// Human-readable explanation citing every factor
    pub reason: String,
    /// Factors used
    pub factors: DeadlineFactors,
}

/// Consistent users earn shorter deadlines
#[must_use]
pub fn consistency_multiplier(consistency: f64) -> f64 {
    if consistency > HIGH_CONSISTENCY {
        0.8
    } else if consistency > MODERATE_CONSISTENCY {
        1.0
    } else {
        1.3
    }
}

/// Highly engaged users earn shorter deadlines
#[must_use]
pub fn engagement_multiplier(percentile: f64) -> f64 {
    if percentile > PERCENTILE_TOP {
        0.7
    } else if percentile > PERCENTILE_UPPER {
        0.9
    } else if percentile > PERCENTILE_MIDDLE {
        1.0
    } else {
        1.2
    }
}

/// Relative gap between a target and the current value (denominator 1 when current is 0)
#[must_use]
pub fn target_gap(target: f64, current: f64) -> f64 {
    let denominator = if current == 0.0 { 1.0 } else { current };
    (target - current) / denominator
}

/// Bigger stretches get more time
#[must_use]
pub fn difficulty_multiplier(gap: f64) -> f64 {
    if gap > GAP_LARGE {
        1.4
    } else if gap > GAP_MEDIUM {
        1.2
    } else if gap > GAP_SMALL {
        1.0
    } else {
        0.8
    }
}

/// Assigns deadlines relative to a fixed "today"
pub struct DeadlineScheduler<'a> {
    config: &'a DeadlineConfig,
    today: NaiveDate,
}

impl<'a> DeadlineScheduler<'a> {
    /// Create a scheduler anchored at `today`
    #[must_use]
    pub const fn new(config: &'a DeadlineConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    /// Schedule a deadline
    #[must_use]
    pub fn schedule(
        &self,
        consistency: f64,
        engagement_percentile: f64,
        target: f64,
        current: f64,
    ) -> Deadline {
        let gap = target_gap(target, current);
        let factors = DeadlineFactors {
            consistency_multiplier: consistency_multiplier(consistency),
            engagement_multiplier: engagement_multiplier(engagement_percentile),
            difficulty_multiplier: difficulty_multiplier(gap),
            target_gap: gap,
        };

        let raw_days = f64::from(self.config.base_days) * factors.combined();
        let days = (raw_days.round() as i64)
            .clamp(i64::from(self.config.min_days), i64::from(self.config.max_days))
            as u32;

        let date = self
            .today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        let reason = format!(
            "consistency {consistency:.2} (x{:.1}), engagement percentile {:.0}% (x{:.1}), \
             target gap {:.0}% (x{:.1}): {} days x {:.2} = {days} days",
            factors.consistency_multiplier,
            engagement_percentile * 100.0,
            factors.engagement_multiplier,
            gap * 100.0,
            factors.difficulty_multiplier,
            self.config.base_days,
            factors.combined(),
        );

        Deadline {
            days,
            date,
            reason,
            factors,
        }
    }
}

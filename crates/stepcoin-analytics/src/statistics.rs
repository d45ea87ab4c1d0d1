// ABOUTME: Descriptive statistics over the user population
// ABOUTME: Mean, min, max, median, population stddev, z-scores and Pearson correlation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness
#![allow(clippy::cast_precision_loss)] // Safe: population sizes are far below 2^52

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use stepcoin_core::models::{Metric, UserRecord};

/// Summary statistics for one metric
///
/// Every field is `NaN` for an empty population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Median (average of the two middle values for even counts)
    pub median: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Compute statistics over a slice of values
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                median: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        Self {
            mean: mean(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            median: median(values),
            std_dev: population_std_dev(values),
        }
    }

    /// Z-score of a value against these statistics, 0 when the spread is 0
    #[must_use]
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }
}

/// Per-metric statistics across the population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStatistics {
    /// Step count statistics
    pub stepcount: DescriptiveStats,
    /// Pushup statistics
    pub pushup: DescriptiveStats,
    /// Squat statistics
    pub squat: DescriptiveStats,
    /// Balance statistics
    pub balance: DescriptiveStats,
}

impl PopulationStatistics {
    /// Compute statistics for all four metrics
    #[must_use]
    pub fn compute(users: &[UserRecord]) -> Self {
        let column = |metric: Metric| -> DescriptiveStats {
            let values: Vec<f64> = users.iter().map(|user| user.metric(metric)).collect();
            DescriptiveStats::from_values(&values)
        };

        Self {
            stepcount: column(Metric::Steps),
            pushup: column(Metric::Pushups),
            squat: column(Metric::Squats),
            balance: column(Metric::Balance),
        }
    }

    /// Statistics of a single metric
    #[must_use]
    pub const fn get(&self, metric: Metric) -> &DescriptiveStats {
        match metric {
            Metric::Steps => &self.stepcount,
            Metric::Pushups => &self.pushup,
            Metric::Squats => &self.squat,
            Metric::Balance => &self.balance,
        }
    }
}

/// Arithmetic mean; `NaN` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; `NaN` for an empty slice
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let len = sorted.len();
    if len % 2 == 0 {
        f64::midpoint(sorted[len / 2 - 1], sorted[len / 2])
    } else {
        sorted[len / 2]
    }
}

/// Population standard deviation (divides by N, not N - 1)
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient, 0 when either variable has no variance
#[must_use]
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let (covariance, var_x, var_y) =
        xs.iter()
            .zip(ys)
            .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (x, y)| {
                let dx = x - mean_x;
                let dy = y - mean_y;
                (dx.mul_add(dy, cov), dx.mul_add(dx, vx), dy.mul_add(dy, vy))
            });

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    covariance / (var_x * var_y).sqrt()
}

/// Ordering for descending leaderboards: `NaN` sorts last
#[must_use]
pub fn descending(a: f64, b: f64) -> Ordering {
    let key = |value: f64| if value.is_nan() { f64::NEG_INFINITY } else { value };
    key(b).total_cmp(&key(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptive_stats_basic() {
        let stats = DescriptiveStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert!((stats.median - 4.5).abs() < 1e-12);
        assert!((stats.min - 2.0).abs() < f64::EPSILON);
        assert!((stats.max - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_odd_median() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_population_is_nan_not_panic() {
        let stats = DescriptiveStats::from_values(&[]);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.std_dev.is_nan());
        assert!(stats.min.is_nan());
    }

    #[test]
    fn test_zero_spread_z_score_is_zero() {
        let stats = DescriptiveStats::from_values(&[5.0, 5.0, 5.0]);
        assert!(stats.z_score(5.0).abs() < f64::EPSILON);
        assert!(stats.z_score(500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nan_propagates_into_mean() {
        let stats = DescriptiveStats::from_values(&[1.0, f64::NAN, 3.0]);
        assert!(stats.mean.is_nan());
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_pearson_perfect_and_degenerate() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 20.0, 30.0, 40.0];
        let inverse = [4.0, 3.0, 2.0, 1.0];
        assert!((pearson_correlation(&xs, &ys) - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&xs, &inverse) + 1.0).abs() < 1e-12);
        assert!(pearson_correlation(&xs, &[7.0; 4]).abs() < f64::EPSILON);
        assert!(pearson_correlation(&[], &[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_descending_puts_nan_last() {
        let mut values = vec![1.0, f64::NAN, 3.0, 2.0];
        values.sort_by(|a, b| descending(*a, *b));
        assert!((values[0] - 3.0).abs() < f64::EPSILON);
        assert!(values[3].is_nan());
    }
}

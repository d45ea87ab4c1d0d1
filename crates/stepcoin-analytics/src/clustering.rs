// ABOUTME: Behavioral clustering of users with Lloyd's k-means behind a strategy trait
// ABOUTME: Seeded or sorted-spread centroid initialization for reproducible assignments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness
#![allow(clippy::cast_precision_loss)] // Safe: cluster member counts are small

//! Clustering engine
//!
//! Users are clustered on the raw `[stepcount, pushup, squat, balance]`
//! vector with squared Euclidean distance. Features are not normalized, so
//! the large-magnitude metrics (balance, steps) dominate the distance.
//!
//! Assignment ties go to the lowest cluster id and `NaN` distances never win,
//! which makes every run with the same seed reproducible and puts users with
//! malformed metrics into cluster 0. A cluster that loses all its members
//! keeps its previous centroid. When `k` exceeds the number of users the
//! surplus centroids duplicate existing ones and stay empty.

use crate::config::{CentroidInit, ClusteringConfig};
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use stepcoin_core::constants::clustering::FEATURE_DIMENSIONS;
use stepcoin_core::models::FeatureVector;
use tracing::debug;

/// Result of clustering a set of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Cluster id per input point, in input order
    pub labels: Vec<usize>,
    /// Final centroid per cluster
    pub centroids: Vec<FeatureVector>,
    /// Assignment passes performed
    pub iterations: usize,
    /// Whether assignments stabilized before the iteration cap
    pub converged: bool,
}

impl ClusterAssignment {
    /// Number of points assigned to each cluster
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            if let Some(size) = sizes.get_mut(label) {
                *size += 1;
            }
        }
        sizes
    }
}

/// Swappable clustering algorithm
pub trait ClusteringStrategy: Send + Sync {
    /// Number of clusters produced
    fn k(&self) -> usize;

    /// Seed driving initialization, when the strategy uses one
    fn seed(&self) -> Option<u64>;

    /// Partition the points into `k()` clusters
    fn cluster(&self, points: &[FeatureVector]) -> ClusterAssignment;
}

/// Lloyd's k-means
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeans {
    k: usize,
    seed: u64,
    max_iterations: usize,
    init: CentroidInit,
}

impl KMeans {
    /// Create a seeded k-means with the default iteration cap
    #[must_use]
    pub fn new(k: usize, seed: u64) -> Self {
        Self::from_config(&ClusteringConfig {
            k,
            seed,
            ..ClusteringConfig::default()
        })
    }

    /// Create from clustering configuration
    #[must_use]
    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self {
            k: config.k.max(1),
            seed: config.seed,
            max_iterations: config.max_iterations.max(1),
            init: config.init,
        }
    }

    /// Override the iteration cap
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Override the centroid initialization
    #[must_use]
    pub const fn with_init(mut self, init: CentroidInit) -> Self {
        self.init = init;
        self
    }

    fn initial_centroids(&self, points: &[FeatureVector]) -> Vec<FeatureVector> {
        let n = points.len();
        if n == 0 {
            return vec![[0.0; FEATURE_DIMENSIONS]; self.k];
        }

        let order: Vec<usize> = match self.init {
            CentroidInit::Seeded => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                index::sample(&mut rng, n, self.k.min(n)).into_vec()
            }
            CentroidInit::SortedSpread => {
                let mut sorted: Vec<usize> = (0..n).collect();
                sorted.sort_by(|&a, &b| compare_vectors(&points[a], &points[b]));
                if self.k <= n {
                    (0..self.k).map(|i| sorted[i * n / self.k]).collect()
                } else {
                    sorted
                }
            }
        };

        (0..self.k).map(|i| points[order[i % order.len()]]).collect()
    }
}

impl ClusteringStrategy for KMeans {
    fn k(&self) -> usize {
        self.k
    }

    fn seed(&self) -> Option<u64> {
        match self.init {
            CentroidInit::Seeded => Some(self.seed),
            CentroidInit::SortedSpread => None,
        }
    }

    fn cluster(&self, points: &[FeatureVector]) -> ClusterAssignment {
        let mut centroids = self.initial_centroids(points);
        let mut labels = vec![usize::MAX; points.len()];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let mut changed = false;
            for (label, point) in labels.iter_mut().zip(points) {
                let nearest = nearest_centroid(point, &centroids);
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            update_centroids(points, &labels, &mut centroids);
        }

        debug!(
            points = points.len(),
            k = self.k,
            iterations,
            converged,
            "k-means finished"
        );

        ClusterAssignment {
            labels,
            centroids,
            iterations,
            converged,
        }
    }
}

/// Squared Euclidean distance
#[must_use]
pub fn squared_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Index of the closest centroid; ties and `NaN` resolve to the lowest index
#[must_use]
pub fn nearest_centroid(point: &FeatureVector, centroids: &[FeatureVector]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (position, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best = position;
            best_distance = distance;
        }
    }
    best
}

fn update_centroids(points: &[FeatureVector], labels: &[usize], centroids: &mut [FeatureVector]) {
    let mut sums = vec![[0.0; FEATURE_DIMENSIONS]; centroids.len()];
    let mut counts = vec![0_usize; centroids.len()];

    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for (sum, value) in sums[label].iter_mut().zip(point) {
            *sum += value;
        }
    }

    for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
        if count == 0 {
            continue;
        }
        for (coordinate, total) in centroid.iter_mut().zip(sum) {
            *coordinate = total / count as f64;
        }
    }
}

fn compare_vectors(a: &FeatureVector, b: &FeatureVector) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

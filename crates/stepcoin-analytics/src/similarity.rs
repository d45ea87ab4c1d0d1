// ABOUTME: Nearest-neighbour search over the raw feature vectors
// ABOUTME: Brute-force all pairs, self excluded, first minimum wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use crate::clustering::squared_distance;
use stepcoin_core::models::FeatureVector;

/// Closest other point to one user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the neighbour in the input slice
    pub index: usize,
    /// Euclidean distance to the neighbour
    pub distance: f64,
}

/// Find the nearest neighbour of every point
///
/// Quadratic in the number of points. A point has no neighbour when it is
/// alone or when no distance to it is finite.
#[must_use]
pub fn nearest_neighbors(points: &[FeatureVector]) -> Vec<Option<Neighbor>> {
    points
        .iter()
        .enumerate()
        .map(|(own, point)| {
            let mut best = None;
            let mut best_distance = f64::INFINITY;
            for (other, candidate) in points.iter().enumerate() {
                if other == own {
                    continue;
                }
                let distance = squared_distance(point, candidate).sqrt();
                if distance < best_distance {
                    best_distance = distance;
                    best = Some(other);
                }
            }
            best.map(|index| Neighbor {
                index,
                distance: best_distance,
            })
        })
        .collect()
}

// ABOUTME: Personalized challenge recommendations relative to the user's behavioral cluster
// ABOUTME: Picks the metric furthest below the cluster centroid and sets non-regressing targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Recommendation engine
//!
//! Each user is compared with the centroid of the cluster they were assigned
//! to. The normalized gap `(centroid - user) / centroid` (denominator 1 when
//! the centroid value is 0) is computed for all four metrics and the largest
//! one selects the primary challenge. Gaps are scanned in feature order with
//! a strict `>`, so the first maximum wins; when that maximum is the balance
//! slot, is shared by several metrics, or no gap is comparable (`NaN`), the
//! challenge is `overall` and targets a 20% higher engagement index. A user
//! who is not behind the centroid on any metric (largest gap `<= 0`) also
//! gets `overall`.

use crate::config::RecommendationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use stepcoin_core::models::{FeatureVector, Metric, UserRecord};

/// Kind of challenge assigned to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Increase daily steps
    Steps,
    /// Increase pushups
    Pushups,
    /// Increase squats
    Squats,
    /// Raise the engagement index as a whole
    Overall,
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Steps => "steps",
            Self::Pushups => "pushups",
            Self::Squats => "squats",
            Self::Overall => "overall",
        };
        f.write_str(label)
    }
}

/// Recommendation derived for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Selected challenge
    pub primary_challenge: ChallengeKind,
    /// Step target, never below the current step count
    pub recommended_steps: f64,
    /// Pushup target, never below the current pushup count
    pub recommended_pushups: f64,
    /// Squat target, never below the current squat count
    pub recommended_squats: f64,
    /// Target for the primary challenge
    pub target_value: f64,
    /// Current value of whatever the primary challenge measures
    pub current_value: f64,
    /// Normalized gaps in feature order
    pub gaps: [f64; 4],
    /// Templated sentence describing the challenge
    pub challenge_description: String,
}

/// Normalized shortfall of a user value below the cluster average
#[must_use]
pub fn normalized_gap(centroid_value: f64, user_value: f64) -> f64 {
    let denominator = if centroid_value == 0.0 {
        1.0
    } else {
        centroid_value
    };
    (centroid_value - user_value) / denominator
}

/// Choose the primary challenge from gaps in feature order
#[must_use]
pub fn primary_challenge(gaps: &[f64; 4]) -> ChallengeKind {
    let mut winner = None;
    let mut largest = f64::NEG_INFINITY;
    for (position, &gap) in gaps.iter().enumerate() {
        if gap > largest {
            largest = gap;
            winner = Some(position);
        }
    }

    let tied = gaps.iter().filter(|&&gap| gap == largest).count() > 1;
    if largest <= 0.0 {
        return ChallengeKind::Overall;
    }
    match winner {
        Some(0) if !tied => ChallengeKind::Steps,
        Some(1) if !tied => ChallengeKind::Pushups,
        Some(2) if !tied => ChallengeKind::Squats,
        _ => ChallengeKind::Overall,
    }
}

/// Target that is `multiplier` above the cluster average but never below `current`
///
/// A `NaN` current value yields a `NaN` target.
fn lift(current: f64, cluster_average: f64, multiplier: f64) -> f64 {
    if current.is_nan() {
        return f64::NAN;
    }
    (cluster_average * multiplier).max(current)
}

/// Builds recommendations from cluster centroids
pub struct RecommendationEngine<'a> {
    config: &'a RecommendationConfig,
}

impl<'a> RecommendationEngine<'a> {
    /// Create a recommendation engine
    #[must_use]
    pub const fn new(config: &'a RecommendationConfig) -> Self {
        Self { config }
    }

    /// Recommend a challenge for `user` given its cluster centroid
    #[must_use]
    pub fn recommend(
        &self,
        user: &UserRecord,
        engagement_index: f64,
        centroid: &FeatureVector,
    ) -> Recommendation {
        let features = user.features();
        let gaps = [0, 1, 2, 3].map(|i| normalized_gap(centroid[i], features[i]));
        let primary_challenge = primary_challenge(&gaps);

        let average = |metric: Metric| centroid[metric.index()];
        let recommended_steps = lift(
            user.stepcount,
            average(Metric::Steps),
            self.config.step_multiplier,
        );
        let recommended_pushups = lift(
            user.pushup,
            average(Metric::Pushups),
            self.config.strength_multiplier,
        );
        let recommended_squats = lift(
            user.squat,
            average(Metric::Squats),
            self.config.strength_multiplier,
        );

        let (target_value, current_value) = match primary_challenge {
            ChallengeKind::Steps => (recommended_steps, user.stepcount),
            ChallengeKind::Pushups => (recommended_pushups, user.pushup),
            ChallengeKind::Squats => (recommended_squats, user.squat),
            ChallengeKind::Overall => (
                engagement_index * self.config.overall_multiplier,
                engagement_index,
            ),
        };

        let challenge_description = describe(primary_challenge, target_value, current_value);

        Recommendation {
            primary_challenge,
            recommended_steps,
            recommended_pushups,
            recommended_squats,
            target_value,
            current_value,
            gaps,
            challenge_description,
        }
    }
}

fn describe(kind: ChallengeKind, target: f64, current: f64) -> String {
    match kind {
        ChallengeKind::Steps => format!(
            "Step challenge: reach {target:.0} steps (currently {current:.0}) to catch up with your cluster"
        ),
        ChallengeKind::Pushups => format!(
            "Pushup challenge: reach {target:.0} pushups (currently {current:.0}) to catch up with your cluster"
        ),
        ChallengeKind::Squats => format!(
            "Squat challenge: reach {target:.0} squats (currently {current:.0}) to catch up with your cluster"
        ),
        ChallengeKind::Overall => format!(
            "Overall challenge: raise your engagement index from {current:.0} to {target:.0}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_config() -> RecommendationConfig {
        RecommendationConfig::default()
    }

    #[test]
    fn test_largest_gap_selects_metric() {
        assert_eq!(primary_challenge(&[0.1, 0.5, 0.2, 0.0]), ChallengeKind::Pushups);
        assert_eq!(primary_challenge(&[0.6, 0.5, 0.2, 0.0]), ChallengeKind::Steps);
        assert_eq!(primary_challenge(&[-0.1, -0.3, 0.05, -0.2]), ChallengeKind::Squats);
    }

    #[test]
    fn test_no_shortfall_means_overall() {
        assert_eq!(
            primary_challenge(&[-0.167, -0.25, -0.25, -1.0]),
            ChallengeKind::Overall
        );
        assert_eq!(primary_challenge(&[0.0, -0.2, -0.1, -0.3]), ChallengeKind::Overall);
    }

    #[test]
    fn test_user_ahead_of_cluster_gets_overall_challenge() {
        let config = engine_config();
        let engine = RecommendationEngine::new(&config);
        let user = UserRecord::new("ada", 7000.0, 50.0, 50.0, 200.0);
        let centroid = [6000.0, 40.0, 40.0, 100.0];

        let recommendation = engine.recommend(&user, 2870.0, &centroid);

        assert_eq!(recommendation.primary_challenge, ChallengeKind::Overall);
        assert!((recommendation.target_value - 3444.0).abs() < 1e-9);
        assert!((recommendation.current_value - 2870.0).abs() < f64::EPSILON);
        assert!(recommendation.challenge_description.starts_with("Overall challenge"));
    }

    #[test]
    fn test_targets_keep_fractional_cluster_lift() {
        let config = engine_config();
        let engine = RecommendationEngine::new(&config);
        let user = UserRecord::new("ada", 1000.0, 5.0, 5.0, 10.0);
        let centroid = [13_000.0 / 3.0, 40.0, 40.0, 100.0];

        let recommendation = engine.recommend(&user, 400.0, &centroid);

        assert!((recommendation.recommended_steps - 13_000.0 / 3.0 * 1.15).abs() < 1e-9);
        assert!(recommendation.recommended_steps.fract() > 0.3);
    }

    #[test]
    fn test_nan_metric_yields_nan_target() {
        let config = engine_config();
        let engine = RecommendationEngine::new(&config);
        let user = UserRecord::new("ada", 4000.0, f64::NAN, 10.0, 100.0);
        let centroid = [6000.0, 40.0, 40.0, 100.0];

        let recommendation = engine.recommend(&user, 1000.0, &centroid);

        assert!(recommendation.recommended_pushups.is_nan());
        assert!(recommendation.recommended_steps.is_finite());
    }

    #[test]
    fn test_balance_gap_or_tie_means_overall() {
        assert_eq!(primary_challenge(&[0.1, 0.2, 0.3, 0.9]), ChallengeKind::Overall);
        assert_eq!(primary_challenge(&[0.0; 4]), ChallengeKind::Overall);
        assert_eq!(primary_challenge(&[0.4, 0.4, 0.1, 0.0]), ChallengeKind::Overall);
        assert_eq!(primary_challenge(&[f64::NAN; 4]), ChallengeKind::Overall);
    }

    #[test]
    fn test_zero_centroid_uses_unit_denominator() {
        assert!((normalized_gap(0.0, 3.0) + 3.0).abs() < f64::EPSILON);
        assert!((normalized_gap(200.0, 100.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_targets_lift_towards_cluster_average() {
        let config = engine_config();
        let engine = RecommendationEngine::new(&config);
        let user = UserRecord::new("ada", 4000.0, 40.0, 10.0, 100.0);
        let centroid = [6000.0, 40.0, 40.0, 100.0];

        let recommendation = engine.recommend(&user, 1628.0, &centroid);

        assert_eq!(recommendation.primary_challenge, ChallengeKind::Squats);
        assert!((recommendation.recommended_steps - 6900.0).abs() < 1e-9);
        assert!((recommendation.recommended_pushups - 44.0).abs() < 1e-9);
        assert!((recommendation.recommended_squats - 44.0).abs() < 1e-9);
        assert!((recommendation.current_value - 10.0).abs() < f64::EPSILON);
        assert!(recommendation.challenge_description.contains("44 squats"));
    }

    #[test]
    fn test_never_recommends_regression() {
        let config = engine_config();
        let engine = RecommendationEngine::new(&config);
        let user = UserRecord::new("ada", 20_000.0, 300.0, 250.0, 10.0);
        let centroid = [6000.0, 40.0, 40.0, 100.0];

        let recommendation = engine.recommend(&user, 8000.0, &centroid);

        assert!(recommendation.recommended_steps >= user.stepcount);
        assert!(recommendation.recommended_pushups >= user.pushup);
        assert!(recommendation.recommended_squats >= user.squat);
        assert_eq!(recommendation.primary_challenge, ChallengeKind::Overall);
        assert!((recommendation.target_value - 9600.0).abs() < 1e-9);
    }
}

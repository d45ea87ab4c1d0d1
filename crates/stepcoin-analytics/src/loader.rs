// ABOUTME: Loader and normalizer turning raw snapshot rows into typed user records
// ABOUTME: Coerces numeric columns (malformed values become NaN) and fills text defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Single normalization boundary between the data source and the pipeline.
//!
//! Numeric coercion never fails: a value that does not parse as a number
//! (including a blank cell) becomes `NaN` and flows through the rest of the
//! pipeline unchanged.

use stepcoin_core::constants::records::DEFAULT_TEAM;
use stepcoin_core::models::{RawUserRecord, UserRecord};
use tracing::debug;

/// Parse a numeric cell, mapping anything unparseable to `NaN`
#[must_use]
pub fn coerce_number(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn text_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Normalize one raw row
#[must_use]
pub fn normalize(raw: &RawUserRecord) -> UserRecord {
    UserRecord {
        username: raw.username.trim().to_owned(),
        balance: coerce_number(&raw.balance),
        stepcount: coerce_number(&raw.stepcount),
        pushup: coerce_number(&raw.pushup),
        squat: coerce_number(&raw.squat),
        team: text_or(&raw.team, DEFAULT_TEAM),
        email: text_or(&raw.email, ""),
        transactions: text_or(&raw.transactions, ""),
        password: text_or(&raw.password, ""),
    }
}

/// Normalize a whole snapshot, preserving row order
#[must_use]
pub fn load_users(rows: &[RawUserRecord]) -> Vec<UserRecord> {
    let users: Vec<UserRecord> = rows.iter().map(normalize).collect();

    let malformed = users
        .iter()
        .filter(|user| user.features().iter().any(|value| value.is_nan()))
        .count();
    if malformed > 0 {
        debug!(
            rows = users.len(),
            malformed, "snapshot contains non-numeric metric values; they will propagate as NaN"
        );
    }

    users
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(stepcount: &str, team: &str) -> RawUserRecord {
        RawUserRecord {
            username: " ada ".into(),
            balance: "120.5".into(),
            stepcount: stepcount.into(),
            pushup: "40".into(),
            squat: "55".into(),
            team: team.into(),
            ..RawUserRecord::default()
        }
    }

    #[test]
    fn test_numeric_columns_are_coerced() {
        let user = normalize(&raw("8000", "Blue"));
        assert_eq!(user.username, "ada");
        assert!((user.stepcount - 8000.0).abs() < f64::EPSILON);
        assert!((user.balance - 120.5).abs() < f64::EPSILON);
        assert_eq!(user.team, "Blue");
    }

    #[test]
    fn test_malformed_number_becomes_nan() {
        assert!(normalize(&raw("lots", "Blue")).stepcount.is_nan());
        assert!(normalize(&raw("", "Blue")).stepcount.is_nan());
    }

    #[test]
    fn test_blank_text_fields_get_defaults() {
        let user = normalize(&raw("10", "   "));
        assert_eq!(user.team, "None");
        assert_eq!(user.email, "");
        assert_eq!(user.password, "");
        assert_eq!(user.transactions, "");
    }

    #[test]
    fn test_load_users_preserves_order() {
        let rows = vec![raw("1", "A"), raw("2", "B"), raw("x", "C")];
        let users = load_users(&rows);
        assert_eq!(users.len(), 3);
        assert_eq!(users[1].team, "B");
        assert!(users[2].stepcount.is_nan());
    }
}

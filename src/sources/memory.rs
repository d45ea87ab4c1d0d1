// ABOUTME: In-memory users snapshot for tests, demos and embedding callers
// ABOUTME: Returns a clone of the rows it was built with
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use super::UserRepository;
use async_trait::async_trait;
use stepcoin_core::errors::AppResult;
use stepcoin_core::models::{RawUserRecord, UserRecord};

/// Fixed snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    rows: Vec<RawUserRecord>,
}

impl InMemoryUserRepository {
    /// Wrap raw rows
    #[must_use]
    pub const fn new(rows: Vec<RawUserRecord>) -> Self {
        Self { rows }
    }

    /// Build raw rows back from typed records
    #[must_use]
    pub fn from_users(users: &[UserRecord]) -> Self {
        let rows = users
            .iter()
            .map(|user| RawUserRecord {
                username: user.username.clone(),
                balance: user.balance.to_string(),
                stepcount: user.stepcount.to_string(),
                pushup: user.pushup.to_string(),
                squat: user.squat.to_string(),
                team: user.team.clone(),
                email: user.email.clone(),
                transactions: user.transactions.clone(),
                password: user.password.clone(),
            })
            .collect();
        Self { rows }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the snapshot is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn load_snapshot(&self) -> AppResult<Vec<RawUserRecord>> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} rows", self.rows.len())
    }
}

// ABOUTME: Repository interfaces supplying the user snapshot to the analytics service
// ABOUTME: CSV-file and in-memory implementations behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Snapshot sources
//!
//! The analytics engine never reads data itself. A [`UserRepository`] hands
//! the service a complete snapshot of raw rows before any computation starts;
//! a failure here fails the whole report.

/// CSV file repository
pub mod csv;

/// In-memory repository
pub mod memory;

pub use self::csv::CsvUserRepository;
pub use self::memory::InMemoryUserRepository;

use async_trait::async_trait;
use stepcoin_core::errors::AppResult;
use stepcoin_core::models::RawUserRecord;

/// Source of the user snapshot
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load every user row
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read as a whole
    async fn load_snapshot(&self) -> AppResult<Vec<RawUserRecord>>;

    /// Short description for logs
    fn describe(&self) -> String;
}

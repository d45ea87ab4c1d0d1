// ABOUTME: Users snapshot repository backed by a CSV export of the wellness app
// ABOUTME: Reads on a blocking task and maps file and structure failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use super::UserRepository;
use async_trait::async_trait;
use csv::{ErrorKind, ReaderBuilder, Trim};
use std::io;
use std::path::{Path, PathBuf};
use stepcoin_core::errors::{AppError, AppResult};
use stepcoin_core::models::RawUserRecord;
use tokio::task;
use tracing::debug;

/// Reads `username,balance,stepcount,pushup,squat,team,email,transactions,password` rows
///
/// Missing columns read as empty strings. Cell contents are not validated
/// here; unparseable numbers are the loader's concern.
#[derive(Debug, Clone)]
pub struct CsvUserRepository {
    path: PathBuf,
}

impl CsvUserRepository {
    /// Create a repository for the CSV file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the CSV file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserRepository for CsvUserRepository {
    async fn load_snapshot(&self) -> AppResult<Vec<RawUserRecord>> {
        let path = self.path.clone();
        let rows = task::spawn_blocking(move || read_snapshot(&path))
            .await
            .map_err(|e| AppError::internal(format!("CSV reader task failed: {e}")))??;

        debug!(path = %self.path.display(), rows = rows.len(), "loaded users snapshot");
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Read the whole file synchronously
///
/// # Errors
///
/// `ResourceNotFound` when the file does not exist, `StorageError` for other
/// I/O failures and `InvalidFormat` when a row does not match the header
pub fn read_snapshot(path: &Path) -> AppResult<Vec<RawUserRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    reader
        .deserialize()
        .map(|row| row.map_err(|e| csv_error(path, e)))
        .collect()
}

fn csv_error(path: &Path, error: csv::Error) -> AppError {
    let missing = matches!(error.kind(), ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound);
    let io_failure = matches!(error.kind(), ErrorKind::Io(_));

    if missing {
        AppError::not_found(format!("Users snapshot {}", path.display()))
    } else if io_failure {
        AppError::storage(format!("Failed to read {}: {error}", path.display())).with_source(error)
    } else {
        AppError::invalid_format(format!("Malformed users CSV {}: {error}", path.display()))
            .with_source(error)
    }
}

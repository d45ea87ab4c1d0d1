// ABOUTME: Tests for the CSV users snapshot repository
// ABOUTME: Covers header handling, missing columns and file-level failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::{write_snapshot, SAMPLE_ROWS};
use std::fs;
use stepcoin_server::errors::ErrorCode;
use stepcoin_server::sources::{CsvUserRepository, UserRepository};

#[tokio::test]
async fn test_reads_every_row_as_strings() {
    let (_dir, path) = write_snapshot(SAMPLE_ROWS);
    let rows = CsvUserRepository::new(&path).load_snapshot().await.unwrap();

    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].username, "ada");
    assert_eq!(rows[0].stepcount, "12000");
    assert_eq!(rows[4].pushup, "n/a");
    assert!(rows[4].team.is_empty());
}

#[tokio::test]
async fn test_missing_columns_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.csv");
    fs::write(&path, "username, stepcount\nada,8000\nbob,3000\n").unwrap();

    let rows = CsvUserRepository::new(&path).load_snapshot().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].stepcount, "3000");
    assert!(rows[1].balance.is_empty());
    assert!(rows[1].password.is_empty());
}

#[tokio::test]
async fn test_header_only_file_is_an_empty_snapshot() {
    let (_dir, path) = write_snapshot(&[]);
    let rows = CsvUserRepository::new(&path).load_snapshot().await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_ragged_row_is_invalid_format() {
    let (_dir, path) = write_snapshot(&["ada,250,12000"]);
    let error = CsvUserRepository::new(&path)
        .load_snapshot()
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repository = CsvUserRepository::new(dir.path().join("nope.csv"));

    let error = repository.load_snapshot().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(repository.describe().starts_with("csv:"));
}

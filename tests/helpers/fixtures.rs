// ABOUTME: Snapshot fixtures for integration tests
// ABOUTME: Writes users.csv files to temp dirs and builds services over them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use stepcoin_server::analytics::AnalyticsConfig;
use stepcoin_server::service::AnalyticsService;
use stepcoin_server::sources::CsvUserRepository;
use tempfile::TempDir;

/// Header row of an exported users snapshot
pub const CSV_HEADER: &str = "username,balance,stepcount,pushup,squat,team,email,transactions,password";

/// Eight users over three teams, one with a malformed pushup count
pub const SAMPLE_ROWS: &[&str] = &[
    "ada,250,12000,40,60,Falcons,ada@example.com,12,hunter2",
    "bob,90,3000,5,5,Falcons,bob@example.com,3,secret",
    "cy,120,7000,20,25,Otters,cy@example.com,5,secret",
    "dee,310,15000,55,70,Otters,dee@example.com,20,secret",
    "eli,60,2500,n/a,10,,eli@example.com,1,secret",
    "fay,180,9000,30,35,Lynx,fay@example.com,8,secret",
    "gus,140,8000,25,30,Lynx,gus@example.com,6,secret",
    "hal,200,11000,35,45,Falcons,hal@example.com,9,secret",
];

/// Write `rows` under a header into a fresh temp dir
pub fn write_snapshot(rows: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("users.csv");
    let mut contents = String::from(CSV_HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(&path, contents).expect("Failed to write snapshot");
    (dir, path)
}

/// Service over a CSV file at `path` with default analytics settings
pub fn csv_service(path: PathBuf) -> AnalyticsService {
    AnalyticsService::new(
        Arc::new(CsvUserRepository::new(path)),
        AnalyticsConfig::default(),
    )
}

// ABOUTME: Stepcoin CLI - offline analytics over a users.csv snapshot
// ABOUTME: Prints the full report as JSON or a human-readable population summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness
//!
//! Usage:
//! ```bash
//! # Full report as JSON
//! stepcoin-cli report --csv data/users.csv --pretty
//!
//! # Same report with a different clustering seed
//! stepcoin-cli report --csv data/users.csv --seed 7
//!
//! # Population overview: clusters, teams, leaderboard and outliers
//! stepcoin-cli summary --csv data/users.csv
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use stepcoin_server::{
    analytics::AnalyticsConfig, errors::AppResult, logging, service::AnalyticsService,
    sources::CsvUserRepository,
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "stepcoin-cli",
    about = "Stepcoin wellness analytics CLI",
    long_about = "Compute the Stepcoin analytics report from a users.csv snapshot without running the server."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the full analytics report as JSON
    Report {
        /// Users CSV snapshot
        #[arg(long)]
        csv: PathBuf,

        /// Clustering seed override
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print population size, clusters, teams, top engagement and outliers
    Summary {
        /// Users CSV snapshot
        #[arg(long)]
        csv: PathBuf,

        /// Clustering seed override
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn service_for(csv: PathBuf) -> AnalyticsService {
    AnalyticsService::new(
        Arc::new(CsvUserRepository::new(csv)),
        AnalyticsConfig::default(),
    )
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_for_cli(cli.verbose) {
        eprintln!("Logging initialization failed: {e}");
    }

    match cli.command {
        Command::Report { csv, seed, pretty } => {
            debug!(csv = %csv.display(), ?seed, "computing report");
            commands::report::run(&service_for(csv), seed, pretty).await?;
        }
        Command::Summary { csv, seed } => {
            debug!(csv = %csv.display(), ?seed, "computing summary");
            commands::summary::run(&service_for(csv), seed).await?;
        }
    }

    Ok(())
}

// Copyright 2026 Dropbox (created by Andrew Yates <ayates@dropbox.com>)
// Allow clippy warnings for CLI application
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Transaction search demo runner.
//!
//! Builds the `txnIdx` index, bulk-loads synthetic transaction records as
//! hashes under the `txn:` prefix, and runs the canned search/aggregation
//! scenarios against them, strictly in that order. Any store error aborts
//! the run.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use txnsearch::constants::{DEFAULT_RECORD_COUNT, DEFAULT_REDIS_URL, DEFAULT_SEED};
use txnsearch::generator::{generate, GenerateConfig};
use txnsearch::scenarios;
use txnsearch::source::SeededTransactionSource;
use txnsearch::store::TransactionStore;

/// Seed Redis Stack with synthetic credit-card transactions and run canned
/// search and aggregation scenarios against them.
#[derive(Parser)]
#[command(name = "txnsearch")]
#[command(author = "Andrew Yates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Transaction search demo over Redis Stack", long_about = None)]
struct Cli {
    /// Redis connection URL
    #[arg(long, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    redis_url: String,

    /// Number of synthetic transactions to generate
    #[arg(long, default_value_t = DEFAULT_RECORD_COUNT)]
    records: usize,

    /// Seed for the deterministic record source
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Skip the bulk-load and only rebuild the index and run the scenarios
    #[arg(long)]
    skip_load: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = TransactionStore::connect(&cli.redis_url)
        .await
        .with_context(|| format!("connecting to {}", cli.redis_url))?;

    store.build_index().await.context("building index")?;

    if cli.skip_load {
        info!("bulk-load skipped");
    } else {
        let mut source = SeededTransactionSource::new(cli.seed);
        generate(&store, cli.records, &mut source, &GenerateConfig::default())
            .await
            .context("loading transactions")?;
    }

    scenarios::run_all(&store)
        .await
        .context("running scenarios")?;

    Ok(())
}

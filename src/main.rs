//! Candle-file sweep driver.
//!
//! Reads a JSON file of candles, groups them by symbol, and runs the bulk
//! analysis sweep, logging the structured per-symbol summary and printing
//! the full result set as JSON on stdout.

use std::collections::HashMap;
use std::env;
use std::fs;

use anyhow::Context;
use augur::config::Config;
use augur::services::analyzer;
use augur::types::Candle;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load and validate configuration
    let config = Config::from_env();
    config.validate()?;

    let path = env::args()
        .nth(1)
        .context("usage: augur <candles.json>")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)?;
    info!("Loaded {} candles from {}", candles.len(), path);

    let mut candles_by_symbol: HashMap<String, Vec<Candle>> = HashMap::new();
    for candle in candles {
        candles_by_symbol
            .entry(candle.symbol.clone())
            .or_default()
            .push(candle);
    }

    let analyses = analyzer::evaluate_all(&candles_by_symbol, &config);
    println!("{}", serde_json::to_string_pretty(&analyses)?);

    Ok(())
}

// src/cli.rs

use crate::client::AlphaVantageConfig;
use crate::config::{ALPHA_VANTAGE_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_REQUESTS_PER_MINUTE};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Track stock tickers and chart their price history.
#[derive(Parser)]
#[command(name = "stock_tracker", version, about)]
pub struct Cli {
    /// Alpha Vantage API key ("demo" only answers for IBM).
    #[arg(long, env = "ALPHAVANTAGE_API_KEY", default_value = "demo", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "ALPHAVANTAGE_BASE_URL", default_value = ALPHA_VANTAGE_BASE_URL)]
    pub base_url: String,

    /// Requests allowed per minute before calls start waiting.
    #[arg(long, default_value_t = DEFAULT_REQUESTS_PER_MINUTE)]
    pub requests_per_minute: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Ticker list to load on start-up (same format as File > Import).
    #[arg(long)]
    pub import: Option<PathBuf>,
}

impl Cli {
    pub fn alpha_vantage_config(&self) -> AlphaVantageConfig {
        AlphaVantageConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_limit(self.requests_per_minute)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

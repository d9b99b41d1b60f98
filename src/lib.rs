// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod chart;
pub mod cli;
pub mod client;
pub mod config;
pub mod series;
pub mod stocks;
pub mod tracker;
pub mod transfer;
pub mod ui;
pub mod worker;

#[cfg(test)]
mod test_support;

// === 2. Re-export the public-facing components to create a clean API ===

// --- From `stocks` ---
pub use stocks::{Column, Holdings, Quote, Symbol, Trend, normalize_ticker};

// --- From `client` ---
pub use client::{AlphaVantageClient, AlphaVantageConfig, FetchError, QuoteProvider};

// --- From `series` / `chart` ---
pub use chart::ChartKind;
pub use series::{Candle, PriceSeries};

// --- The app itself ---
pub use tracker::{Status, Tracker};
pub use ui::TrackerApp;
pub use worker::{Command, Event, FetchWorker, QuoteOrigin};

// src/client/mod.rs

pub mod alpha_vantage;
pub mod error;
pub mod provider;
pub mod rate_limit;

pub use alpha_vantage::{AlphaVantageClient, AlphaVantageConfig};
pub use error::FetchError;
pub use provider::QuoteProvider;

// src/client/error.rs

use crate::stocks::Symbol;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("missing Alpha Vantage API key")]
    MissingApiKey,
    #[error("invalid base url {0}")]
    InvalidBaseUrl(String),
    #[error("rate limited by Alpha Vantage")]
    RateLimited,
    #[error("alpha vantage api error: {0}")]
    Api(String),
    #[error("no quote for symbol {0}")]
    UnknownSymbol(Symbol),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("fetch worker has stopped")]
    WorkerStopped,
}

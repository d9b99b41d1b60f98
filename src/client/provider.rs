// src/client/provider.rs

use super::error::FetchError;
use crate::series::PriceSeries;
use crate::stocks::Quote;
use std::future::Future;

/// A trait for any source of quotes and price history.
/// This allows the fetch worker to run against a fake in tests.
pub trait QuoteProvider {
    /// Current quote for one ticker, merged with its overview metrics.
    fn quote(&self, ticker: &str) -> impl Future<Output = Result<Quote, FetchError>>;

    /// Monthly bars for one ticker, oldest first.
    fn monthly_series(&self, ticker: &str) -> impl Future<Output = Result<PriceSeries, FetchError>>;
}

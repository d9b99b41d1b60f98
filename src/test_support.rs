// src/test_support.rs
//! Fixtures shared by the unit tests.

use crate::client::{FetchError, QuoteProvider};
use crate::series::{Candle, PriceSeries};
use crate::stocks::Quote;
use crate::stocks::definitions::round2;
use chrono::NaiveDate;

pub fn make_quote(ticker: &str, price: f64, previous_close: f64) -> Quote {
    Quote {
        ticker: ticker.to_string(),
        price,
        change: round2(price - previous_close),
        change_percent: round2((price - previous_close) / previous_close * 100.0),
        previous_close,
        week52_high: Some(round2(price * 1.2)),
        market_cap: Some(2_950_123_000_000),
    }
}

pub fn date(ymd: &str) -> NaiveDate {
    NaiveDate::parse_from_str(ymd, "%Y-%m-%d").unwrap()
}

/// A bar whose high/low hug the open/close by one dollar.
pub fn candle(ymd: &str, open: f64, close: f64) -> Candle {
    Candle {
        date: date(ymd),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume: 1_000_000.0,
    }
}

pub fn make_series(ticker: &str) -> PriceSeries {
    PriceSeries::new(
        ticker,
        vec![
            candle("2024-01-31", 160.0, 183.0),
            candle("2024-02-29", 183.0, 185.0),
            candle("2024-03-28", 191.0, 190.0),
        ],
    )
}

/// In-memory provider: knows a fixed set of tickers, fails for the rest.
pub struct FakeProvider {
    known: Vec<String>,
}

impl FakeProvider {
    pub fn with_tickers(tickers: &[&str]) -> Self {
        Self {
            known: tickers.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn check(&self, ticker: &str) -> Result<(), FetchError> {
        if self.known.iter().any(|t| t == ticker) {
            Ok(())
        } else {
            Err(FetchError::UnknownSymbol(ticker.to_string()))
        }
    }
}

impl QuoteProvider for FakeProvider {
    async fn quote(&self, ticker: &str) -> Result<Quote, FetchError> {
        self.check(ticker)?;
        Ok(make_quote(ticker, 101.0, 100.0))
    }

    async fn monthly_series(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        self.check(ticker)?;
        Ok(make_series(ticker))
    }
}

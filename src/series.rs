// src/series.rs

use crate::stocks::Symbol;
use chrono::NaiveDate;

/// One monthly bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

/// Price history for the ticker currently on the chart, oldest bar first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: Symbol,
    pub candles: Vec<Candle>,
}

impl PriceSeries {
    /// Builds a series, putting the bars into chronological order.
    pub fn new(ticker: impl Into<Symbol>, mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.date);
        Self {
            ticker: ticker.into(),
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.candles.first().map(|c| c.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.candles.last().map(|c| c.date)
    }
}

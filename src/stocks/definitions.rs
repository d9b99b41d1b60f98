// src/stocks/definitions.rs
//! Core quote types shown in the tracker's table.

use crate::config::{MAX_TICKER_LEN, MISSING_CELL};
use std::cmp::Ordering;

pub type Symbol = String;

/// Cleans user input into a ticker symbol (e.g. " aapl " -> "AAPL").
///
/// Returns `None` for empty input, anything longer than [`MAX_TICKER_LEN`],
/// or characters other than ASCII alphanumerics, `.` and `-` (so "BRK.B" passes).
pub fn normalize_ticker(raw: &str) -> Option<Symbol> {
    let ticker = raw.trim().to_ascii_uppercase();
    if ticker.is_empty() || ticker.len() > MAX_TICKER_LEN {
        return None;
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return None;
    }
    Some(ticker)
}

/// Whether the last price closed above the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// The table's columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Ticker,
    Price,
    Change,
    ChangePercent,
    Week52High,
    MarketCap,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Ticker,
        Column::Price,
        Column::Change,
        Column::ChangePercent,
        Column::Week52High,
        Column::MarketCap,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One row of the table: a quote snapshot merged with a couple of
/// company-overview metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub ticker: Symbol,
    /// Last traded price, rounded to cents.
    pub price: f64,
    pub change: f64,
    /// Percent change, already scaled (1.25 means 1.25%).
    pub change_percent: f64,
    pub previous_close: f64,
    /// Absent for instruments without an overview (ETFs, indices).
    pub week52_high: Option<f64>,
    /// Raw market capitalization in dollars.
    pub market_cap: Option<u64>,
}

impl Quote {
    pub fn trend(&self) -> Trend {
        if self.price > self.previous_close {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// Market cap in billions, e.g. 2_950_000_000_000 -> 2950.0.
    pub fn market_cap_billions(&self) -> Option<f64> {
        self.market_cap.map(|cap| round2(cap as f64 / 1e9))
    }

    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Ticker => self.ticker.clone(),
            Column::Price => format!("{:.2}", self.price),
            Column::Change => format!("{:.2}", self.change),
            Column::ChangePercent => format!("{:.2}%", self.change_percent),
            Column::Week52High => self
                .week52_high
                .map(|high| format!("{high:.2}"))
                .unwrap_or_else(|| MISSING_CELL.to_string()),
            Column::MarketCap => self
                .market_cap_billions()
                .map(|cap| format!("{cap:.2}B"))
                .unwrap_or_else(|| MISSING_CELL.to_string()),
        }
    }

    /// The six display strings, in column order.
    pub fn cells(&self) -> [String; 6] {
        Column::ALL.map(|column| self.cell(column))
    }

    fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Ticker => None,
            Column::Price => Some(self.price),
            Column::Change => Some(self.change),
            Column::ChangePercent => Some(self.change_percent),
            Column::Week52High => self.week52_high,
            Column::MarketCap => self.market_cap.map(|cap| cap as f64),
        }
    }

    /// Ascending comparison on one column. Missing values compare greater
    /// than any present value.
    pub fn compare_by(&self, other: &Quote, column: Column) -> Ordering {
        if column == Column::Ticker {
            return self.ticker.cmp(&other.ticker);
        }
        match (self.numeric(column), other.numeric(column)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// True when this row has no value for `column`.
    pub fn is_missing(&self, column: Column) -> bool {
        column != Column::Ticker && self.numeric(column).is_none()
    }
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

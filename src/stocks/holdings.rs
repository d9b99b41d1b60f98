// src/stocks/holdings.rs
//! The tracked tickers behind the main table.

use super::definitions::{Column, Quote, Symbol};
use std::collections::{HashMap, HashSet};

/// Rows of the quote table plus a ticker -> last price mapping that keeps
/// tickers unique.
///
/// `rows` is the display order; `prices` is rebuilt whenever a row changes.
#[derive(Debug, Default)]
pub struct Holdings {
    rows: Vec<Quote>,
    prices: HashMap<Symbol, f64>,
    selected: HashSet<Symbol>,
    /// Column the table was last sorted by, and whether it is descending.
    sort: Option<(Column, bool)>,
}

impl Holdings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.prices.contains_key(ticker)
    }

    pub fn get(&self, ticker: &str) -> Option<&Quote> {
        self.rows.iter().find(|q| q.ticker == ticker)
    }

    /// Last fetched price for a ticker.
    pub fn price_of(&self, ticker: &str) -> Option<f64> {
        self.prices.get(ticker).copied()
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Quote] {
        &self.rows
    }

    /// Tickers in display order.
    pub fn tickers(&self) -> Vec<Symbol> {
        self.rows.iter().map(|q| q.ticker.clone()).collect()
    }

    /// Appends a row unless the ticker is already tracked.
    /// Returns `false` (and changes nothing) for a duplicate.
    pub fn insert(&mut self, quote: Quote) -> bool {
        if self.contains(&quote.ticker) {
            return false;
        }
        self.prices.insert(quote.ticker.clone(), quote.price);
        self.rows.push(quote);
        true
    }

    /// Refreshes an existing row in place. Never adds a row, so a ticker
    /// removed while its refresh was in flight stays removed.
    pub fn replace(&mut self, quote: Quote) -> bool {
        match self.rows.iter_mut().find(|q| q.ticker == quote.ticker) {
            Some(row) => {
                self.prices.insert(quote.ticker.clone(), quote.price);
                *row = quote;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, ticker: &str) -> Option<Quote> {
        let pos = self.rows.iter().position(|q| q.ticker == ticker)?;
        self.prices.remove(ticker);
        self.selected.remove(ticker);
        Some(self.rows.remove(pos))
    }

    /// Deletes every selected row, returning the removed tickers in display order.
    pub fn remove_selected(&mut self) -> Vec<Symbol> {
        let doomed: Vec<Symbol> = self
            .rows
            .iter()
            .filter(|q| self.selected.contains(&q.ticker))
            .map(|q| q.ticker.clone())
            .collect();
        self.rows.retain(|q| !self.selected.contains(&q.ticker));
        for ticker in &doomed {
            self.prices.remove(ticker);
        }
        self.selected.clear();
        doomed
    }

    // === Selection ===

    pub fn is_selected(&self, ticker: &str) -> bool {
        self.selected.contains(ticker)
    }

    pub fn toggle_select(&mut self, ticker: &str) {
        if !self.contains(ticker) {
            return;
        }
        if !self.selected.remove(ticker) {
            self.selected.insert(ticker.to_string());
        }
    }

    pub fn select_only(&mut self, ticker: &str) {
        self.selected.clear();
        if self.contains(ticker) {
            self.selected.insert(ticker.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.prices.keys().cloned().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected tickers in display order.
    pub fn selected(&self) -> Vec<Symbol> {
        self.rows
            .iter()
            .filter(|q| self.selected.contains(&q.ticker))
            .map(|q| q.ticker.clone())
            .collect()
    }

    /// The topmost selected row.
    pub fn first_selected(&self) -> Option<&Quote> {
        self.rows.iter().find(|q| self.selected.contains(&q.ticker))
    }

    // === Sorting ===

    /// Current sort column and direction (`true` = descending).
    pub fn sort_state(&self) -> Option<(Column, bool)> {
        self.sort
    }

    /// Sorts by a heading click: ascending first, reversed when the same
    /// column is clicked again. Rows without a value stay at the bottom.
    pub fn sort_by(&mut self, column: Column) {
        let descending = match self.sort {
            Some((current, descending)) if current == column => !descending,
            _ => false,
        };
        self.rows.sort_by(|a, b| {
            match (a.is_missing(column), b.is_missing(column)) {
                (false, false) => {
                    let ord = a.compare_by(b, column);
                    if descending { ord.reverse() } else { ord }
                }
                (a_missing, b_missing) => a_missing.cmp(&b_missing),
            }
        });
        self.sort = Some((column, descending));
    }
}

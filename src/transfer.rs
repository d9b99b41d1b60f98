// src/transfer.rs
//! File > Import / File > Export.
//!
//! Imports read a header-less list of tickers separated by commas
//! (`aapl,msft,amzn`), optionally spread over several lines. Exports write
//! the table as it is currently displayed.

use crate::config::EXPORT_HEADINGS;
use crate::stocks::{Quote, Symbol, normalize_ticker};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Splits a ticker list into symbols. Entries that are not valid tickers are
/// skipped (with a warning); repeats keep their first position.
pub fn parse_ticker_list(text: &str) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    let mut tickers = Vec::new();
    for raw in text.split([',', '\n', '\r']) {
        if raw.trim().is_empty() {
            continue;
        }
        match normalize_ticker(raw) {
            Some(ticker) => {
                if seen.insert(ticker.clone()) {
                    tickers.push(ticker);
                }
            }
            None => log::warn!("skipping invalid ticker {:?} in import", raw.trim()),
        }
    }
    tickers
}

pub fn import_tickers(path: &Path) -> Result<Vec<Symbol>, TransferError> {
    let text = fs::read_to_string(path)?;
    let tickers = parse_ticker_list(&text);
    log::info!("imported {} tickers from {}", tickers.len(), path.display());
    Ok(tickers)
}

/// Writes the rows as CSV, header first, in the order given.
pub fn export_table<W: Write>(rows: &[Quote], writer: W) -> Result<(), TransferError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADINGS)?;
    for quote in rows {
        csv.write_record(quote.cells())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_to_path(rows: &[Quote], path: &Path) -> Result<(), TransferError> {
    let file = fs::File::create(path)?;
    export_table(rows, file)?;
    log::info!("exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

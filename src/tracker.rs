// src/tracker.rs

use crate::chart::ChartKind;
use crate::series::PriceSeries;
use crate::stocks::{Column, Holdings, Symbol, normalize_ticker};
use crate::transfer::{self, TransferError};
use crate::worker::{Command, Event, QuoteOrigin};
use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The application's state without any widgets: what the table holds, what
/// the chart shows, and the fetches the UI should send to the worker.
///
/// Every user action is a method here; fetch answers come back through
/// [`Tracker::handle`].
#[derive(Debug, Default)]
pub struct Tracker {
    holdings: Holdings,
    chart: Option<PriceSeries>,
    chart_kind: ChartKind,
    /// Ticker whose series was requested last; older answers are stale.
    chart_pending: Option<Symbol>,
    pending_adds: HashSet<Symbol>,
    outbox: Vec<Command>,
    status: Option<Status>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub fn holdings_mut(&mut self) -> &mut Holdings {
        &mut self.holdings
    }

    pub fn chart(&self) -> Option<&PriceSeries> {
        self.chart.as_ref()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Hands the queued fetches to the caller.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    pub fn report_error(&mut self, context: &str, err: impl Display) {
        log::warn!("{context}: {err}");
        self.status = Some(Status::Error(format!("{context}: {err}")));
    }

    // === Main panel ===

    /// Requests a quote for a new ticker. Returns `false` when nothing was
    /// requested: invalid input, already in the table, or already on its way.
    pub fn add_ticker(&mut self, raw: &str) -> bool {
        let Some(ticker) = normalize_ticker(raw) else {
            if !raw.trim().is_empty() {
                self.report_error("Invalid ticker", raw.trim());
            }
            return false;
        };
        if self.holdings.contains(&ticker) || self.pending_adds.contains(&ticker) {
            log::debug!("{ticker} already tracked");
            return false;
        }
        self.pending_adds.insert(ticker.clone());
        self.outbox.push(Command::Quote(QuoteOrigin::Add, ticker));
        true
    }

    /// Deletes the highlighted rows.
    pub fn remove_selected(&mut self) -> Vec<Symbol> {
        let removed = self.holdings.remove_selected();
        if !removed.is_empty() {
            log::info!("removed {}", removed.join(", "));
        }
        removed
    }

    /// Re-fetches every row, in table order. Answers replace rows in place.
    pub fn update_all(&mut self) {
        for ticker in self.holdings.tickers() {
            self.outbox.push(Command::Quote(QuoteOrigin::Refresh, ticker));
        }
    }

    /// Requests the price history of the topmost highlighted row.
    pub fn show_graph(&mut self) -> bool {
        let Some(ticker) = self.holdings.first_selected().map(|q| q.ticker.clone()) else {
            self.notify("Select a row to chart");
            return false;
        };
        self.chart_pending = Some(ticker.clone());
        self.outbox.push(Command::Series(ticker));
        true
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart_kind = kind;
    }

    pub fn close_chart(&mut self) {
        self.chart = None;
        self.chart_pending = None;
    }

    pub fn sort_by(&mut self, column: Column) {
        self.holdings.sort_by(column);
    }

    pub fn select_all(&mut self) {
        self.holdings.select_all();
    }

    // === File menu ===

    /// Queues every ticker listed in the file. Returns how many were queued.
    pub fn import_from(&mut self, path: &Path) -> Result<usize, TransferError> {
        let tickers = transfer::import_tickers(path)?;
        let queued = tickers.iter().filter(|t| self.add_ticker(t)).count();
        self.notify(format!("Importing {queued} tickers"));
        Ok(queued)
    }

    pub fn export_to(&mut self, path: &Path) -> Result<(), TransferError> {
        transfer::export_to_path(self.holdings.rows(), path)?;
        self.notify(format!("Exported {} rows", self.holdings.len()));
        Ok(())
    }

    // === Worker answers ===

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Quote {
                origin: QuoteOrigin::Add,
                ticker,
                result,
            } => {
                self.pending_adds.remove(&ticker);
                match result {
                    Ok(quote) => {
                        if self.holdings.insert(quote) {
                            self.notify(format!("Added {ticker}"));
                        }
                    }
                    Err(e) => self.report_error(&format!("Could not add {ticker}"), e),
                }
            }
            Event::Quote {
                origin: QuoteOrigin::Refresh,
                ticker,
                result,
            } => match result {
                Ok(quote) => {
                    self.holdings.replace(quote);
                }
                Err(e) => self.report_error(&format!("Could not update {ticker}"), e),
            },
            Event::Series { ticker, result } => {
                if self.chart_pending.as_deref() != Some(ticker.as_str()) {
                    log::debug!("dropping stale series for {ticker}");
                    return;
                }
                self.chart_pending = None;
                match result {
                    Ok(series) if series.is_empty() => {
                        self.report_error(&format!("Could not chart {ticker}"), "no price history")
                    }
                    Ok(series) => {
                        self.notify(format!("Charting {ticker}"));
                        self.chart = Some(series);
                    }
                    Err(e) => self.report_error(&format!("Could not chart {ticker}"), e),
                }
            }
        }
    }
}

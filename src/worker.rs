// src/worker.rs

use crate::client::{FetchError, QuoteProvider};
use crate::series::PriceSeries;
use crate::stocks::{Quote, Symbol};
use std::sync::mpsc as std_mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;

/// Why a quote was requested; decides whether the answer adds a row or
/// refreshes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOrigin {
    Add,
    Refresh,
}

/// Requests from the UI to the fetch thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quote(QuoteOrigin, Symbol),
    Series(Symbol),
}

/// Answers from the fetch thread, one per command, in command order.
#[derive(Debug)]
pub enum Event {
    Quote {
        origin: QuoteOrigin,
        ticker: Symbol,
        result: Result<Quote, FetchError>,
    },
    Series {
        ticker: Symbol,
        result: Result<PriceSeries, FetchError>,
    },
}

/// Owns the background thread that talks to the data provider.
///
/// Commands are processed one at a time so the provider's rate limit is
/// respected and answers come back in request order. Dropping the worker
/// closes the command channel; the thread exits after its current request.
pub struct FetchWorker {
    commands: mpsc::UnboundedSender<Command>,
    events: std_mpsc::Receiver<Event>,
    in_flight: usize,
    _handle: JoinHandle<()>,
}

impl FetchWorker {
    /// Starts the thread. `wake` runs after every answer (the GUI passes a
    /// repaint request so it notices the event without polling busily).
    pub fn spawn<P, W>(provider: P, wake: W) -> std::io::Result<Self>
    where
        P: QuoteProvider + Send + 'static,
        W: Fn() + Send + 'static,
    {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
        let (evt_tx, evt_rx) = std_mpsc::channel::<Event>();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let handle = thread::Builder::new()
            .name("fetch-worker".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        let event = run_command(&provider, command).await;
                        if evt_tx.send(event).is_err() {
                            break;
                        }
                        wake();
                    }
                });
                log::debug!("fetch worker stopped");
            })?;

        Ok(Self {
            commands: cmd_tx,
            events: evt_rx,
            in_flight: 0,
            _handle: handle,
        })
    }

    pub fn send(&mut self, command: Command) -> Result<(), FetchError> {
        log::debug!("queueing {command:?}");
        self.commands
            .send(command)
            .map_err(|_| FetchError::WorkerStopped)?;
        self.in_flight += 1;
        Ok(())
    }

    /// Every answer that has arrived so far, without blocking.
    pub fn poll(&mut self) -> Vec<Event> {
        let events: Vec<Event> = self.events.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(events.len());
        events
    }

    /// Blocks for the next answer, up to `timeout`.
    pub fn wait(&mut self, timeout: Duration) -> Option<Event> {
        let event = self.events.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }

    /// Commands sent whose answers have not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

async fn run_command<P: QuoteProvider>(provider: &P, command: Command) -> Event {
    match command {
        Command::Quote(origin, ticker) => {
            let result = provider.quote(&ticker).await;
            match &result {
                Ok(quote) => log::info!("fetched quote {} @ {:.2}", quote.ticker, quote.price),
                Err(e) => log::warn!("quote for {ticker} failed: {e}"),
            }
            Event::Quote {
                origin,
                ticker,
                result,
            }
        }
        Command::Series(ticker) => {
            let result = provider.monthly_series(&ticker).await;
            match &result {
                Ok(series) => log::info!("fetched {} monthly bars for {ticker}", series.len()),
                Err(e) => log::warn!("series for {ticker} failed: {e}"),
            }
            Event::Series { ticker, result }
        }
    }
}

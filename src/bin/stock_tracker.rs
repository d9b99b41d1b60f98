// src/bin/stock_tracker.rs

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use stock_tracker::cli::Cli;
use stock_tracker::config::{APP_TITLE, WINDOW_SIZE};
use stock_tracker::{AlphaVantageClient, FetchWorker, TrackerApp};

fn preprocess() {
    dotenv::dotenv().ok();
    env_logger::init();
}

fn main() -> Result<()> {
    preprocess();

    let cli = Cli::parse();
    log::info!(
        "starting against {} ({} requests/min)",
        cli.base_url,
        cli.requests_per_minute
    );
    if cli.api_key == "demo" {
        log::warn!("using the demo API key; only IBM will return data");
    }

    let client = AlphaVantageClient::new(cli.alpha_vantage_config())?;

    // The worker starts before the window exists; it learns the egui context
    // once eframe hands it over.
    let repaint: Arc<OnceCell<egui::Context>> = Arc::new(OnceCell::new());
    let waker = repaint.clone();
    let worker = FetchWorker::spawn(client, move || {
        if let Some(ctx) = waker.get() {
            ctx.request_repaint();
        }
    })?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    let import = cli.import.clone();
    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |cc| {
            let _ = repaint.set(cc.egui_ctx.clone());
            Box::new(TrackerApp::new(cc, worker, import.as_deref()))
        }),
    )
    .map_err(|e| anyhow::anyhow!("gui error: {e}"))
}

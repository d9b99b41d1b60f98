// src/ui/mod.rs
//! The egui front end: menubar, main panel, chart panel and status bar.

mod about;
mod chart_panel;
mod menu;
mod table;

use crate::config::{HOVER_COLOR, WINDOW_SIZE, WINDOW_SIZE_WITH_CHART};
use crate::tracker::{Status, Tracker};
use crate::worker::FetchWorker;
use eframe::egui::{self, Color32, Rect, RichText, Stroke};
use std::path::{Path, PathBuf};

pub struct TrackerApp {
    tracker: Tracker,
    worker: FetchWorker,
    /// Contents of the "Ticker:" field.
    entry: String,
    show_about: bool,
    /// Where to write the next viewport screenshot, once it arrives.
    snapshot_target: Option<PathBuf>,
    /// Screen rect of the plot in the last frame.
    chart_rect: Option<Rect>,
    chart_was_open: bool,
}

impl TrackerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, worker: FetchWorker, import: Option<&Path>) -> Self {
        apply_style(&cc.egui_ctx);
        let mut tracker = Tracker::new();
        if let Some(path) = import {
            if let Err(e) = tracker.import_from(path) {
                tracker.report_error("Import failed", e);
            }
        }
        Self {
            tracker,
            worker,
            entry: String::new(),
            show_about: false,
            snapshot_target: None,
            chart_rect: None,
            chart_was_open: false,
        }
    }

    /// Moves queued commands to the worker and answers back to the tracker.
    fn pump(&mut self) {
        for command in self.tracker.drain_commands() {
            if let Err(e) = self.worker.send(command) {
                self.tracker.report_error("Fetch failed", e);
            }
        }
        for event in self.worker.poll() {
            self.tracker.handle(event);
        }
    }

    /// Widens the window while a chart is open, like the panel extending the form.
    fn fit_window(&mut self, ctx: &egui::Context) {
        let open = self.tracker.chart().is_some();
        if open != self.chart_was_open {
            let [w, h] = if open { WINDOW_SIZE_WITH_CHART } else { WINDOW_SIZE };
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(w, h)));
            self.chart_was_open = open;
        }
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.tracker.status() {
                    Some(Status::Info(msg)) => {
                        ui.label(msg.as_str());
                    }
                    Some(Status::Error(msg)) => {
                        ui.label(RichText::new(msg.as_str()).color(Color32::RED));
                    }
                    None => {
                        ui.label("Ready");
                    }
                }
                let in_flight = self.worker.in_flight();
                if in_flight > 0 {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.spinner();
                        ui.label(format!("{in_flight} pending"));
                    });
                }
            });
        });
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump();

        menu::show(self, ctx);
        self.status_bar(ctx);
        if self.tracker.chart().is_some() {
            chart_panel::show(self, ctx);
        } else {
            self.chart_rect = None;
        }
        egui::CentralPanel::default().show(ctx, |ui| table::show_main_panel(self, ui));
        about::show(self, ctx);
        chart_panel::save_pending_snapshot(self, ctx);
        self.fit_window(ctx);

        // Send whatever this frame's clicks queued without waiting for the next one.
        self.pump();
    }
}

/// Light theme with the tracker's soft-blue button hover.
fn apply_style(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.widgets.hovered.weak_bg_fill = HOVER_COLOR;
    visuals.widgets.hovered.bg_fill = HOVER_COLOR;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, Color32::BLACK);
    ctx.set_visuals(visuals);
}

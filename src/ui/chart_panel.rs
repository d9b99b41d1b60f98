// src/ui/chart_panel.rs

use super::TrackerApp;
use crate::chart::{self, show_chart};
use eframe::egui;

/// Right-hand panel with Save / Close over the plot. Only called while a
/// series is loaded.
pub(super) fn show(app: &mut TrackerApp, ctx: &egui::Context) {
    egui::SidePanel::right("chart_panel")
        .resizable(false)
        .show(ctx, |ui| {
            let mut close = false;
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    request_snapshot(app, ctx);
                }
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

            if let Some(series) = app.tracker.chart() {
                ui.vertical_centered(|ui| {
                    ui.heading(series.ticker.as_str());
                });
                let kind = app.tracker.chart_kind();
                app.chart_rect = Some(show_chart(ui, kind, series));
            }

            if close {
                app.tracker.close_chart();
                app.chart_rect = None;
            }
        });
}

fn request_snapshot(app: &mut TrackerApp, ctx: &egui::Context) {
    let default_name = app
        .tracker
        .chart()
        .map(|s| format!("{}.png", s.ticker))
        .unwrap_or_else(|| "chart.png".to_string());
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save Image As...")
        .set_file_name(default_name)
        .add_filter("Portable Network Graphics (.png)", &["png"])
        .save_file()
    else {
        return;
    };
    app.snapshot_target = Some(path.with_extension("png"));
    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
}

/// Writes the requested chart image once the viewport screenshot arrives.
pub(super) fn save_pending_snapshot(app: &mut TrackerApp, ctx: &egui::Context) {
    if app.snapshot_target.is_none() {
        return;
    }
    let screenshot = ctx.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Screenshot { image, .. } => Some(image.clone()),
            _ => None,
        })
    });
    let Some(screenshot) = screenshot else {
        return;
    };
    let Some(path) = app.snapshot_target.take() else {
        return;
    };
    let Some(rect) = app.chart_rect else {
        app.tracker.report_error("Save failed", "the chart was closed");
        return;
    };

    let Some(image) = chart::crop_screenshot(&screenshot, rect, ctx.pixels_per_point()) else {
        app.tracker.report_error("Save failed", "the chart is outside the window");
        return;
    };
    match chart::save_png(&image, &path) {
        Ok(()) => {
            log::info!("saved chart to {}", path.display());
            app.tracker.notify(format!("Saved {}", path.display()));
        }
        Err(e) => app.tracker.report_error("Save failed", e),
    }
}

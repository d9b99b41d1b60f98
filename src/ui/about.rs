// src/ui/about.rs

use super::TrackerApp;
use eframe::egui;

const VERSION_CHANGES: &str = include_str!("../../CHANGELOG.md");

/// Help > About: version notes in a small fixed-size window.
pub(super) fn show(app: &mut TrackerApp, ctx: &egui::Context) {
    if !app.show_about {
        return;
    }
    let mut open = true;
    let mut ok_clicked = false;
    egui::Window::new("About")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .show(ctx, |ui| {
            ui.label(format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
            ui.label("Version Changes:");
            egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                ui.monospace(VERSION_CHANGES);
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.button("Ok").clicked() {
                    ok_clicked = true;
                }
            });
        });
    app.show_about = open && !ok_clicked;
}

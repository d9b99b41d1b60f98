// src/ui/menu.rs

use super::TrackerApp;
use crate::chart::ChartKind;
use crate::config::HOMEPAGE_URL;
use eframe::egui;

pub(super) fn show(app: &mut TrackerApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menubar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Import…").clicked() {
                    ui.close_menu();
                    import(app);
                }
                if ui.button("Export…").clicked() {
                    ui.close_menu();
                    export(app);
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut kind = app.tracker.chart_kind();
                for option in ChartKind::ALL {
                    if ui.radio_value(&mut kind, option, option.label()).clicked() {
                        ui.close_menu();
                    }
                }
                if kind != app.tracker.chart_kind() {
                    app.tracker.set_chart_kind(kind);
                }
                ui.separator();
                if ui.button("Select All").clicked() {
                    app.tracker.select_all();
                    ui.close_menu();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("Homepage").clicked() {
                    ctx.open_url(egui::OpenUrl::new_tab(HOMEPAGE_URL));
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("About").clicked() {
                    app.show_about = true;
                    ui.close_menu();
                }
            });
        });
    });
}

fn import(app: &mut TrackerApp) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Select File")
        .add_filter("Comma-separated values (.csv)", &["csv"])
        .add_filter("Text Document (.txt)", &["txt"])
        .add_filter("All Files", &["*"])
        .pick_file()
    else {
        return;
    };
    if let Err(e) = app.tracker.import_from(&path) {
        app.tracker.report_error("Import failed", e);
    }
}

fn export(app: &mut TrackerApp) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save File As...")
        .set_file_name("stocks.csv")
        .add_filter("Comma-separated values (.csv)", &["csv"])
        .add_filter("Text Document (.txt)", &["txt"])
        .save_file()
    else {
        return;
    };
    if let Err(e) = app.tracker.export_to(&path) {
        app.tracker.report_error("Export failed", e);
    }
}

// src/ui/table.rs

use super::TrackerApp;
use crate::config::{COLUMN_WIDTHS, DOWN_COLOR, ENTRY_TEXT_COLOR, TABLE_HEADINGS, TABLE_ROW_HEIGHT, UP_COLOR};
use crate::stocks::{Column, Trend};
use eframe::egui::{self, RichText};

/// Ticker entry, the four action buttons and the quote table.
pub(super) fn show_main_panel(app: &mut TrackerApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label("Ticker: ");
        let entry = ui.add(
            egui::TextEdit::singleline(&mut app.entry)
                .desired_width(100.0)
                .text_color(ENTRY_TEXT_COLOR),
        );
        if entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit_entry(app);
            entry.request_focus();
        }
    });

    ui.horizontal(|ui| {
        if ui.button("Add").clicked() {
            submit_entry(app);
        }
        if ui.button("Remove").clicked() {
            app.tracker.remove_selected();
        }
        if ui.button("Update").clicked() {
            app.tracker.update_all();
        }
        if ui.button("Show Graph").clicked() {
            app.tracker.show_graph();
        }
    });
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("quote_table")
                .striped(true)
                .spacing([4.0, 2.0])
                .show(ui, |ui| {
                    headings(app, ui);
                    rows(app, ui);
                });
        });
}

fn submit_entry(app: &mut TrackerApp) {
    if app.tracker.add_ticker(&app.entry) {
        app.entry.clear();
    }
}

fn headings(app: &mut TrackerApp, ui: &mut egui::Ui) {
    let sort = app.tracker.holdings().sort_state();
    for column in Column::ALL {
        let mut text = TABLE_HEADINGS[column.index()].to_string();
        if let Some((sorted, descending)) = sort {
            if sorted == column {
                text.push_str(if descending { " ▼" } else { " ▲" });
            }
        }
        let heading = egui::Button::new(RichText::new(text).strong()).frame(false);
        if ui
            .add_sized([COLUMN_WIDTHS[column.index()], TABLE_ROW_HEIGHT], heading)
            .clicked()
        {
            app.tracker.sort_by(column);
        }
    }
    ui.end_row();
}

fn rows(app: &mut TrackerApp, ui: &mut egui::Ui) {
    let extend = ui.input(|i| i.modifiers.command);
    let mut clicked = None;

    for quote in app.tracker.holdings().rows() {
        let color = match quote.trend() {
            Trend::Up => UP_COLOR,
            Trend::Down => DOWN_COLOR,
        };
        let selected = app.tracker.holdings().is_selected(&quote.ticker);
        for (column, cell) in Column::ALL.into_iter().zip(quote.cells()) {
            let label = egui::SelectableLabel::new(selected, RichText::new(cell).color(color));
            if ui
                .add_sized([COLUMN_WIDTHS[column.index()], TABLE_ROW_HEIGHT], label)
                .clicked()
            {
                clicked = Some(quote.ticker.clone());
            }
        }
        ui.end_row();
    }

    if let Some(ticker) = clicked {
        let holdings = app.tracker.holdings_mut();
        if extend {
            holdings.toggle_select(&ticker);
        } else {
            holdings.select_only(&ticker);
        }
    }
}

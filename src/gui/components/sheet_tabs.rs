// src/gui/components/sheet_tabs.rs
//
// One tab per workbook sheet. Switching only changes which projection the
// table draws; the data itself is shared.

use eframe::egui;

use crate::{gui::app::App, workbook::SHEETS};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.state.gui.current_sheet;
        for (idx, sheet) in SHEETS.iter().enumerate() {
            let selected = idx == cur;
            if ui.selectable_label(selected, sheet.name).clicked() && !selected {
                logf!("UI: Tab switch {} → {}", SHEETS[cur].name, sheet.name);
                app.state.gui.current_sheet = idx;
            }
        }

        if let Some(t) = app.current_table() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} rows", t.rows.len()));
            });
        }
    });
}

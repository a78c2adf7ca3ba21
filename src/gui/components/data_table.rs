// src/gui/components/data_table.rs
//
// Read-only preview of the current sheet. Column widths follow the workbook's
// character widths.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;
use crate::workbook::{Cell, SHEETS};

/// Rough px per spreadsheet width unit
const PX_PER_CHAR: f32 = 7.5;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let sheet_ix = app.state.gui.current_sheet.min(SHEETS.len() - 1);
    let spec = SHEETS[sheet_ix];

    let Some(table) = app.current_table() else {
        ui.centered_and_justified(|ui| {
            ui.label(if app.running { "Scraping…" } else { "No data yet. Press START." });
        });
        return;
    };

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let avail_h = ui.available_height();
    egui::ScrollArea::new([true, false])
        .id_salt("inner_table_hscroll")
        .min_scrolled_height(avail_h)
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0)
                // Separate column state per sheet
                .id_salt(("sheet_table", sheet_ix));
            for col in spec.columns {
                let w = (col.width() as f32 * PX_PER_CHAR).max(40.0);
                builder = builder.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
            }

            builder
                .header(24.0, |mut header| {
                    for h in &table.headers {
                        header.col(|ui| {
                            ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                            ui.add(egui::Label::new(RichText::new(*h).strong()).selectable(false));
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, table.rows.len(), |mut row| {
                        let cells = &table.rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                let text = cell.display();
                                match cell {
                                    Cell::Money(_) => {
                                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                            ui.label(text);
                                        });
                                    }
                                    Cell::Link(url) => {
                                        ui.hyperlink_to("open", url.as_str()).on_hover_text(text);
                                    }
                                    _ => {
                                        ui.label(text);
                                    }
                                }
                            });
                        }
                    });
                });
        });
}

// src/gui/components/settings_panel.rs
//
// Left panel: run configuration. Locked while a run is in flight.

use eframe::egui;

use crate::config::consts::MAX_GUI_DELAY_SECS;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Settings");
    ui.separator();

    let mut open_folder_clicked = false;

    ui.add_enabled_ui(!app.running, |ui| {
        let scrape = &mut app.state.options.scrape;
        let gui = &mut app.state.gui;

        ui.label("Client ID:");
        if ui
            .add(egui::TextEdit::singleline(&mut scrape.client_id)
                .font(egui::TextStyle::Monospace)
                .desired_width(160.0))
            .lost_focus()
        {
            logd!("UI: client id → {:?}", scrape.client_id);
        }

        ui.add_space(6.0);
        ui.label("Delay between requests:");
        if ui
            .add(egui::Slider::new(&mut scrape.delay_secs, 0.0..=MAX_GUI_DELAY_SECS)
                .step_by(0.1)
                .suffix(" s"))
            .drag_stopped()
        {
            logd!("UI: delay → {:.1}s", scrape.delay_secs);
        }

        ui.add_space(6.0);
        if ui.checkbox(&mut gui.use_proxy, "Use proxy").changed() {
            logf!("UI: use_proxy → {}", gui.use_proxy);
        }
        ui.add_enabled(
            gui.use_proxy,
            egui::TextEdit::singleline(&mut gui.proxy_text)
                .hint_text("http://host:port")
                .font(egui::TextStyle::Monospace)
                .desired_width(160.0),
        );

        ui.add_space(6.0);
        if ui
            .checkbox(&mut scrape.fetch_details, "Fetch project details")
            .on_hover_text("Also open each project's summary and closeout pages")
            .changed()
        {
            logf!("UI: fetch_details → {}", scrape.fetch_details);
        }

        ui.add_space(6.0);
        ui.label("Output:");
        ui.horizontal(|ui| {
            if ui
                .add(egui::TextEdit::singleline(&mut gui.out_path_text)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(130.0))
                .changed()
            {
                gui.out_path_dirty = true;
                logd!("UI: out_path_text changed (dirty=true) → {}", gui.out_path_text);
            }

            if ui.button("📁").on_hover_text("Open output folder").clicked() {
                open_folder_clicked = true;
            }
        });
    });

    // Handle open folder after the borrow ends
    if open_folder_clicked {
        crate::gui::actions::open_folder(app);
    }
}

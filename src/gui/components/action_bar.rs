// src/gui/components/action_bar.rs

use eframe::egui::{self, widgets::Spinner};

use crate::gui::{actions, app::App, progress::{self, RunStatus}};
use crate::runner::RunState;

/// Page progress only makes sense while a list page is in flight.
fn shows_page_bar(running: bool, state: &RunState) -> bool {
    running && matches!(state, RunState::Fetching { .. } | RunState::Extracting { .. })
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let status = progress::lock(&app.status).clone();

    ui.horizontal(|ui| {
        let red = egui::Color32::from_rgb(220, 30, 30);
        let black = egui::Color32::BLACK;

        let button_start = ui.add_enabled(
            !app.running,
            egui::Button::new(
                egui::RichText::new("START")
                .color(black)
                .strong())
            .fill(red));

        if button_start.clicked() {
            actions::scrape(app, ui.ctx());
        }

        if app.running && !status.state.is_terminal() {
            ui.add(Spinner::new().size(16.0));
        }

        let failed = matches!(status.state, RunState::Failed { .. }) || status.message.starts_with("Error");
        if failed {
            ui.colored_label(red, status.message.as_str());
        } else if status.state == RunState::Idle && status.message == RunStatus::default().message {
            ui.weak("Set a client id and press START.");
        } else {
            ui.label(&status.message);
        }
    });

    if shows_page_bar(app.running, &status.state) {
        ui.add(
            egui::ProgressBar::new(status.fraction)
                .show_percentage()
                .text(format!("page {} · {} projects so far", status.page, status.records)),
        );
    }

    if let Some(path) = app.last_path.clone() {
        let mut open_clicked = false;
        ui.horizontal(|ui| {
            ui.label("Saved:");
            ui.monospace(path.display().to_string());
            if ui.button("Open folder").clicked() {
                open_clicked = true;
            }
        });
        if open_clicked {
            actions::open_folder(app);
        }
    }

    if let Some(stats) = &app.stats {
        ui.small(stats.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bar_only_while_a_page_is_in_flight() {
        assert!(shows_page_bar(true, &RunState::Fetching { page: 3 }));
        assert!(shows_page_bar(true, &RunState::Extracting { page: 3 }));
        assert!(!shows_page_bar(true, &RunState::Building));
        assert!(!shows_page_bar(true, &RunState::Failed { error: s!("x") }));
        assert!(!shows_page_bar(false, &RunState::Fetching { page: 1 }));
        assert!(!shows_page_bar(false, &RunState::Idle));
    }
}

// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use dsa_scrape::{config::state::GuiState, gui, loge, logging};
use eframe::egui::ViewportBuilder;

fn main() {
    logging::init(logging::LogSink::File);

    let size = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([size.window_w as f32, size.window_h as f32])
            .with_title("DSA Project Scraper"),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        loge!("GUI failed: {}", e);
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}

// src/gui/app.rs
use std::{
    error::Error,
    path::PathBuf,
    sync::{mpsc, Arc, Mutex},
};

use eframe::egui;

use crate::{
    config::state::AppState,
    error::ScrapeError,
    runner::RunSummary,
    workbook::Table,
};

use super::progress::{self, RunStatus, SharedStatus};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "DSA Project Scraper",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub type RunResult = Result<RunSummary, ScrapeError>;

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // status/progress (the worker writes here)
    pub status: SharedStatus,
    pub running: bool,
    pub rx: Option<mpsc::Receiver<RunResult>>,

    // output of the last run; a failed run leaves these empty
    pub tables: Option<[Table; 3]>,
    pub last_path: Option<PathBuf>,
    pub stats: Option<String>,
}

impl App {
    pub fn new(mut state: AppState) -> Self {
        state.gui.out_path_text = state.options.export.display_text();
        logf!("Init: client id {:?}, out {}", state.options.scrape.client_id, state.gui.out_path_text);

        Self {
            state,
            status: Arc::new(Mutex::new(RunStatus::default())),
            running: false,
            rx: None,
            tables: None,
            last_path: None,
            stats: None,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        progress::lock(&self.status).message = msg.into();
    }

    #[inline]
    pub fn current_table(&self) -> Option<&Table> {
        self.tables.as_ref()?.get(self.state.gui.current_sheet)
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        crate::gui::actions::poll(self);

        egui::SidePanel::left("settings")
            .resizable(false)
            .show(ctx, |ui| {
                crate::gui::components::settings_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::action_bar::draw(ui, self);

            ui.separator();

            crate::gui::components::sheet_tabs::draw(ui, self);

            ui.separator();

            crate::gui::components::data_table::draw(ui, self);
        });
    }
}

// src/gui/progress.rs
use std::sync::{Arc, Mutex, MutexGuard};

use eframe::egui;

use crate::progress::Progress;
use crate::runner::RunState;

/// What the worker thread reports back to the window.
#[derive(Clone, Debug)]
pub struct RunStatus {
    pub message: String,
    pub state: RunState,
    pub page: u32,
    /// Records enriched on the current page, 0.0..=1.0
    pub fraction: f32,
    pub records: usize,
}

impl Default for RunStatus {
    fn default() -> Self {
        Self {
            message: s!("Idle"),
            state: RunState::Idle,
            page: 0,
            fraction: 0.0,
            records: 0,
        }
    }
}

pub type SharedStatus = Arc<Mutex<RunStatus>>;

/// Lock that survives a panicked writer; the status is display-only.
pub fn lock(status: &SharedStatus) -> MutexGuard<'_, RunStatus> {
    status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct GuiProgress {
    status: SharedStatus,
    ctx: egui::Context,
}

impl GuiProgress {
    pub fn new(status: SharedStatus, ctx: egui::Context) -> Self {
        Self { status, ctx }
    }

    fn update(&self, f: impl FnOnce(&mut RunStatus)) {
        f(&mut lock(&self.status));
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self) {
        self.update(|s| *s = RunStatus::default());
    }

    fn log(&mut self, msg: &str) {
        self.update(|s| s.message = s!(msg));
    }

    fn state(&mut self, state: &RunState) {
        self.update(|s| {
            if let RunState::Fetching { page } = state {
                s.page = *page;
                s.fraction = 0.0;
            }
            s.message = state.to_string();
            s.state = state.clone();
        });
    }

    fn page_done(&mut self, page: u32, records: usize, total: usize) {
        self.update(|s| {
            s.fraction = 1.0;
            s.records = total;
            s.message = format!("Page {page}: {records} projects ({total} total)");
        });
    }

    fn record_done(&mut self, index: usize, of: usize) {
        self.update(|s| {
            s.fraction = if of == 0 { 1.0 } else { index as f32 / of as f32 };
            s.message = format!("Page {}: project {index}/{of}", s.page);
        });
    }
}

// src/gui/actions/scrape.rs
use std::{sync::mpsc, thread};

use eframe::egui;

use crate::{
    gui::{app::App, progress::GuiProgress},
    runner,
    workbook,
};

/// Start a run on a worker thread. The window keeps drawing; `poll` picks up the result.
pub fn scrape(app: &mut App, ctx: &egui::Context) {
    if app.running {
        return;
    }

    // GUI-only fields → options
    app.state.sync_gui_into_options();
    app.state.gui.out_path_text = app.state.options.export.display_text();

    let options = app.state.options.clone();
    logf!(
        "Scrape: Begin client={:?} delay={}s proxy={:?}",
        options.scrape.client_id,
        options.scrape.delay_secs,
        options.scrape.proxy()
    );

    let (tx, rx) = mpsc::channel();
    let mut prog = GuiProgress::new(app.status.clone(), ctx.clone());
    let repaint = ctx.clone();

    let spawned = thread::Builder::new()
        .name(s!("scrape"))
        .spawn(move || {
            // → This is where the scrape happens ←
            let result = runner::run(&options, Some(&mut prog));
            let _ = tx.send(result);
            repaint.request_repaint();
        });

    match spawned {
        Ok(_) => {
            app.running = true;
            app.rx = Some(rx);
            app.last_path = None;
            app.stats = None;
        }
        Err(e) => {
            loge!("Scrape: could not start worker: {}", e);
            app.status(format!("Error: {e}"));
        }
    }
}

/// Collect a finished run, if any.
pub fn poll(app: &mut App) {
    let Some(rx) = &app.rx else { return };

    let result = match rx.try_recv() {
        Ok(result) => result,
        Err(mpsc::TryRecvError::Empty) => return,
        Err(mpsc::TryRecvError::Disconnected) => {
            loge!("Scrape: worker ended without a result");
            app.status("Error: scrape worker stopped unexpectedly");
            app.running = false;
            app.rx = None;
            return;
        }
    };

    app.running = false;
    app.rx = None;

    match result {
        Ok(summary) => {
            logf!(
                "Scrape: OK rows={} pages={} warnings={}",
                summary.records.len(),
                summary.pages,
                summary.warnings
            );
            app.tables = Some(workbook::tables(&summary.records));
            app.stats = summary.stats.as_ref().map(|s| s.to_string());
            app.last_path = Some(summary.path);
        }
        Err(e) => {
            loge!("Scrape: Error: {}", e);
            app.status(format!("Error: {e}"));
            // Don't keep previewing the previous run's sheets under an error.
            app.tables = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::state::AppState, error::ScrapeError};

    #[test]
    fn failed_run_clears_previous_tables() {
        let mut app = App::new(AppState::default());
        app.tables = Some(workbook::tables(&[]));
        app.running = true;

        let (tx, rx) = mpsc::channel();
        tx.send(Err(ScrapeError::Config(s!("bad proxy")))).unwrap();
        app.rx = Some(rx);

        poll(&mut app);

        assert!(app.tables.is_none());
        assert!(!app.running);
        assert!(app.rx.is_none());
        assert!(crate::gui::progress::lock(&app.status).message.starts_with("Error: "));
    }

    #[test]
    fn pending_run_is_left_alone() {
        let mut app = App::new(AppState::default());
        let (_tx, rx) = mpsc::channel::<crate::gui::app::RunResult>();
        app.rx = Some(rx);
        app.running = true;

        poll(&mut app);

        assert!(app.running);
        assert!(app.rx.is_some());
    }
}

// src/gui/actions/open.rs
use crate::{file, gui::app::App};

/// Open the folder of the last workbook, or the configured output folder.
pub fn open_folder(app: &App) {
    let target = match &app.last_path {
        Some(p) => p.clone(),
        None => app.state.options.export.out_path(),
    };

    match file::open_containing_folder(&target) {
        Ok(folder) => logf!("Opened folder: {}", folder.display()),
        Err(e) => {
            loge!("Failed to open folder: {}", e);
            app.status(format!("Failed to open folder: {}", e));
        }
    }
}

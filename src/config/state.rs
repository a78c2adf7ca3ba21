// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active preview tab (index into workbook::SHEETS)
    pub current_sheet: usize,

    /// Proxy checkbox + text; folded into options.scrape.proxy on start
    pub use_proxy: bool,
    pub proxy_text: String,

    /// Output field UX (mapped onto ExportOptions on start)
    pub out_path_text: String,
    pub out_path_dirty: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1100,
            window_h: 700,
            current_sheet: 0,
            use_proxy: false,
            proxy_text: s!(),
            out_path_text: s!(),
            out_path_dirty: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    /// Mirror GUI-only fields → options before a run.
    pub fn sync_gui_into_options(&mut self) {
        self.options.scrape.proxy = if self.gui.use_proxy {
            Some(self.gui.proxy_text.trim().to_string()).filter(|p| !p.is_empty())
        } else {
            None
        };
        if self.gui.out_path_dirty {
            self.options.export.set_path(&self.gui.out_path_text);
            self.gui.out_path_dirty = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_only_applies_when_checked() {
        let mut st = AppState::default();
        st.gui.proxy_text = s!("http://proxy:3128");
        st.sync_gui_into_options();
        assert_eq!(st.options.scrape.proxy, None);

        st.gui.use_proxy = true;
        st.sync_gui_into_options();
        assert_eq!(st.options.scrape.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn dirty_out_path_is_applied_once() {
        let mut st = AppState::default();
        st.gui.out_path_text = s!("reports/run.xlsx");
        st.gui.out_path_dirty = true;
        st.sync_gui_into_options();
        assert!(!st.gui.out_path_dirty);
        assert!(st.options.export.out_path().ends_with("reports/run.xlsx"));
    }
}

// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use url::Url;

use super::consts::*;
use crate::error::ScrapeError;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// One run's configuration. Lives for a single user-triggered run; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrapeOptions {
    pub client_id: String,
    /// Seconds between consecutive requests. Negative or non-finite means no delay.
    pub delay_secs: f64,
    pub proxy: Option<String>,
    /// Follow each listing into its summary and closeout pages.
    pub fetch_details: bool,
    pub max_retries: u32,
    /// Safety cap on list pages; pagination normally ends on an empty page.
    pub max_pages: u32,
    pub timeout_secs: u64,
    pub base_url: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            client_id: s!(DEFAULT_CLIENT_ID),
            delay_secs: DEFAULT_DELAY_SECS,
            proxy: None,
            fetch_details: true,
            max_retries: DEFAULT_MAX_RETRIES,
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: s!(BASE_URL),
        }
    }
}

impl ScrapeOptions {
    pub fn delay(&self) -> Duration {
        if self.delay_secs.is_nan() || self.delay_secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
    }

    pub fn client_id(&self) -> &str {
        self.client_id.trim()
    }

    /// Proxy URL, if one was given and isn't blank.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.client_id().is_empty() {
            return Err(ScrapeError::Config(s!("client id is empty")));
        }
        if let Some(proxy) = self.proxy() {
            Url::parse(proxy)
                .map_err(|e| ScrapeError::Config(format!("invalid proxy URL {proxy:?}: {e}")))?;
        }
        if self.max_pages == 0 {
            return Err(ScrapeError::Config(s!("max pages must be at least 1")));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    dir: PathBuf,
    /// None → timestamped default name at write time.
    file_stem: Option<OsString>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: None,
        }
    }
}

impl ExportOptions {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_default_name(&self) -> bool {
        self.file_stem.is_none()
    }

    /// Final workbook path. The extension is always `.xlsx`.
    pub fn out_path(&self) -> PathBuf {
        self.out_path_at(Local::now().naive_local())
    }

    pub fn out_path_at(&self, now: NaiveDateTime) -> PathBuf {
        let stem = match &self.file_stem {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => timestamped_stem(now),
        };
        self.dir.join(join!(&stem, ".", XLSX_EXT))
    }

    /// Parse user text into dir + stem. A trailing separator or an existing
    /// directory means "directory only, default file name".
    /// A pasted `.xlsx` (any case) is dropped; other dots stay in the name.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            *self = Self::default();
            return;
        }

        let p = PathBuf::from(crate::file::normalize_separators(s));
        if crate::file::looks_like_dir_hint(Path::new(s)) || p.is_dir() {
            self.dir = p;
            self.file_stem = None;
            return;
        }

        self.dir = match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.file_stem = p.file_name().map(|name| {
            let xlsx = p.extension().is_some_and(|e| e.eq_ignore_ascii_case(XLSX_EXT));
            match p.file_stem() {
                Some(stem) if xlsx => stem.to_os_string(),
                _ => name.to_os_string(),
            }
        });
    }

    /// Text for the GUI output field.
    pub fn display_text(&self) -> String {
        match &self.file_stem {
            Some(stem) => self
                .dir
                .join(join!(stem.to_string_lossy().as_ref(), ".", XLSX_EXT))
                .to_string_lossy()
                .into_owned(),
            None => join!(self.dir.to_string_lossy().as_ref(), "/"),
        }
    }
}

/// `dsa_projects_YYYYmmdd_HHMMSS`
pub fn timestamped_stem(now: NaiveDateTime) -> String {
    format!("{}_{}", DEFAULT_FILE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(12, 5, 7).unwrap()
    }

    #[test]
    fn defaults_match_original_tool() {
        let o = ScrapeOptions::default();
        assert_eq!(o.client_id, "36-67");
        assert_eq!(o.delay(), Duration::ZERO);
        assert!(o.proxy().is_none());
        assert!(o.validate().is_ok());
    }

    #[test]
    fn delay_clamps_bad_values() {
        let mut o = ScrapeOptions::default();
        o.delay_secs = -2.0;
        assert_eq!(o.delay(), Duration::ZERO);
        o.delay_secs = f64::NAN;
        assert_eq!(o.delay(), Duration::ZERO);
        o.delay_secs = f64::INFINITY;
        assert_eq!(o.delay(), Duration::ZERO);
        o.delay_secs = 0.5;
        assert_eq!(o.delay(), Duration::from_millis(500));
    }

    #[test]
    fn blank_proxy_is_no_proxy_and_bad_proxy_is_rejected() {
        let mut o = ScrapeOptions::default();
        o.proxy = Some(s!("   "));
        assert!(o.proxy().is_none());
        assert!(o.validate().is_ok());

        o.proxy = Some(s!("not a url"));
        assert!(matches!(o.validate(), Err(ScrapeError::Config(_))));

        o.proxy = Some(s!("http://127.0.0.1:8080"));
        assert!(o.validate().is_ok());
    }

    #[test]
    fn empty_client_id_is_rejected() {
        let mut o = ScrapeOptions::default();
        o.client_id = s!("  ");
        assert!(matches!(o.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn default_out_path_is_timestamped_xlsx() {
        let e = ExportOptions::default();
        let p = e.out_path_at(noon());
        assert_eq!(p, PathBuf::from("out").join("dsa_projects_20240309_120507.xlsx"));
    }
}

// src/config/consts.rs

// Site
pub const BASE_URL: &str = "https://www.apps2.dgs.ca.gov/dsa/tracker/";
pub const LIST_PAGE: &str = "ProjectList.aspx";
pub const CLOSEOUT_PAGE: &str = "ProjectCloseout.aspx";
pub const SUMMARY_MARKER: &str = "ApplicationSummary.aspx";
pub const PAGE_PARAM: &str = "Page";
pub const LIST_TABLE_ID: &str = "ctl00_MainContent_gdvsch";

// Scrape defaults
pub const DEFAULT_CLIENT_ID: &str = "36-67";
pub const DEFAULT_DELAY_SECS: f64 = 0.0;
pub const MAX_GUI_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_MAX_PAGES: u32 = 500;

// Net
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const RETRY_BACKOFF_MS: u64 = 500;
pub const RETRY_AFTER_CAP_SECS: u64 = 60;
pub const RETRY_STATUSES: &[u16] = &[429, 500, 502, 503, 504];
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

// Local
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_PREFIX: &str = "dsa_projects";
pub const XLSX_EXT: &str = "xlsx";

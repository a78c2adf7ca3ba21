//! # Scraping "specs" module
//!
//! Page-specific extraction for the DSA tracker. Each spec knows one page's
//! HTML and nothing else:
//!
//! - `project_list` – `ProjectList.aspx`, one result page → listing records
//! - `summary` – `ApplicationSummary.aspx`, label/value cells and checkboxes
//! - `closeout` – `ProjectCloseout.aspx`, certification letter type
//!
//! ## Conventions
//! - Pure functions of the HTML string. No network, no logging spam.
//! - Structural drift yields empty results, never an error. Field problems are
//!   reported as `ParseWarning`s next to the data.
//! - URL building for these pages lives in [`Site`] so callers and tests agree
//!   on the exact strings.
//!
//! ## Call chain
//! ```text
//! runner → scrape::collect_projects → Fetch::get(site.list_url(..))
//!                                   ↘ specs::project_list::extract
//!                                   ↘ specs::summary::apply / closeout::extract
//! ```
use url::Url;

use crate::config::consts::{CLOSEOUT_PAGE, LIST_PAGE, PAGE_PARAM};
use crate::error::{ParseWarning, ScrapeError};
use crate::record::ProjectRecord;

pub mod closeout;
pub mod project_list;
pub mod summary;

/// Records found on one list page, in page order, plus anything that was skipped.
#[derive(Debug, Default)]
pub struct PageExtract {
    pub records: Vec<ProjectRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Resolved page URLs for one tracker deployment.
#[derive(Clone, Debug)]
pub struct Site {
    base: Url,
    list: Url,
    closeout: Url,
}

impl Site {
    pub fn new(base: &str) -> Result<Self, ScrapeError> {
        let bad = |e: url::ParseError| ScrapeError::Config(format!("invalid base URL {base:?}: {e}"));
        let base = Url::parse(base).map_err(bad)?;
        let list = base.join(LIST_PAGE).map_err(bad)?;
        let closeout = base.join(CLOSEOUT_PAGE).map_err(bad)?;
        Ok(Self { base, list, closeout })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Page 1 carries no page parameter.
    pub fn list_url(&self, client_id: &str, page: u32) -> String {
        let mut u = self.list.clone();
        {
            let mut q = u.query_pairs_mut();
            q.append_pair("ClientId", client_id);
            if page > 1 {
                q.append_pair(PAGE_PARAM, &page.to_string());
            }
        }
        u.into()
    }

    pub fn closeout_url(&self, origin_id: &str, app_id: &str) -> String {
        let mut u = self.closeout.clone();
        u.query_pairs_mut()
            .append_pair("OriginId", origin_id)
            .append_pair("AppId", app_id);
        u.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::BASE_URL;

    #[test]
    fn list_urls() {
        let site = Site::new(BASE_URL).unwrap();
        assert_eq!(
            site.list_url("36-67", 1),
            "https://www.apps2.dgs.ca.gov/dsa/tracker/ProjectList.aspx?ClientId=36-67"
        );
        assert_eq!(
            site.list_url("36-67", 3),
            "https://www.apps2.dgs.ca.gov/dsa/tracker/ProjectList.aspx?ClientId=36-67&Page=3"
        );
    }

    #[test]
    fn closeout_url() {
        let site = Site::new(BASE_URL).unwrap();
        assert_eq!(
            site.closeout_url("36", "120045"),
            "https://www.apps2.dgs.ca.gov/dsa/tracker/ProjectCloseout.aspx?OriginId=36&AppId=120045"
        );
    }

    #[test]
    fn bad_base_is_config_error() {
        assert!(matches!(Site::new("not a url"), Err(ScrapeError::Config(_))));
    }
}

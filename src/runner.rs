// src/runner.rs
use std::fmt;
use std::path::PathBuf;

use crate::{
    config::options::AppOptions,
    core::{Fetch, HttpFetcher, RequestStats},
    error::ScrapeError,
    progress::{self, Progress},
    record::ProjectRecord,
    scrape,
    specs::Site,
    workbook,
};

/// Where a run is. Frontends get every transition through `Progress::state`.
#[derive(Clone, Debug, PartialEq)]
pub enum RunState {
    Idle,
    Configuring,
    Fetching { page: u32 },
    Extracting { page: u32 },
    Building,
    Ready { path: PathBuf, records: usize },
    Failed { error: String },
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Ready { .. } | RunState::Failed { .. })
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Configuring => write!(f, "Configuring…"),
            RunState::Fetching { page } => write!(f, "Fetching page {page}…"),
            RunState::Extracting { page } => write!(f, "Extracting page {page}…"),
            RunState::Building => write!(f, "Building workbook…"),
            RunState::Ready { path, records } => {
                write!(f, "Done: {records} projects → {}", path.display())
            }
            RunState::Failed { error } => write!(f, "Failed: {error}"),
        }
    }
}

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub records: Vec<ProjectRecord>,
    pub pages: u32,
    pub warnings: usize,
    pub stats: Option<RequestStats>,
}

/// Top-level runner over the live site.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    options: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    let mut fetcher = match options.scrape.validate().and_then(|_| HttpFetcher::new(&options.scrape)) {
        Ok(f) => f,
        Err(e) => {
            if let Some(p) = progress.as_deref_mut() {
                p.begin();
                p.state(&RunState::Configuring);
            }
            return Err(fail(e, progress));
        }
    };
    run_with(options, &mut fetcher, progress)
}

/// Same as [`run`] with any page source.
pub fn run_with(
    options: &AppOptions,
    fetcher: &mut dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin();
        p.state(&RunState::Configuring);
    }

    match pipeline(options, fetcher, progress::reborrow(&mut progress)) {
        Ok(summary) => {
            logf!(
                "Run: {} projects, {} pages, {} warnings → {}",
                summary.records.len(),
                summary.pages,
                summary.warnings,
                summary.path.display()
            );
            if let Some(stats) = &summary.stats {
                logf!("Run: {}", stats);
            }
            if let Some(p) = progress.as_deref_mut() {
                p.state(&RunState::Ready { path: summary.path.clone(), records: summary.records.len() });
                p.finish();
            }
            Ok(summary)
        }
        Err(e) => Err(fail(e, progress)),
    }
}

fn pipeline(
    options: &AppOptions,
    fetcher: &mut dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    let opts = &options.scrape;
    opts.validate()?;
    let site = Site::new(&opts.base_url)?;
    logf!("Run: client id {:?}, delay {:?}, details={}", opts.client_id(), opts.delay(), opts.fetch_details);

    let outcome = scrape::collect_projects(fetcher, &site, opts, progress::reborrow(&mut progress))?;
    if outcome.records.is_empty() {
        return Err(ScrapeError::NoRecords(s!(opts.client_id())));
    }

    if let Some(p) = progress.as_deref_mut() {
        p.state(&RunState::Building);
    }
    let path = workbook::save(&outcome.records, &options.export.out_path())?;

    Ok(RunSummary {
        path,
        records: outcome.records,
        pages: outcome.pages_fetched,
        warnings: outcome.warnings,
        stats: fetcher.stats().cloned(),
    })
}

fn fail(e: ScrapeError, mut progress: Option<&mut dyn Progress>) -> ScrapeError {
    loge!("Run: {}", e);
    if let Some(p) = progress.as_deref_mut() {
        p.state(&RunState::Failed { error: e.to_string() });
        p.finish();
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Events(Vec<String>);

    impl Progress for Events {
        fn begin(&mut self) {
            self.0.push(s!("begin"));
        }
        fn state(&mut self, state: &RunState) {
            self.0.push(state.to_string());
        }
        fn finish(&mut self) {
            self.0.push(s!("finish"));
        }
    }

    #[test]
    fn config_failure_still_begins_first() {
        let mut options = AppOptions::default();
        options.scrape.proxy = Some(s!("not a proxy"));
        let mut events = Events::default();

        let err = run(&options, Some(&mut events)).unwrap_err();

        assert!(matches!(err, ScrapeError::Config(_)));
        assert_eq!(events.0[0], "begin");
        assert_eq!(events.0[1], "Configuring…");
        assert!(events.0[2].starts_with("Failed: "));
        assert_eq!(events.0[3], "finish");
        assert_eq!(events.0.len(), 4);
    }

    #[test]
    fn terminal_states() {
        assert!(!RunState::Fetching { page: 1 }.is_terminal());
        assert!(RunState::Failed { error: s!("x") }.is_terminal());
        assert!(RunState::Ready { path: PathBuf::from("a.xlsx"), records: 1 }.is_terminal());
    }

    #[test]
    fn state_text() {
        assert_eq!(RunState::Fetching { page: 2 }.to_string(), "Fetching page 2…");
        assert_eq!(
            RunState::Failed { error: s!("HTTP 500") }.to_string(),
            "Failed: HTTP 500"
        );
    }
}

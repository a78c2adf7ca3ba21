// src/scrape/scrape.rs
use crate::{
    config::options::ScrapeOptions,
    core::Fetch,
    error::ScrapeError,
    progress::Progress,
    record::{ProjectRecord, TextField},
    runner::RunState,
    specs::{closeout, project_list, summary, Site},
};

/// Everything one pagination pass produced.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub records: Vec<ProjectRecord>,
    pub pages_fetched: u32,
    pub warnings: usize,
}

/// Append `batch` to `collection`. Order is kept, nothing is dropped or merged.
pub fn aggregate(mut collection: Vec<ProjectRecord>, batch: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    collection.extend(batch);
    collection
}

/// Fetch the summary and closeout pages of one record and fill it in.
/// Returns the number of warnings. Fetch failures only cost the detail fields.
pub fn enrich(fetcher: &mut dyn Fetch, site: &Site, record: &mut ProjectRecord) -> usize {
    let mut warnings = 0;
    let id = record.dsa_app_id();

    match fetcher.get(&record.link) {
        Ok(html) => {
            let link = record.link.clone();
            for w in summary::apply(&html, record, &link) {
                logw!("Summary {}: {}", id, w);
                warnings += 1;
            }
        }
        Err(e) => {
            logw!("Summary {}: skipped ({})", id, e);
            warnings += 1;
        }
    }

    let url = site.closeout_url(&record.origin_id, &record.app_id);
    match fetcher.get(&url) {
        Ok(html) => match closeout::extract(&html) {
            Some(cert) => record.set_text(TextField::CertType, cert),
            None => logd!("Closeout {}: no certification letter type", id),
        },
        Err(e) => {
            logw!("Closeout {}: skipped ({})", id, e);
            warnings += 1;
        }
    }

    warnings
}

/// Walk the list pages for `opts.client_id()` until a page yields no records.
/// A failed list fetch ends the walk with that error.
pub fn collect_projects(
    fetcher: &mut dyn Fetch,
    site: &Site,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeOutcome, ScrapeError> {
    let client_id = opts.client_id();
    let mut out = ScrapeOutcome::default();
    let mut previous_links: Vec<String> = Vec::new();

    for page in 1..=opts.max_pages {
        if let Some(p) = progress.as_deref_mut() {
            p.state(&RunState::Fetching { page });
        }
        let url = site.list_url(client_id, page);
        logf!("List: page {} → {}", page, url);
        let html = fetcher.get(&url)?;
        out.pages_fetched += 1;

        if let Some(p) = progress.as_deref_mut() {
            p.state(&RunState::Extracting { page });
        }
        let extract = project_list::extract(&html, site.base());
        for w in &extract.warnings {
            logw!("List page {}: {}", page, w);
        }
        let mut page_warnings = extract.warnings.len();

        let mut batch = extract.records;
        if batch.is_empty() {
            logf!("List: page {} is empty; done", page);
            out.warnings += page_warnings;
            break;
        }

        // Some deployments ignore the page parameter and serve page 1 forever.
        let links: Vec<String> = batch.iter().map(|r| r.link.clone()).collect();
        if links == previous_links {
            logw!("List: page {} repeats page {}; stopping", page, page - 1);
            out.warnings += page_warnings;
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Page {page} repeats page {}; stopping", page - 1));
            }
            break;
        }
        previous_links = links;

        if opts.fetch_details {
            let n = batch.len();
            for (i, record) in batch.iter_mut().enumerate() {
                page_warnings += enrich(fetcher, site, record);
                if let Some(p) = progress.as_deref_mut() {
                    p.record_done(i + 1, n);
                }
            }
        }

        let found = batch.len();
        out.warnings += page_warnings;
        out.records = aggregate(std::mem::take(&mut out.records), batch);
        logf!("List: page {} → {} records ({} total)", page, found, out.records.len());
        if let Some(p) = progress.as_deref_mut() {
            p.page_done(page, found, out.records.len());
            if page_warnings > 0 {
                p.log(&format!("Page {page}: {page_warnings} fields or pages skipped (see log)"));
            }
        }

        if page == opts.max_pages {
            logw!("List: stopped at the {}-page cap", opts.max_pages);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_appends_in_order() {
        let a = vec![ProjectRecord::new("a", "1", "1"), ProjectRecord::new("b", "1", "2")];
        let b = vec![ProjectRecord::new("c", "1", "3")];
        let all = aggregate(aggregate(Vec::new(), a), b);
        let links: Vec<&str> = all.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["a", "b", "c"]);
    }

    #[test]
    fn aggregate_keeps_duplicates() {
        let r = ProjectRecord::new("a", "1", "1");
        let all = aggregate(vec![r.clone()], vec![r.clone()]);
        assert_eq!(all.len(), 2);
    }
}

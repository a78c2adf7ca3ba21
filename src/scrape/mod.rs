// src/scrape/mod.rs
mod scrape;

pub use scrape::aggregate;
pub use scrape::collect_projects;
pub use scrape::enrich;
pub use scrape::ScrapeOutcome;

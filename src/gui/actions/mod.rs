// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{scrape, poll, open_folder}.

mod open;    // src/gui/actions/open.rs
mod scrape;  // src/gui/actions/scrape.rs

pub use open::open_folder;
pub use scrape::{poll, scrape};

// src/specs/closeout.rs
//! Spec for `ProjectCloseout.aspx`: the project's certification letter type.
//!
//! Preferred source is the cell after `Last Certification Letter Type:`. Older
//! closeout pages only mention the letter in free text, so known letter titles
//! are searched for as a fallback, in priority order.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::core::html::element_text;
use crate::core::sanitize::{label_key, normalize_ws};

const CERT_LABEL: &str = "Last Certification Letter Type:";

static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));

static CERT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)#\d+-Certification & Close of File(?:\s+Per EDU Code \d+\(\w+\)\s+OR\s+\d+\(\w+\))?",
        r"(?i)DSA 301P Notification of Requirement for Certification",
        r"(?i)#\d+-Close of File w/o Certification - Exceptions",
        r"(?i)1 YR VOID",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

pub fn extract(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    labelled(&doc).or_else(|| by_pattern(&doc))
}

fn labelled(doc: &Html) -> Option<String> {
    let key = label_key(CERT_LABEL);
    let cells: Vec<ElementRef> = doc.select(&CELL).collect();
    let i = cells.iter().position(|c| label_key(&element_text(c)) == key)?;
    let value = element_text(cells.get(i + 1)?);
    (!value.is_empty()).then_some(value)
}

/// Whole text node of the first match, for the first pattern that matches anywhere.
fn by_pattern(doc: &Html) -> Option<String> {
    let nodes: Vec<String> = doc
        .root_element()
        .text()
        .map(normalize_ws)
        .filter(|t| !t.is_empty())
        .collect();

    CERT_PATTERNS
        .iter()
        .find_map(|re| nodes.iter().find(|t| re.is_match(t)).cloned())
}

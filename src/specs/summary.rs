// src/specs/summary.rs
//! Spec for `ApplicationSummary.aspx`.
//!
//! The page is a loose grid of label/value cell pairs:
//! ```text
//! <td>PTN #:</td><td>12345-67</td><td>Estimated Amt:</td><td>$1,200,000.00</td>
//! <input type=checkbox checked><td>Access Compliance</td>
//! ```
//! Values are the `<td>` that follows the label in document order. Indicators
//! take the state of the nearest checkbox before their label cell.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::core::html::element_text;
use crate::core::sanitize::{label_key, parse_date, parse_money, Parsed};
use crate::error::ParseWarning;
use crate::record::{DateField, Indicator, MoneyField, ProjectRecord, TextField};

static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));
static CELL_OR_CHECKBOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, input[type=checkbox]").expect("static selector"));

#[derive(Clone, Copy, Debug)]
enum Target {
    Text(&'static [TextField]),
    Money(MoneyField),
    Date(DateField),
}

const LABELS: &[(&str, Target)] = &[
    ("PTN #:", Target::Text(&[TextField::Ptn, TextField::PtnNo])),
    ("Project Name:", Target::Text(&[TextField::ProjectName])),
    ("Project Scope:", Target::Text(&[TextField::ProjectScope])),
    ("Office ID:", Target::Text(&[TextField::OfficeId])),
    ("Application #:", Target::Text(&[TextField::ApplicationNo])),
    ("File #:", Target::Text(&[TextField::FileNo])),
    ("OPSC #:", Target::Text(&[TextField::OpscNo])),
    ("Project Type:", Target::Text(&[TextField::ProjectType])),
    ("Project Class:", Target::Text(&[TextField::ProjectClass])),
    ("Special Type:", Target::Text(&[TextField::SpecialType])),
    ("# Of Incr:", Target::Text(&[TextField::Increments])),
    ("Address:", Target::Text(&[TextField::Address])),
    ("City:", Target::Text(&[TextField::City])),
    ("Zip:", Target::Text(&[TextField::Zip])),
    ("Estimated Amt:", Target::Money(MoneyField::Estimated)),
    ("Contracted Amt:", Target::Money(MoneyField::Contracted)),
    ("Construction Change Document Amt:", Target::Money(MoneyField::ChangeDocument)),
    ("Final Project Cost:", Target::Money(MoneyField::FinalCost)),
    ("Adj Est.Date#1:", Target::Date(DateField::Adjustment1)),
    ("Adj Est.Amt#1:", Target::Money(MoneyField::Adjustment1)),
    ("Adj Est.Date#2:", Target::Date(DateField::Adjustment2)),
    ("Adj Est.Amt#2:", Target::Money(MoneyField::Adjustment2)),
    ("Received Date:", Target::Date(DateField::Received)),
    ("Approved Date:", Target::Date(DateField::Approved)),
    ("Approval Ext. Date:", Target::Date(DateField::ApprovalExt)),
    ("Closed Date:", Target::Date(DateField::Closed)),
    ("Complete Submittal Received Date:", Target::Date(DateField::CompleteSubmittal)),
];

/// Fill `record` from a summary page. Fields the page doesn't show are left as they were.
/// `context` names the page in warnings (usually its URL).
pub fn apply(html: &str, record: &mut ProjectRecord, context: &str) -> Vec<ParseWarning> {
    let doc = Html::parse_document(html);
    let mut warnings = Vec::new();

    apply_labels(&doc, record, context, &mut warnings);
    apply_indicators(&doc, record);

    warnings
}

fn apply_labels(doc: &Html, record: &mut ProjectRecord, context: &str, warnings: &mut Vec<ParseWarning>) {
    let cells: Vec<ElementRef> = doc.select(&CELL).collect();
    let keys: Vec<String> = LABELS.iter().map(|(label, _)| label_key(label)).collect();
    let mut seen = [false; LABELS.len()];

    for (i, cell) in cells.iter().enumerate() {
        let key = label_key(&element_text(cell));
        let Some(idx) = keys.iter().position(|k| *k == key) else {
            continue;
        };
        if seen[idx] {
            continue;
        }
        seen[idx] = true;

        let Some(value_cell) = cells.get(i + 1) else {
            continue;
        };
        let raw = element_text(value_cell);
        let (label, target) = LABELS[idx];

        match target {
            Target::Text(fields) => {
                if raw.is_empty() {
                    continue;
                }
                for f in fields {
                    record.set_text(*f, raw.as_str());
                }
            }
            Target::Money(f) => match parse_money(&raw) {
                Parsed::Value(v) => record.set_money(f, Some(v)),
                Parsed::Missing => {}
                Parsed::Invalid(s) => {
                    warnings.push(ParseWarning::new(context, label, format!("not an amount: {s:?}")))
                }
            },
            Target::Date(f) => match parse_date(&raw) {
                Parsed::Value(d) => record.set_date(f, Some(d)),
                Parsed::Missing => {}
                Parsed::Invalid(s) => {
                    warnings.push(ParseWarning::new(context, label, format!("not a date: {s:?}")))
                }
            },
        }
    }
}

fn apply_indicators(doc: &Html, record: &mut ProjectRecord) {
    let keys: Vec<String> = Indicator::ALL.iter().map(|i| label_key(i.label())).collect();
    let mut seen = [false; Indicator::ALL.len()];
    let mut last_checked: Option<bool> = None;

    for el in doc.select(&CELL_OR_CHECKBOX) {
        if el.value().name().eq_ignore_ascii_case("input") {
            last_checked = Some(el.value().attr("checked").is_some());
            continue;
        }

        let key = label_key(&element_text(&el));
        let Some(idx) = keys.iter().position(|k| *k == key) else {
            continue;
        };
        if seen[idx] {
            continue;
        }
        seen[idx] = true;
        record.set_flag(Indicator::ALL[idx], last_checked.unwrap_or(false));
    }
}

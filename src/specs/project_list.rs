// src/specs/project_list.rs
//! Spec for one `ProjectList.aspx` result page.
//!
//! Layout (ASP.NET GridView):
//! ```text
//! <table id="ctl00_MainContent_gdvsch">
//!   <tr><th>..</th>…</tr>                                  header, skipped
//!   <tr><td><a href="ApplicationSummary.aspx?OriginId=36&AppId=120045">…</a></td>
//!       <td>…</td><td>PROJECT NAME</td>…</tr>
//!   <tr><td colspan=..><table>1 2 3 …</table></td></tr>    pager, skipped
//! </table>
//! ```
//! Rows need ≥ 3 cells and a summary link in the first cell. Everything else
//! is silently not a project row.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::PageExtract;
use crate::config::consts::{LIST_TABLE_ID, SUMMARY_MARKER};
use crate::core::html::{element_text, query_param, row_cells};
use crate::error::ParseWarning;
use crate::record::{ProjectRecord, TextField};

static TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("table#{LIST_TABLE_ID}")).expect("static selector")
});
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// Extract the listing records of one page, in page order.
/// A page without the results table yields nothing.
pub fn extract(html: &str, base: &Url) -> PageExtract {
    let doc = Html::parse_document(html);
    let mut out = PageExtract::default();

    let Some(table) = doc.select(&TABLE).next() else {
        logd!("List: table #{} not found", LIST_TABLE_ID);
        return out;
    };

    for (i, row) in table.select(&ROW).enumerate() {
        let cells = row_cells(&row);
        if cells.len() < 3 {
            continue;
        }

        let Some(href) = cells[0]
            .select(&ANCHOR)
            .filter_map(|a| a.value().attr("href"))
            .find(|h| h.to_ascii_lowercase().contains(&SUMMARY_MARKER.to_ascii_lowercase()))
        else {
            continue;
        };

        let context = format!("row {i}");
        let link = match base.join(href.trim()) {
            Ok(u) => u,
            Err(e) => {
                out.warnings.push(ParseWarning::new(context, "Link", format!("bad href {href:?}: {e}")));
                continue;
            }
        };

        let origin_id = query_param(&link, "OriginId").unwrap_or_default();
        let app_id = query_param(&link, "AppId").unwrap_or_default();
        let mut record = ProjectRecord::new(link.as_str(), origin_id, app_id);
        if !record.is_valid() {
            out.warnings.push(ParseWarning::new(
                context,
                "DSA AppId",
                format!("OriginId/AppId missing in {link}"),
            ));
            continue;
        }

        let name = element_text(&cells[2]);
        if name.is_empty() {
            out.warnings.push(ParseWarning::new(
                format!("{context} ({})", record.dsa_app_id()),
                "Project Name",
                "empty cell",
            ));
        }
        record.set_text(TextField::ProjectName, name);

        out.records.push(record);
    }

    out
}

// src/core/html.rs
use scraper::ElementRef;
use url::Url;

use super::sanitize::normalize_ws;

/// Visible text of an element, whitespace collapsed and trimmed.
pub fn element_text(el: &ElementRef) -> String {
    let raw: String = el.text().collect();
    normalize_ws(&raw)
}

/// Direct `<td>` children of a row. Nested tables don't leak into the parent row.
pub fn row_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name().eq_ignore_ascii_case("td"))
        .collect()
}

/// First value of a query parameter, empty values treated as missing.
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn text_is_normalized() {
        let doc = Html::parse_fragment("<div>  Project&nbsp;<b>Name</b>\n  here </div>");
        let sel = Selector::parse("div").unwrap();
        let div = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(&div), "Project Name here");
    }

    #[test]
    fn row_cells_skip_nested_tables() {
        let doc = Html::parse_document(
            "<table><tr id=r><td>a</td><td><table><tr><td>x</td><td>y</td></tr></table></td></tr></table>",
        );
        let sel = Selector::parse("tr#r").unwrap();
        let row = doc.select(&sel).next().unwrap();
        assert_eq!(row_cells(&row).len(), 2);
    }

    #[test]
    fn query_params_are_case_insensitive() {
        let u = Url::parse("https://x.test/a.aspx?originid=36&AppId=101&Empty=").unwrap();
        assert_eq!(query_param(&u, "OriginId").as_deref(), Some("36"));
        assert_eq!(query_param(&u, "AppId").as_deref(), Some("101"));
        assert_eq!(query_param(&u, "Empty"), None);
        assert_eq!(query_param(&u, "Missing"), None);
    }
}

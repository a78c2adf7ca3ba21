// src/core/sanitize.rs
use chrono::{Datelike, NaiveDate};

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Comparison key for label cells: lowercase, single spaces, trimmed.
pub fn label_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// Outcome of parsing one optional source value.
#[derive(Clone, Debug, PartialEq)]
pub enum Parsed<T> {
    /// Blank or placeholder on the page
    Missing,
    Value(T),
    /// Present but unreadable; the raw text is kept for the warning
    Invalid(String),
}

impl<T> Parsed<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Value(v) => Some(v),
            _ => None,
        }
    }
}

fn is_placeholder(s: &str) -> bool {
    matches!(s, "" | "-" | "--" | "n/a" | "N/A" | "NA")
}

/// `$1,234.56`, `1234`, `(500.00)` (negative). Placeholders are `Missing`.
pub fn parse_money(raw: &str) -> Parsed<f64> {
    let s = normalize_ws(raw);
    if is_placeholder(&s) {
        return Parsed::Missing;
    }

    let (negative, body) = match s.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim()),
            None => (false, s.as_str()),
        },
    };

    let digits: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => Parsed::Value(if negative { -v } else { v }),
        _ => Parsed::Invalid(s),
    }
}

/// Years a spreadsheet date cell can hold.
pub const DATE_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// `mm/dd/yyyy` (also `m/d/yy` and ISO `yyyy-mm-dd`). A trailing time part is ignored.
/// Years outside [`DATE_YEARS`] are typos on the site and come back `Invalid`.
pub fn parse_date(raw: &str) -> Parsed<NaiveDate> {
    let s = normalize_ws(raw);
    if is_placeholder(&s) {
        return Parsed::Missing;
    }
    let token = s.split(' ').next().unwrap_or_default();

    let parsed = if token.contains('/') {
        let short_year = token.rsplit('/').next().map(|y| y.len() <= 2).unwrap_or(false);
        let fmt = if short_year { "%m/%d/%y" } else { "%m/%d/%Y" };
        NaiveDate::parse_from_str(token, fmt)
    } else {
        NaiveDate::parse_from_str(token, "%Y-%m-%d")
    };

    match parsed {
        Ok(d) if DATE_YEARS.contains(&d.year()) => Parsed::Value(d),
        _ => Parsed::Invalid(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  PTN \n\t #: "), "PTN #:");
        assert_eq!(label_key("Project   NAME:"), "project name:");
    }

    #[test]
    fn money_formats() {
        assert_eq!(parse_money("$1,234.56"), Parsed::Value(1234.56));
        assert_eq!(parse_money("  $ 2,000 "), Parsed::Value(2000.0));
        assert_eq!(parse_money("(500.00)"), Parsed::Value(-500.0));
        assert_eq!(parse_money("-$10"), Parsed::Value(-10.0));
        assert_eq!(parse_money(""), Parsed::Missing);
        assert_eq!(parse_money("N/A"), Parsed::Missing);
        assert_eq!(parse_money("TBD"), Parsed::Invalid(s!("TBD")));
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert_eq!(parse_date("03/15/2021"), Parsed::Value(d));
        assert_eq!(parse_date("3/15/2021"), Parsed::Value(d));
        assert_eq!(parse_date("03/15/21"), Parsed::Value(d));
        assert_eq!(parse_date("2021-03-15"), Parsed::Value(d));
        assert_eq!(parse_date("03/15/2021 12:00:00 AM"), Parsed::Value(d));
        assert_eq!(parse_date(" "), Parsed::Missing);
        assert_eq!(parse_date("13/45/2021"), Parsed::Invalid(s!("13/45/2021")));
    }

    #[test]
    fn typo_years_are_invalid() {
        assert_eq!(parse_date("06/01/1021"), Parsed::Invalid(s!("06/01/1021")));
        assert_eq!(parse_date("0201-06-01"), Parsed::Invalid(s!("0201-06-01")));
        assert!(matches!(parse_date("12/31/9999"), Parsed::Value(_)));
    }
}

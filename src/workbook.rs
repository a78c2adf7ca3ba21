// src/workbook.rs
//
// The three output sheets are pure column projections of one record slice, so
// every sheet has the same rows in the same order. `tables` is what the GUI
// previews; `to_bytes`/`save` serialize the same projection to .xlsx.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{
    Color, ExcelDateTime, Format, FormatBorder, Workbook, Worksheet, XlsxError,
};

use crate::core::sanitize::DATE_YEARS;
use crate::error::ScrapeError;
use crate::record::{DateField, Indicator, MoneyField, ProjectRecord, TextField};

const HEADER_FILL: u32 = 0xD3D3D3;
const MONEY_FORMAT: &str = "$#,##0.00";
const DATE_FORMAT: &str = "mm/dd/yyyy";
/// Excel's per-cell character limit.
const MAX_CELL_CHARS: usize = 32_767;

const MONEY_WIDTH: f64 = 15.0;
const DATE_WIDTH: f64 = 12.0;
const DEFAULT_WIDTH: f64 = 20.0;

/// Where a column's value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Link,
    AppId,
    Text(TextField),
    Money(MoneyField),
    Date(DateField),
    Flag(Indicator),
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub header: &'static str,
    pub source: Source,
    width: Option<f64>,
}

impl Column {
    const fn new(header: &'static str, source: Source) -> Self {
        Self { header, source, width: None }
    }

    const fn sized(header: &'static str, source: Source, width: f64) -> Self {
        Self { header, source, width: Some(width) }
    }

    pub fn width(&self) -> f64 {
        match (self.width, self.source) {
            (Some(w), _) => w,
            (None, Source::Money(_)) => MONEY_WIDTH,
            (None, Source::Date(_)) => DATE_WIDTH,
            (None, _) => DEFAULT_WIDTH,
        }
    }
}

#[derive(Debug)]
pub struct SheetSpec {
    pub name: &'static str,
    pub columns: &'static [Column],
}

pub static PROJECT_LIST: SheetSpec = SheetSpec {
    name: "Project List",
    columns: &[
        Column::sized("Link", Source::Link, 8.0),
        Column::sized("DSA AppId", Source::AppId, 15.0),
        Column::sized("PTN", Source::Text(TextField::Ptn), 15.0),
        Column::sized("Project Name", Source::Text(TextField::ProjectName), 30.0),
        Column::sized("Project Scope", Source::Text(TextField::ProjectScope), 40.0),
        Column::sized("Project Cert Type", Source::Text(TextField::CertType), 30.0),
    ],
};

pub static FINANCIAL_DETAILS: SheetSpec = SheetSpec {
    name: "Financial Details",
    columns: &[
        Column::new("DSA AppId", Source::AppId),
        Column::new("Project Name", Source::Text(TextField::ProjectName)),
        Column::new("PTN", Source::Text(TextField::Ptn)),
        Column::new("Estimated Amount", Source::Money(MoneyField::Estimated)),
        Column::new("Contracted Amount", Source::Money(MoneyField::Contracted)),
        Column::new("Change Document Amount", Source::Money(MoneyField::ChangeDocument)),
        Column::new("Final Project Cost", Source::Money(MoneyField::FinalCost)),
        Column::new("Received Date", Source::Date(DateField::Received)),
        Column::new("Approved Date", Source::Date(DateField::Approved)),
        Column::new("Closed Date", Source::Date(DateField::Closed)),
        Column::new("Project Type", Source::Text(TextField::ProjectType)),
        Column::new("Project Class", Source::Text(TextField::ProjectClass)),
        Column::new("Address", Source::Text(TextField::Address)),
        Column::new("City", Source::Text(TextField::City)),
    ],
};

pub static TECHNICAL_REQUIREMENTS: SheetSpec = SheetSpec {
    name: "Technical Requirements",
    columns: &[
        Column::new("DSA AppId", Source::AppId),
        Column::new("Project Name", Source::Text(TextField::ProjectName)),
        Column::new("Project Type", Source::Text(TextField::ProjectType)),
        Column::new("Project Class", Source::Text(TextField::ProjectClass)),
        Column::new("Access Compliance", Source::Flag(Indicator::AccessCompliance)),
        Column::new("Fire & Life Safety", Source::Flag(Indicator::FireLifeSafety)),
        Column::new("Structural Safety", Source::Flag(Indicator::StructuralSafety)),
        Column::new("Auto Fire Detection", Source::Flag(Indicator::AutoFireDetection)),
        Column::new("Sprinkler System", Source::Flag(Indicator::SprinklerSystem)),
        Column::new("Field Review", Source::Flag(Indicator::FieldReview)),
        Column::new("CGS Review", Source::Flag(Indicator::CgsReview)),
        Column::new("HPS", Source::Flag(Indicator::Hps)),
        Column::new("Special Type", Source::Text(TextField::SpecialType)),
        Column::new("Number of Increments", Source::Text(TextField::Increments)),
    ],
};

/// Sheet order in the workbook.
pub static SHEETS: [&SheetSpec; 3] = [&PROJECT_LIST, &FINANCIAL_DETAILS, &TECHNICAL_REQUIREMENTS];

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Link(String),
    Money(f64),
    Date(NaiveDate),
    Flag(bool),
}

impl Cell {
    fn project(record: &ProjectRecord, source: Source) -> Cell {
        match source {
            Source::Link => Cell::Link(record.link.clone()),
            Source::AppId => Cell::Text(record.dsa_app_id()),
            Source::Text(f) => record.text(f).map_or(Cell::Empty, |t| Cell::Text(s!(t))),
            Source::Money(f) => record.money(f).map_or(Cell::Empty, Cell::Money),
            Source::Date(f) => record.date(f).map_or(Cell::Empty, Cell::Date),
            Source::Flag(i) => record.flag(i).map_or(Cell::Empty, Cell::Flag),
        }
    }

    /// Text as shown in the preview table.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => s!(),
            Cell::Text(t) | Cell::Link(t) => t.clone(),
            Cell::Money(v) => fmt_money(*v),
            Cell::Date(d) => d.format("%m/%d/%Y").to_string(),
            Cell::Flag(b) => s!(yes_no(*b)),
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

/// `$1,234.56`, negatives as `-$1,234.56`.
fn fmt_money(v: f64) -> String {
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// One projected sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn project(spec: &SheetSpec, records: &[ProjectRecord]) -> Self {
        Self {
            name: spec.name,
            headers: spec.columns.iter().map(|c| c.header).collect(),
            rows: records
                .iter()
                .map(|r| spec.columns.iter().map(|c| Cell::project(r, c.source)).collect())
                .collect(),
        }
    }
}

/// All three sheets, in workbook order.
pub fn tables(records: &[ProjectRecord]) -> [Table; 3] {
    SHEETS.map(|spec| Table::project(spec, records))
}

/// Longest prefix Excel will take in one cell.
fn clip(s: &str) -> &str {
    s.char_indices().nth(MAX_CELL_CHARS).map_or(s, |(i, _)| &s[..i])
}

/// `None` when Excel has no serial for the day; the cell then gets the text form.
fn excel_date(d: &NaiveDate) -> Option<ExcelDateTime> {
    if !DATE_YEARS.contains(&d.year()) {
        return None;
    }
    ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8).ok()
}

struct Formats {
    header: Format,
    money: Format,
    date: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_border(FormatBorder::Thin),
            money: Format::new().set_num_format(MONEY_FORMAT),
            date: Format::new().set_num_format(DATE_FORMAT),
        }
    }
}

fn write_sheet(ws: &mut Worksheet, spec: &SheetSpec, table: &Table, fmt: &Formats) -> Result<(), XlsxError> {
    ws.set_name(spec.name)?;

    for (c, col) in spec.columns.iter().enumerate() {
        let c = c as u16;
        ws.set_column_width(c, col.width())?;
        ws.write_string_with_format(0, c, col.header, &fmt.header)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(t) => {
                    ws.write_string(r, c, clip(t))?;
                }
                Cell::Link(u) => {
                    if ws.write_url(r, c, u.as_str()).is_err() {
                        ws.write_string(r, c, clip(u))?;
                    }
                }
                Cell::Money(v) => {
                    ws.write_number_with_format(r, c, *v, &fmt.money)?;
                }
                Cell::Date(d) => match excel_date(d) {
                    Some(dt) => {
                        ws.write_datetime_with_format(r, c, &dt, &fmt.date)?;
                    }
                    None => {
                        ws.write_string(r, c, cell.display())?;
                    }
                },
                Cell::Flag(b) => {
                    ws.write_string(r, c, yes_no(*b))?;
                }
            }
        }
    }

    ws.set_freeze_panes(1, 0)?;
    Ok(())
}

fn build(records: &[ProjectRecord]) -> Result<Vec<u8>, XlsxError> {
    let fmt = Formats::new();
    let mut wb = Workbook::new();
    for (spec, table) in SHEETS.iter().zip(tables(records).iter()) {
        let ws = wb.add_worksheet();
        write_sheet(ws, spec, table, &fmt)?;
    }
    wb.save_to_buffer()
}

/// Serialize the workbook in memory.
pub fn to_bytes(records: &[ProjectRecord]) -> Result<Vec<u8>, ScrapeError> {
    build(records).map_err(|e| ScrapeError::serialization("<memory>", e))
}

/// Write the workbook to `path`. Returns the path written.
pub fn save(records: &[ProjectRecord], path: &Path) -> Result<PathBuf, ScrapeError> {
    let bytes = build(records).map_err(|e| ScrapeError::serialization(path.display(), e))?;
    let out = crate::file::write_atomic(path, &bytes)?;
    logf!("Workbook: {} rows → {}", records.len(), out.display());
    Ok(out)
}

// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use url::Url;

use dsa_scrape::{
    config::consts::BASE_URL,
    record::ProjectRecord,
    specs::{project_list, summary},
    workbook,
};

/// A full 50-row result page plus pager, shaped like the live GridView.
fn list_sample() -> String {
    let rows: String = (0..50)
        .map(|i| format!(
            r#"<tr><td><a href="ApplicationSummary.aspx?OriginId=36&amp;AppId={}">View</a></td><td>36 {}</td><td>School Project {}</td><td>Alteration</td></tr>"#,
            120000 + i, 120000 + i, i
        ))
        .collect();
    format!(
        r#"<html><body><table id="ctl00_MainContent_gdvsch"><tr><th>Link</th><th>App</th><th>Name</th><th>Type</th></tr>{rows}<tr><td colspan="4">1 2 3</td></tr></table></body></html>"#
    )
}

fn summary_sample() -> String {
    let mut cells = String::new();
    for (label, value) in [
        ("PTN #:", "65490-12"), ("Project Name:", "Gym"), ("Project Scope:", "Bleachers"),
        ("Office ID:", "01"), ("Project Type:", "Alteration"), ("Project Class:", "K-12"),
        ("Address:", "1 Main St"), ("City:", "Fresno"), ("Zip:", "93650"),
        ("Estimated Amt:", "$1,200,000.00"), ("Contracted Amt:", "$1,150,000.00"),
        ("Received Date:", "03/15/2021"), ("Approved Date:", "06/01/2021"),
    ] {
        cells.push_str(&format!("<tr><td>{label}</td><td>{value}</td></tr>"));
    }
    for label in ["Access Compliance", "Fire &amp; Life Safety", "Structural Safety", "HPS"] {
        cells.push_str(&format!(r#"<tr><td><input type="checkbox" checked></td><td>{label}</td></tr>"#));
    }
    format!("<html><body><table>{cells}</table></body></html>")
}

fn bench_extract(c: &mut Criterion) {
    let base = Url::parse(BASE_URL).expect("base url");
    let list = list_sample();
    let detail = summary_sample();

    c.bench_function("project_list_extract", |b| {
        b.iter(|| {
            let out = project_list::extract(black_box(&list), &base);
            black_box(out.records.len())
        })
    });

    c.bench_function("summary_apply", |b| {
        b.iter(|| {
            let mut r = ProjectRecord::new("l", "36", "1");
            let w = summary::apply(black_box(&detail), &mut r, "bench");
            black_box((r, w.len()))
        })
    });

    let records = project_list::extract(&list, &base).records;
    c.bench_function("workbook_to_bytes_50", |b| {
        b.iter(|| {
            let bytes = workbook::to_bytes(black_box(&records)).expect("workbook");
            black_box(bytes.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);

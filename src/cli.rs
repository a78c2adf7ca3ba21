// src/cli.rs
use std::env;

use crate::config::options::AppOptions;
use crate::error::ScrapeError;
use crate::logging::{self, LogSink};
use crate::progress::Progress;
use crate::runner::{self, RunState};

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Run,
    Help,
}

pub fn run() -> Result<(), ScrapeError> {
    logging::init(LogSink::Stderr);

    let mut options = AppOptions::default();
    if parse_args(env::args().skip(1), &mut options)? == CliAction::Help {
        eprintln!("{HELP}");
        return Ok(());
    }

    let mut progress = CliProgress::default();
    match runner::run(&options, Some(&mut progress)) {
        Ok(summary) => {
            println!("{}", summary.path.display());
            if let Some(stats) = &summary.stats {
                eprintln!("{stats}");
            }
            Ok(())
        }
        Err(ScrapeError::NoRecords(id)) => {
            eprintln!("No projects found for client id {id:?}");
            Err(ScrapeError::NoRecords(id))
        }
        Err(e) => Err(e),
    }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, ScrapeError> {
    args.next()
        .ok_or_else(|| ScrapeError::Config(format!("Missing value for {flag}")))
}

fn number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, ScrapeError> {
    raw.trim()
        .parse()
        .map_err(|_| ScrapeError::Config(format!("Invalid value for {flag}: {raw:?}")))
}

pub fn parse_args<I: Iterator<Item = String>>(
    mut args: I,
    options: &mut AppOptions,
) -> Result<CliAction, ScrapeError> {
    let scrape = &mut options.scrape;
    while let Some(a) = args.next() {
        match a.as_str() {
            "--client-id" => scrape.client_id = value(&mut args, &a)?,
            "--delay" => {
                let secs: f64 = number(&value(&mut args, &a)?, &a)?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(ScrapeError::Config(format!("--delay must be ≥ 0, got {secs}")));
                }
                scrape.delay_secs = secs;
            }
            "--proxy" => scrape.proxy = Some(value(&mut args, &a)?),
            "-o" | "--out" => options.export.set_path(&value(&mut args, &a)?),
            "--no-details" => scrape.fetch_details = false,
            "--retries" => scrape.max_retries = number(&value(&mut args, &a)?, &a)?,
            "--max-pages" => scrape.max_pages = number(&value(&mut args, &a)?, &a)?,
            "-h" | "--help" => return Ok(CliAction::Help),
            _ => return Err(ScrapeError::Config(format!("Unknown arg: {}", a))),
        }
    }
    Ok(CliAction::Run)
}

/// Progress lines on stderr; stdout only carries the written path.
#[derive(Default)]
pub struct CliProgress {
    last_page: u32,
}

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn state(&mut self, state: &RunState) {
        match state {
            RunState::Fetching { page } => self.last_page = *page,
            RunState::Building | RunState::Failed { .. } => eprintln!("{state}"),
            _ => {}
        }
    }

    fn page_done(&mut self, page: u32, records: usize, total: usize) {
        eprintln!("Page {page}: {records} projects ({total} total)");
    }

    fn finish(&mut self) {
        logd!("CLI: finished after page {}", self.last_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<(CliAction, AppOptions), ScrapeError> {
        let mut o = AppOptions::default();
        let action = parse_args(args.iter().map(|a| s!(*a)), &mut o)?;
        Ok((action, o))
    }

    #[test]
    fn no_args_uses_defaults() {
        let (action, o) = parse(&[]).unwrap();
        assert_eq!(action, CliAction::Run);
        assert_eq!(o, AppOptions::default());
    }

    #[test]
    fn flags_map_onto_options() {
        let (_, o) = parse(&[
            "--client-id", "01-23", "--delay", "0.5", "--proxy", "http://p:8080",
            "--no-details", "--retries", "0", "--max-pages", "10", "-o", "reports/run.xlsx",
        ])
        .unwrap();
        assert_eq!(o.scrape.client_id, "01-23");
        assert_eq!(o.scrape.delay_secs, 0.5);
        assert_eq!(o.scrape.proxy.as_deref(), Some("http://p:8080"));
        assert!(!o.scrape.fetch_details);
        assert_eq!(o.scrape.max_retries, 0);
        assert_eq!(o.scrape.max_pages, 10);
        assert_eq!(o.export.out_path(), PathBuf::from("reports").join("run.xlsx"));
    }

    #[test]
    fn help_short_circuits() {
        let (action, _) = parse(&["--help", "--bogus"]).unwrap();
        assert_eq!(action, CliAction::Help);
    }

    #[test]
    fn bad_input_is_config_error() {
        assert!(matches!(parse(&["--delay", "-1"]), Err(ScrapeError::Config(_))));
        assert!(matches!(parse(&["--delay", "soon"]), Err(ScrapeError::Config(_))));
        assert!(matches!(parse(&["--retries"]), Err(ScrapeError::Config(_))));
        assert!(matches!(parse(&["--frobnicate"]), Err(ScrapeError::Config(_))));
    }
}

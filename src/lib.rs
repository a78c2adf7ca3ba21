// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod logging;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod file;
pub mod gui;
pub mod progress;
pub mod record;
pub mod runner;
pub mod scrape;
pub mod workbook;

use anyhow::Result;
use serde::Serialize;
use sifter_config::AppConfig;
use sifter_tables::LoadReport;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::invalid_input;

pub mod columns;
pub mod completions;
pub mod process;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Loads every input, logging skipped files. Fails only when nothing loaded.
pub fn load_inputs(files: &[PathBuf]) -> Result<LoadReport> {
    let report = sifter_tables::load_tables(files);
    for failure in &report.failures {
        warn!(path = %failure.path, error = %failure.message, "skipping input file");
    }
    for table in &report.tables {
        debug!(file = table.source(), rows = table.len(), "input loaded");
    }
    if report.tables.is_empty() {
        return Err(invalid_input("no input file could be read"));
    }
    Ok(report)
}

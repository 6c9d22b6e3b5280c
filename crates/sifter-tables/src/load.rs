use crate::source::open_source;
use serde::Serialize;
use sifter_core::Table;
use std::path::Path;

/// A file that could not be turned into a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub tables: Vec<Table>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Table::len).sum()
    }
}

/// Loads every path in order. A file that fails to open or parse is recorded
/// and skipped; the others still load.
pub fn load_tables<P: AsRef<Path>>(paths: &[P]) -> LoadReport {
    let mut report = LoadReport::default();
    for path in paths {
        let path = path.as_ref();
        match open_source(path).and_then(|source| source.read_table()) {
            Ok(table) => report.tables.push(table),
            Err(err) => report.failures.push(LoadFailure {
                path: path.display().to_string(),
                message: err.to_string(),
            }),
        }
    }
    report
}

// CSV/TSV import and export

use crate::error::{Result, TableError};
use crate::report::Sheet;
use crate::source::{build_table, header_names, source_name_for, TableSource};
use sifter_core::Table;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    name: String,
}

impl CsvFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            name: source_name_for(path),
        }
    }
}

impl TableSource for CsvFile {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn read_table(&self) -> Result<Table> {
        let content = read_file_as_utf8(&self.path)?;
        parse_csv(&self.name, &content)
    }
}

/// First record is the header; every cell is kept as text.
pub fn parse_csv(source: &str, content: &str) -> Result<Table> {
    let delimiter = sniff_delimiter(content);
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => header_names(record?.iter()),
        None => return Err(TableError::MissingHeader(source.to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect(),
        );
    }

    build_table(source.to_string(), header, rows)
}

const SNIFF_RECORDS: usize = 10;
const DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];

/// Picks the delimiter whose first records agree most often with the width
/// of the header record. Records are parsed, not split on lines, so quoted
/// cells holding line breaks count once.
fn sniff_delimiter(content: &str) -> u8 {
    DELIMITERS
        .iter()
        .filter_map(|&delimiter| {
            let widths = record_widths(content, delimiter);
            let header = *widths.first()?;
            if header <= 1 {
                return None;
            }
            let agreeing = widths.iter().filter(|&&width| width == header).count();
            Some((agreeing * header, delimiter))
        })
        .fold((0, b','), |best, candidate| {
            if candidate.0 > best.0 {
                candidate
            } else {
                best
            }
        })
        .1
}

fn record_widths(content: &str, delimiter: u8) -> Vec<usize> {
    ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
        .records()
        .take(SNIFF_RECORDS)
        .map_while(|record| record.ok())
        .map(|record| record.len())
        .collect()
}

/// Reads the file as UTF-8, falling back to Windows-1252 for spreadsheet
/// exports that are not UTF-8.
pub fn read_file_as_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Writes one CSV file per sheet next to `out`, named `<stem>_<sheet>.csv`.
pub fn write_sheets(out: &Path, sheets: &[Sheet]) -> Result<Vec<PathBuf>> {
    let stem = out
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sifter".to_string());
    let dir = out.parent().unwrap_or_else(|| Path::new(""));

    let mut written = Vec::new();
    for sheet in sheets {
        let path = dir.join(format!("{stem}_{}.csv", sheet.name));
        let mut writer = ::csv::Writer::from_path(&path)?;
        writer.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

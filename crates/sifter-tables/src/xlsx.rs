// Excel import (first worksheet) and result workbook export

use crate::error::{Result, TableError};
use crate::report::Sheet;
use crate::source::{build_table, header_names, source_name_for, TableSource};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_xlsxwriter::{Format, Workbook};
use sifter_core::Table;
use std::path::{Path, PathBuf};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone)]
pub struct WorkbookFile {
    path: PathBuf,
    name: String,
}

impl WorkbookFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            name: source_name_for(path),
        }
    }
}

impl TableSource for WorkbookFile {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn read_table(&self) -> Result<Table> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TableError::MissingHeader(self.name.clone()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header = match rows.next() {
            Some(cells) => header_names(
                cells
                    .iter()
                    .map(|cell| cell_text(cell).unwrap_or_default()),
            ),
            None => return Err(TableError::MissingHeader(self.name.clone())),
        };
        let body = rows
            .map(|cells| cells.iter().map(cell_text).collect())
            .collect();

        build_table(self.name.clone(), header, body)
    }
}

/// Cell text as a user would read it. Whole floats print without a decimal
/// part so phone numbers stored as numbers keep their digits intact.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => {
            if value.trim().is_empty() {
                None
            } else {
                Some(value.clone())
            }
        }
        Data::Float(value) => Some(format_float(*value)),
        Data::Int(value) => Some(value.to_string()),
        Data::Bool(value) => Some(if *value { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(value) => Some(format_excel_serial(value.as_f64())),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Renders a 1900-system serial as `YYYY-mm-dd`, adding the time of day when
/// there is one. Serials below one day are plain times.
fn format_excel_serial(serial: f64) -> String {
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let Some(moment) = excel_epoch().and_then(|epoch| {
        epoch.checked_add_signed(TimeDelta::try_seconds(seconds)?)
    }) else {
        return format_float(serial);
    };

    if serial < 1.0 {
        moment.format("%H:%M:%S").to_string()
    } else if seconds % 86_400 == 0 {
        moment.format("%Y-%m-%d").to_string()
    } else {
        moment.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn excel_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Writes every sheet into one workbook, headers in bold.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet().set_name(&sheet.name)?;
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &bold)?;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row32 = (row_idx + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet.write_string(row32, col as u16, value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

use crate::csv::CsvFile;
use crate::error::{Result, TableError};
use crate::xlsx::WorkbookFile;
use sifter_core::Table;
use std::path::Path;

pub trait TableSource {
    fn source_name(&self) -> &str;
    fn read_table(&self) -> Result<Table>;
}

const CSV_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

pub fn open_source(path: &Path) -> Result<Box<dyn TableSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if CSV_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(Box::new(CsvFile::new(path)));
    }
    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(Box::new(WorkbookFile::new(path)));
    }
    Err(TableError::UnsupportedFormat(path.to_path_buf()))
}

pub(crate) fn source_name_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Blank headers become `Unnamed: N` and repeated headers get a `.N` suffix,
/// so every column can be addressed by a unique name.
pub(crate) fn header_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = Vec::new();
    for (index, value) in raw.into_iter().enumerate() {
        let trimmed = value.as_ref().trim().trim_start_matches('\u{feff}').trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {index}")
        } else {
            trimmed.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(name);
    }
    names
}

/// Header plus rows, with trailing all-blank rows dropped.
pub(crate) fn build_table(
    source: String,
    header: Vec<String>,
    mut rows: Vec<Vec<Option<String>>>,
) -> Result<Table> {
    if header.is_empty() {
        return Err(TableError::MissingHeader(source));
    }
    while rows
        .last()
        .is_some_and(|row| row.iter().all(|cell| cell.is_none()))
    {
        rows.pop();
    }
    Ok(Table::new(source, header, rows)?)
}

#[cfg(test)]
mod tests {
    use super::{build_table, header_names, open_source};
    use crate::error::TableError;
    use std::path::Path;

    #[test]
    fn header_names_fill_blanks_and_disambiguate() {
        let names = header_names(["\u{feff}Tel", "", "Tel", " Tel ", "Correo"]);
        assert_eq!(names, vec!["Tel", "Unnamed: 1", "Tel.1", "Tel.2", "Correo"]);
    }

    #[test]
    fn build_table_drops_trailing_blank_rows() {
        let table = build_table(
            "a.csv".to_string(),
            vec!["Tel".to_string()],
            vec![vec![Some("1".to_string())], vec![None], vec![]],
        )
        .expect("table");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn build_table_requires_header() {
        let err = build_table("a.csv".to_string(), Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, TableError::MissingHeader(_)));
    }

    #[test]
    fn open_source_dispatches_on_extension() {
        assert_eq!(
            open_source(Path::new("dir/Lista.CSV")).unwrap().source_name(),
            "Lista.CSV"
        );
        assert_eq!(
            open_source(Path::new("grupo.xlsx")).unwrap().source_name(),
            "grupo.xlsx"
        );
        assert!(matches!(
            open_source(Path::new("notes.pdf")),
            Err(TableError::UnsupportedFormat(_))
        ));
    }
}

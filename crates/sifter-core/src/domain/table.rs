use crate::error::CoreError;

pub type Cell = Option<String>;

/// One input sheet: a source tag, an ordered header and rows of optional cell
/// text. Rows shorter than the header read the missing cells as blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    source: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(
        source: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, CoreError> {
        let source = source.into();
        if columns.is_empty() {
            return Err(CoreError::NoColumns(source));
        }
        Ok(Self {
            source,
            columns,
            rows,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn source(&self) -> &'a str {
        &self.table.source
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell text for a column. Unknown columns, missing cells and empty cells
    /// all read as `None`.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let position = self.table.position(column)?;
        self.cell(position)
    }

    /// Cell values aligned with the table header.
    pub fn values(&self) -> impl Iterator<Item = Option<&'a str>> + 'a {
        let row = *self;
        (0..self.table.columns.len()).map(move |position| row.cell(position))
    }

    fn cell(&self, position: usize) -> Option<&'a str> {
        self.table.rows[self.index]
            .get(position)
            .and_then(|cell| cell.as_deref())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::error::CoreError;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn table_requires_columns() {
        let err = Table::new("empty.csv", Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, CoreError::NoColumns("empty.csv".to_string()));
    }

    #[test]
    fn row_lookup_is_case_sensitive_and_tolerates_short_rows() {
        let table = Table::new(
            "a.csv",
            header(&["Nombre", "Tel"]),
            vec![vec![Some("Ana".to_string())]],
        )
        .unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Nombre"), Some("Ana"));
        assert_eq!(row.get("nombre"), None);
        assert_eq!(row.get("Tel"), None);
        assert_eq!(row.get("Missing"), None);
        assert_eq!(row.source(), "a.csv");
        let values: Vec<_> = row.values().collect();
        assert_eq!(values, vec![Some("Ana"), None]);
    }

    #[test]
    fn empty_cells_read_as_blank() {
        let table = Table::new(
            "a.csv",
            header(&["Tel"]),
            vec![vec![Some(String::new())], vec![None]],
        )
        .unwrap();
        assert!(table.rows().all(|row| row.get("Tel").is_none()));
        assert_eq!(table.len(), 2);
    }
}

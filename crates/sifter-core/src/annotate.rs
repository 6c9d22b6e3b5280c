//! Full-table view: every input row, aligned to the union of all input
//! columns, plus a cleaned phone and a validated email taken from whole cells.

use crate::domain::email::validate_email;
use crate::domain::phone::clean_phone;
use crate::domain::roles::ColumnRoles;
use crate::domain::table::{Row, Table};
use serde::Serialize;

pub const SOURCE_COLUMN: &str = "_sourceFile";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRow {
    pub source: String,
    pub values: Vec<Option<String>>,
    pub clean_phone: Option<String>,
    pub clean_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotatedTable {
    pub columns: Vec<String>,
    pub rows: Vec<AnnotatedRow>,
}

pub fn annotate(tables: &[Table], roles: &ColumnRoles) -> AnnotatedTable {
    let mut columns: Vec<String> = Vec::new();
    for table in tables {
        for column in table.columns() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let rows = tables
        .iter()
        .flat_map(|table| table.rows())
        .map(|row| AnnotatedRow {
            source: row.source().to_string(),
            values: columns
                .iter()
                .map(|column| row.get(column).map(str::to_string))
                .collect(),
            clean_phone: first_cleaned(&row, roles.phone.columns(), clean_phone),
            clean_email: first_cleaned(&row, roles.email.columns(), validate_email),
        })
        .collect();

    AnnotatedTable { columns, rows }
}

fn first_cleaned(
    row: &Row<'_>,
    columns: &[String],
    clean: fn(&str) -> Option<String>,
) -> Option<String> {
    columns
        .iter()
        .filter_map(|column| row.get(column))
        .find_map(clean)
}

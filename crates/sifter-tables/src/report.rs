//! Result tables as named sheets, ready for any writer.

use sifter_core::{Aggregate, AnnotatedTable, Contact, Role, SummaryStats, SOURCE_COLUMN};
use std::collections::HashSet;

pub const SUMMARY_SHEET: &str = "Resumen";
pub const FULL_SHEET: &str = "Datos_Completos_Procesados";
pub const CONTACTS_SHEET: &str = "Contactos_Validos";
pub const UNIQUE_PHONES_SHEET: &str = "Telefonos_Unicos";
pub const UNIQUE_EMAILS_SHEET: &str = "Emails_Unicos";
pub const ERRORS_SHEET: &str = "Errores_Telefono";

pub const CLEAN_PHONE_COLUMN: &str = "Telefono_Limpio";
pub const CLEAN_EMAIL_COLUMN: &str = "Email_Limpio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub full_sheet: bool,
    pub unique_sheets: bool,
    pub error_sheet: bool,
    pub report_fields: Vec<(String, String)>,
}

pub fn build_sheets(
    result: &Aggregate,
    annotated: Option<&AnnotatedTable>,
    options: &ReportOptions,
) -> Vec<Sheet> {
    let stats = &result.stats;
    let mut sheets = vec![summary_sheet(stats)];

    if options.full_sheet {
        if let Some(annotated) = annotated {
            sheets.push(full_sheet(annotated, stats));
        }
    }

    sheets.push(contacts_sheet(&result.contacts, &options.report_fields));

    if options.unique_sheets {
        if !stats.is_disabled(Role::Phone) {
            sheets.push(unique_sheet(
                UNIQUE_PHONES_SHEET,
                "Telefono",
                result.contacts.iter().filter_map(|c| c.phone.as_deref()),
            ));
        }
        if !stats.is_disabled(Role::Email) {
            sheets.push(unique_sheet(
                UNIQUE_EMAILS_SHEET,
                "Email",
                result.contacts.iter().filter_map(|c| c.email.as_deref()),
            ));
        }
    }

    if options.error_sheet {
        let mut sheet = Sheet::new(
            ERRORS_SHEET,
            &["Nombre", "Numero", "Motivo", "Texto_Original", "Archivo"],
        );
        for record in &result.errors {
            sheet.rows.push(vec![
                record.name.to_string(),
                record.digits.clone(),
                record.reason.reason().to_string(),
                record.raw.clone(),
                record.source.clone(),
            ]);
        }
        sheets.push(sheet);
    }

    sheets
}

/// Metric rows for the enabled roles only.
pub fn summary_rows(stats: &SummaryStats) -> Vec<(&'static str, usize)> {
    let mut rows = vec![("Total de filas analizadas", stats.rows_scanned)];
    if !stats.is_disabled(Role::Phone) {
        rows.push(("Teléfonos válidos encontrados", stats.phones.found));
        rows.push(("Teléfonos únicos", stats.phones.unique));
    }
    if !stats.is_disabled(Role::Email) {
        rows.push(("Emails válidos encontrados", stats.emails.found));
        rows.push(("Emails únicos", stats.emails.unique));
    }
    rows
}

fn summary_sheet(stats: &SummaryStats) -> Sheet {
    let mut sheet = Sheet::new(SUMMARY_SHEET, &["Métrica", "Valor"]);
    for (label, value) in summary_rows(stats) {
        sheet.rows.push(vec![label.to_string(), value.to_string()]);
    }
    sheet
}

fn full_sheet(annotated: &AnnotatedTable, stats: &SummaryStats) -> Sheet {
    let with_phone = !stats.is_disabled(Role::Phone);
    let with_email = !stats.is_disabled(Role::Email);

    let mut headers = annotated.columns.clone();
    headers.push(SOURCE_COLUMN.to_string());
    if with_phone {
        headers.push(CLEAN_PHONE_COLUMN.to_string());
    }
    if with_email {
        headers.push(CLEAN_EMAIL_COLUMN.to_string());
    }

    let rows = annotated
        .rows
        .iter()
        .map(|row| {
            let mut out: Vec<String> = row
                .values
                .iter()
                .map(|value| value.clone().unwrap_or_default())
                .collect();
            out.push(row.source.clone());
            if with_phone {
                out.push(row.clean_phone.clone().unwrap_or_default());
            }
            if with_email {
                out.push(row.clean_email.clone().unwrap_or_default());
            }
            out
        })
        .collect();

    Sheet {
        name: FULL_SHEET.to_string(),
        headers,
        rows,
    }
}

fn contacts_sheet(contacts: &[Contact], report_fields: &[(String, String)]) -> Sheet {
    let mut sheet = Sheet::new(CONTACTS_SHEET, &["Nombre", "Telefono", "Email", "Archivo"]);
    sheet
        .headers
        .extend(report_fields.iter().map(|(name, _)| name.clone()));

    for contact in contacts {
        let mut row = vec![
            contact
                .name
                .as_ref()
                .map(|name| name.to_string())
                .unwrap_or_default(),
            contact.phone.clone().unwrap_or_default(),
            contact.email.clone().unwrap_or_default(),
            contact.source.clone(),
        ];
        row.extend(report_fields.iter().map(|(_, value)| value.clone()));
        sheet.rows.push(row);
    }
    sheet
}

fn unique_sheet<'a>(name: &str, header: &str, values: impl Iterator<Item = &'a str>) -> Sheet {
    let mut sheet = Sheet::new(name, &[header]);
    let mut seen = HashSet::new();
    for value in values {
        if seen.insert(value) {
            sheet.rows.push(vec![value.to_string()]);
        }
    }
    sheet
}

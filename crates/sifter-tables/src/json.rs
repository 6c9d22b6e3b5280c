// JSON export of a processing run

use crate::error::Result;
use serde::Serialize;
use sifter_core::{Aggregate, Contact, ErrorRecord, SummaryStats};
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct JsonContact<'a> {
    #[serde(flatten)]
    contact: &'a Contact,
    fields: &'a BTreeMap<&'a str, &'a str>,
}

#[derive(Debug, Serialize)]
struct JsonRun<'a> {
    contacts: Vec<JsonContact<'a>>,
    errors: &'a [ErrorRecord],
    stats: &'a SummaryStats,
}

/// Contacts, errors and stats as pretty JSON. Every contact object carries
/// the constant report fields under `fields`.
pub fn export_json(result: &Aggregate, report_fields: &[(String, String)]) -> Result<String> {
    let fields: BTreeMap<&str, &str> = report_fields
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    let run = JsonRun {
        contacts: result
            .contacts
            .iter()
            .map(|contact| JsonContact {
                contact,
                fields: &fields,
            })
            .collect(),
        errors: &result.errors,
        stats: &result.stats,
    };
    Ok(serde_json::to_string_pretty(&run)?)
}

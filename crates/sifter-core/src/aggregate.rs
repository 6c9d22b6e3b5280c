use crate::domain::contact::{Contact, ErrorRecord};
use crate::domain::roles::ColumnRoles;
use crate::domain::table::Table;
use crate::dto::SummaryStats;
use crate::rules::classify::{classify_row, Outcome};
use crate::rules::{DedupIdentity, EngineOptions};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub contacts: Vec<Contact>,
    pub errors: Vec<ErrorRecord>,
    pub stats: SummaryStats,
}

/// Classifies every row of every table, in table order then row order, and
/// folds the outcomes into deduplicated contact and error tables.
pub fn aggregate(tables: &[Table], roles: &ColumnRoles, options: EngineOptions) -> Aggregate {
    let outcomes: Vec<Outcome> = tables
        .iter()
        .flat_map(|table| table.rows())
        .map(|row| classify_row(&row, roles, options.mode))
        .collect();
    let rows_scanned = outcomes.len();

    let mut contacts = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::ValidContact(contact) => contacts.push(contact),
            Outcome::InvalidPhoneErrors(records) => errors.extend(records),
            Outcome::Empty => {}
        }
    }

    let contacts = dedup_contacts(contacts, options.identity);
    let errors = dedup_errors(errors);
    let stats = SummaryStats::from_contacts(rows_scanned, &contacts, roles);

    Aggregate {
        contacts,
        errors,
        stats,
    }
}

/// Keeps the first contact seen for each identity.
pub fn dedup_contacts(contacts: Vec<Contact>, identity: DedupIdentity) -> Vec<Contact> {
    let mut seen = HashSet::new();
    contacts
        .into_iter()
        .filter(|contact| seen.insert(contact.key(identity)))
        .collect()
}

/// Keeps the first error record seen for each (name, digits, reason, raw).
pub fn dedup_errors(errors: Vec<ErrorRecord>) -> Vec<ErrorRecord> {
    let mut seen = HashSet::new();
    errors
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect()
}

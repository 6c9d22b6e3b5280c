//! Per-row decision: a row yields a valid contact, a set of rejected phone
//! candidates, or nothing.
//!
//! In `ReportErrors` mode phone columns are visited in order and the first
//! valid phone wins. Once a row has a valid phone, every rejection collected
//! for that row is dropped, so a row never appears in both outputs.

use crate::domain::contact::{Contact, ErrorRecord};
use crate::domain::email::normalize_email;
use crate::domain::phone::check_mobile;
use crate::domain::roles::ColumnRoles;
use crate::domain::table::Row;
use crate::rules::name::resolve_name;
use crate::rules::EngineMode;
use crate::scan::scan_cell;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ValidContact(Contact),
    InvalidPhoneErrors(Vec<ErrorRecord>),
    Empty,
}

pub fn classify_row(row: &Row<'_>, roles: &ColumnRoles, mode: EngineMode) -> Outcome {
    match mode {
        EngineMode::ReportErrors => classify_reporting(row, roles),
        EngineMode::Simple => classify_simple(row, roles),
    }
}

fn classify_reporting(row: &Row<'_>, roles: &ColumnRoles) -> Outcome {
    let name = resolve_name(row, roles.name.columns());
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for column in roles.phone.columns() {
        let Some(text) = row.get(column) else {
            continue;
        };
        let scan = scan_cell(text);

        if let Some(phone) = scan.valid_phones.first() {
            return Outcome::ValidContact(Contact {
                phone: Some(phone.to_string()),
                email: first_email(row, roles.email.columns()),
                name: roles.name.is_enabled().then_some(name),
                source: row.source().to_string(),
            });
        }

        for digits in scan.potential_phones {
            if !seen.insert(digits) {
                continue;
            }
            let Err(reason) = check_mobile(digits) else {
                continue;
            };
            errors.push(ErrorRecord {
                name: name.clone(),
                digits: digits.to_string(),
                reason,
                raw: text.to_string(),
                source: row.source().to_string(),
            });
        }
    }

    if errors.is_empty() {
        Outcome::Empty
    } else {
        Outcome::InvalidPhoneErrors(errors)
    }
}

fn classify_simple(row: &Row<'_>, roles: &ColumnRoles) -> Outcome {
    let phone = roles
        .phone
        .columns()
        .iter()
        .filter_map(|column| row.get(column))
        .find_map(|text| scan_cell(text).valid_phones.first().map(|p| p.to_string()));
    let email = first_email(row, roles.email.columns());

    if phone.is_none() && email.is_none() {
        return Outcome::Empty;
    }

    let name = roles
        .name
        .is_enabled()
        .then(|| resolve_name(row, roles.name.columns()));

    Outcome::ValidContact(Contact {
        phone,
        email,
        name,
        source: row.source().to_string(),
    })
}

fn first_email(row: &Row<'_>, columns: &[String]) -> Option<String> {
    columns
        .iter()
        .filter_map(|column| row.get(column))
        .find_map(|text| scan_cell(text).emails.first().and_then(|e| normalize_email(e)))
}

impl Outcome {
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Outcome::ValidContact(contact) => Some(contact),
            _ => None,
        }
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        match self {
            Outcome::InvalidPhoneErrors(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_row, Outcome};
    use crate::domain::name::ContactName;
    use crate::domain::phone::PhoneRejection;
    use crate::domain::roles::{ColumnRoles, RoleColumns};
    use crate::domain::table::Table;
    use crate::rules::EngineMode;

    fn table(columns: &[&str], cells: &[&str]) -> Table {
        Table::new(
            "test.csv",
            columns.iter().map(|name| name.to_string()).collect(),
            vec![cells.iter().map(|cell| Some(cell.to_string())).collect()],
        )
        .unwrap()
    }

    fn roles(phone: &[&str], email: &[&str], name: &[&str]) -> ColumnRoles {
        ColumnRoles {
            phone: RoleColumns::from_columns(phone.iter().copied()),
            email: RoleColumns::from_columns(email.iter().copied()),
            name: RoleColumns::from_columns(name.iter().copied()),
        }
    }

    fn classify(table: &Table, roles: &ColumnRoles, mode: EngineMode) -> Outcome {
        let row = table.rows().next().unwrap();
        classify_row(&row, roles, mode)
    }

    #[test]
    fn valid_phone_in_free_text() {
        let table = table(&["Tel"], &["Llamar al 3001234567 antes de las 5"]);
        let outcome = classify(&table, &roles(&["Tel"], &[], &[]), EngineMode::ReportErrors);
        let contact = outcome.contact().expect("contact");
        assert_eq!(contact.phone.as_deref(), Some("3001234567"));
        assert_eq!(contact.name, None);
    }

    #[test]
    fn short_digit_run_is_empty() {
        let table = table(&["Tel"], &["123456"]);
        let outcome = classify(&table, &roles(&["Tel"], &[], &[]), EngineMode::ReportErrors);
        assert_eq!(outcome, Outcome::Empty);
    }

    #[test]
    fn landline_is_reported() {
        let table = table(&["Tel", "Nombre"], &["fijo 6012345678", "ana"]);
        let outcome = classify(
            &table,
            &roles(&["Tel"], &[], &["Nombre"]),
            EngineMode::ReportErrors,
        );
        let errors = outcome.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].digits, "6012345678");
        assert_eq!(errors[0].reason, PhoneRejection::NotMobile);
        assert_eq!(errors[0].raw, "fijo 6012345678");
        assert_eq!(errors[0].name, ContactName::Known("Ana".to_string()));
    }

    #[test]
    fn wrong_length_is_reported_once_per_row() {
        let table = table(&["Tel", "Cel"], &["30012345", "30012345"]);
        let outcome = classify(
            &table,
            &roles(&["Tel", "Cel"], &[], &[]),
            EngineMode::ReportErrors,
        );
        let errors = outcome.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, PhoneRejection::WrongLength);
        assert_eq!(errors[0].name, ContactName::Unknown);
    }

    #[test]
    fn valid_phone_in_later_column_suppresses_errors() {
        let table = table(&["Tel", "Cel"], &["601234567890", "3109876543"]);
        let outcome = classify(
            &table,
            &roles(&["Tel", "Cel"], &[], &[]),
            EngineMode::ReportErrors,
        );
        assert_eq!(
            outcome.contact().and_then(|c| c.phone.as_deref()),
            Some("3109876543")
        );
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn first_valid_column_wins() {
        let table = table(&["Tel", "Cel"], &["3001111111", "3002222222"]);
        let outcome = classify(
            &table,
            &roles(&["Tel", "Cel"], &[], &[]),
            EngineMode::ReportErrors,
        );
        assert_eq!(
            outcome.contact().and_then(|c| c.phone.as_deref()),
            Some("3001111111")
        );
    }

    #[test]
    fn reporting_mode_attaches_first_email() {
        let table = table(&["Tel", "Correo"], &["3001234567", "Ana@Example.com; b@c.org"]);
        let outcome = classify(
            &table,
            &roles(&["Tel"], &["Correo"], &[]),
            EngineMode::ReportErrors,
        );
        assert_eq!(
            outcome.contact().and_then(|c| c.email.as_deref()),
            Some("ana@example.com")
        );
    }

    #[test]
    fn reporting_mode_ignores_email_only_rows() {
        let table = table(&["Tel", "Correo"], &["", "ana@example.com"]);
        let outcome = classify(
            &table,
            &roles(&["Tel"], &["Correo"], &[]),
            EngineMode::ReportErrors,
        );
        assert_eq!(outcome, Outcome::Empty);
    }

    #[test]
    fn missing_columns_are_blank() {
        let table = table(&["Tel"], &["3001234567"]);
        let outcome = classify(
            &table,
            &roles(&["Celular", "Tel"], &["Email"], &["Nombre"]),
            EngineMode::ReportErrors,
        );
        let contact = outcome.contact().expect("contact");
        assert_eq!(contact.phone.as_deref(), Some("3001234567"));
        assert_eq!(contact.email, None);
        assert_eq!(contact.name, Some(ContactName::Unknown));
    }

    #[test]
    fn simple_mode_takes_first_phone_and_email() {
        let table = table(
            &["Datos", "Otro"],
            &["6012345678 ana@example.com", "3001234567 x@y.co"],
        );
        let outcome = classify(
            &table,
            &roles(&["Datos", "Otro"], &["Datos", "Otro"], &[]),
            EngineMode::Simple,
        );
        let contact = outcome.contact().expect("contact");
        assert_eq!(contact.phone.as_deref(), Some("3001234567"));
        assert_eq!(contact.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn simple_mode_never_reports_errors() {
        let table = table(&["Tel"], &["6012345678"]);
        let outcome = classify(&table, &roles(&["Tel"], &[], &[]), EngineMode::Simple);
        assert_eq!(outcome, Outcome::Empty);
    }

    #[test]
    fn simple_mode_accepts_email_only_rows() {
        let table = table(&["Correo", "Nombre"], &["ANA@EXAMPLE.COM", "ana maria"]);
        let outcome = classify(
            &table,
            &roles(&[], &["Correo"], &["Nombre"]),
            EngineMode::Simple,
        );
        let contact = outcome.contact().expect("contact");
        assert_eq!(contact.phone, None);
        assert_eq!(contact.email.as_deref(), Some("ana@example.com"));
        assert_eq!(contact.name, Some(ContactName::Known("Ana".to_string())));
    }

    #[test]
    fn disabled_roles_yield_nothing() {
        let table = table(&["Tel"], &["3001234567"]);
        let outcome = classify(&table, &ColumnRoles::default(), EngineMode::Simple);
        assert_eq!(outcome, Outcome::Empty);
        let outcome = classify(&table, &ColumnRoles::default(), EngineMode::ReportErrors);
        assert_eq!(outcome, Outcome::Empty);
    }
}

use crate::domain::phone::check_mobile;
use crate::patterns::{find_emails, find_potential_phones, find_strict_phones};

/// Matches found in one cell, in order of appearance. Repeats within the cell
/// are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellScan<'a> {
    pub emails: Vec<&'a str>,
    pub valid_phones: Vec<&'a str>,
    pub potential_phones: Vec<&'a str>,
}

impl CellScan<'_> {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.valid_phones.is_empty() && self.potential_phones.is_empty()
    }
}

/// `potential_phones` only holds runs that failed the mobile check.
pub fn scan_cell(text: &str) -> CellScan<'_> {
    if text.trim().is_empty() {
        return CellScan::default();
    }

    CellScan {
        emails: find_emails(text),
        valid_phones: find_strict_phones(text),
        potential_phones: find_potential_phones(text)
            .into_iter()
            .filter(|digits| check_mobile(digits).is_err())
            .collect(),
    }
}

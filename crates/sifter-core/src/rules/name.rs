use crate::domain::name::ContactName;
use crate::domain::table::Row;

pub const MIN_NAME_TOKEN_CHARS: usize = 3;

/// First usable name token across the name columns, in column order.
pub fn resolve_name(row: &Row<'_>, columns: &[String]) -> ContactName {
    columns
        .iter()
        .filter_map(|column| row.get(column))
        .find_map(first_name_token)
        .map(ContactName::Known)
        .unwrap_or(ContactName::Unknown)
}

/// Keeps letters and whitespace only, then capitalizes the first token of at
/// least three letters.
pub fn first_name_token(text: &str) -> Option<String> {
    let letters: String = text
        .chars()
        .filter(|ch| ch.is_alphabetic() || ch.is_whitespace())
        .collect();
    letters
        .split_whitespace()
        .find(|token| token.chars().count() >= MIN_NAME_TOKEN_CHARS)
        .map(capitalize)
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

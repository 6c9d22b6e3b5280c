//! Compiled matchers for contact data embedded in free text.
//!
//! Digit runs are always matched whole: a run of digits is never split, so a
//! ten-digit number buried inside a longer numeric string does not match.

use crate::domain::email::has_dotted_domain;
use crate::domain::phone::{check_mobile, MIN_POTENTIAL_DIGITS};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+").expect("email candidate regex"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run regex"));

/// Every `local@domain` token, case as found. Trailing dots are sentence
/// punctuation and are not part of the match.
pub fn find_email_candidates(text: &str) -> Vec<&str> {
    EMAIL_CANDIDATE
        .find_iter(text)
        .map(|found| found.as_str().trim_end_matches('.'))
        .filter(|candidate| {
            candidate
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
        })
        .collect()
}

/// Email candidates whose domain is made of non-empty, dot-separated labels.
pub fn find_emails(text: &str) -> Vec<&str> {
    find_email_candidates(text)
        .into_iter()
        .filter(|candidate| has_dotted_domain(candidate))
        .collect()
}

/// Digit runs that are valid mobile numbers.
pub fn find_strict_phones(text: &str) -> Vec<&str> {
    digit_runs(text)
        .filter(|digits| check_mobile(digits).is_ok())
        .collect()
}

/// Digit runs long enough to look like a phone number, valid or not.
pub fn find_potential_phones(text: &str) -> Vec<&str> {
    digit_runs(text)
        .filter(|digits| digits.len() >= MIN_POTENTIAL_DIGITS)
        .collect()
}

fn digit_runs(text: &str) -> impl Iterator<Item = &str> + '_ {
    DIGIT_RUN.find_iter(text).map(|found| found.as_str())
}

#[cfg(test)]
mod tests {
    use super::{find_email_candidates, find_emails, find_potential_phones, find_strict_phones};

    #[test]
    fn strict_phone_matches_alone_and_in_text() {
        assert_eq!(find_strict_phones("3001234567"), vec!["3001234567"]);
        assert_eq!(
            find_strict_phones("Llamar al 3001234567 antes de las 5"),
            vec!["3001234567"]
        );
    }

    #[test]
    fn strict_phone_never_matches_inside_longer_runs() {
        assert!(find_strict_phones("03001234567").is_empty());
        assert!(find_strict_phones("30012345678").is_empty());
        assert!(find_strict_phones("300123456").is_empty());
    }

    #[test]
    fn strict_phone_allows_letters_and_separators_around() {
        assert_eq!(
            find_strict_phones("cel:3001234567/3109876543x"),
            vec!["3001234567", "3109876543"]
        );
    }

    #[test]
    fn strict_phone_ignores_non_ascii_digits() {
        assert!(find_strict_phones("٣٠٠١٢٣٤٥٦٧").is_empty());
    }

    #[test]
    fn emails_with_empty_domain_labels_are_dropped() {
        assert!(find_emails("ana@.com").is_empty());
        assert!(find_emails("escribir a ana@x..com hoy").is_empty());
        assert_eq!(
            find_emails("ana@.com o luis@correo.co"),
            vec!["luis@correo.co"]
        );
    }

    #[test]
    fn potential_phone_requires_seven_digits() {
        assert!(find_potential_phones("123456").is_empty());
        assert_eq!(find_potential_phones("1234567"), vec!["1234567"]);
        assert_eq!(
            find_potential_phones("6012345678 y 300123"),
            vec!["6012345678"]
        );
    }

    #[test]
    fn email_candidates_keep_case_and_drop_trailing_dot() {
        assert_eq!(
            find_email_candidates("Escribir a Ana@Example.com."),
            vec!["Ana@Example.com"]
        );
    }

    #[test]
    fn emails_require_dotted_domain() {
        assert_eq!(find_email_candidates("ana@nodothere"), vec!["ana@nodothere"]);
        assert!(find_emails("ana@nodothere").is_empty());
        assert_eq!(
            find_emails("a@x.co, b-c@y.org"),
            vec!["a@x.co", "b-c@y.org"]
        );
    }

    #[test]
    fn lone_at_sign_is_not_an_email() {
        assert!(find_email_candidates("@ @@ user@ @host.com").is_empty());
    }
}

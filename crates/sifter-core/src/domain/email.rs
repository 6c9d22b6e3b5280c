use regex::Regex;
use std::sync::LazyLock;

static WHOLE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("email regex")
});

pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// True when the part after the last `@` has at least two dot-separated
/// labels and none of them is empty.
pub fn has_dotted_domain(candidate: &str) -> bool {
    match candidate.rsplit_once('@') {
        Some((_, domain)) => {
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    }
}

/// Whole-cell validation: the trimmed, lower-cased cell must be exactly one
/// address.
pub fn validate_email(value: &str) -> Option<String> {
    let normalized = normalize_email(value)?;
    if WHOLE_EMAIL.is_match(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

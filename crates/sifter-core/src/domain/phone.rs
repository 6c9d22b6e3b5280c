use serde::{Deserialize, Serialize};
use std::fmt;

pub const MOBILE_DIGITS: usize = 10;
pub const MOBILE_PREFIX: char = '3';
pub const MIN_POTENTIAL_DIGITS: usize = 7;

/// Why a phone-like digit run was not accepted as a mobile number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneRejection {
    WrongLength,
    NotMobile,
}

impl PhoneRejection {
    pub const fn code(self) -> &'static str {
        match self {
            PhoneRejection::WrongLength => "wrong-length",
            PhoneRejection::NotMobile => "not-mobile",
        }
    }

    pub const fn reason(self) -> &'static str {
        match self {
            PhoneRejection::WrongLength => "does not have 10 digits",
            PhoneRejection::NotMobile => "does not start with 3 (not a mobile number)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "wrong-length" => Some(PhoneRejection::WrongLength),
            "not-mobile" => Some(PhoneRejection::NotMobile),
            _ => None,
        }
    }

    pub const fn all() -> &'static [PhoneRejection] {
        &[PhoneRejection::WrongLength, PhoneRejection::NotMobile]
    }
}

impl fmt::Display for PhoneRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Checks a run of ASCII digits against the mobile convention: ten digits,
/// leading `3`.
pub fn check_mobile(digits: &str) -> Result<(), PhoneRejection> {
    if digits.len() != MOBILE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PhoneRejection::WrongLength);
    }
    if !digits.starts_with(MOBILE_PREFIX) {
        return Err(PhoneRejection::NotMobile);
    }
    Ok(())
}

/// Whole-cell cleaning: drops every non-digit and keeps the result only when
/// it is a valid mobile number.
pub fn clean_phone(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits: String = trimmed.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    check_mobile(&digits).ok().map(|()| digits)
}

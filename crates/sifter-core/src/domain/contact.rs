use crate::domain::name::ContactName;
use crate::domain::phone::PhoneRejection;
use crate::rules::DedupIdentity;
use serde::Serialize;

/// A validated phone and/or email found in one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub name: Option<ContactName>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContactKey {
    Phone(String),
    Email(String),
    PhoneEmail(Option<String>, Option<String>),
}

impl Contact {
    /// Deduplication key. Under phone identity a contact without a phone is
    /// keyed by its email so email-only contacts do not collapse together.
    pub fn key(&self, identity: DedupIdentity) -> ContactKey {
        match (identity, &self.phone, &self.email) {
            (DedupIdentity::Phone, Some(phone), _) => ContactKey::Phone(phone.clone()),
            (DedupIdentity::Phone, None, Some(email)) => ContactKey::Email(email.clone()),
            _ => ContactKey::PhoneEmail(self.phone.clone(), self.email.clone()),
        }
    }
}

/// A phone-like digit run that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub name: ContactName,
    pub digits: String,
    pub reason: PhoneRejection,
    pub raw: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorKey {
    name: ContactName,
    digits: String,
    reason: PhoneRejection,
    raw: String,
}

impl ErrorRecord {
    pub fn key(&self) -> ErrorKey {
        ErrorKey {
            name: self.name.clone(),
            digits: self.digits.clone(),
            reason: self.reason,
            raw: self.raw.clone(),
        }
    }
}

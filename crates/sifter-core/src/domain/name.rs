use serde::{Serialize, Serializer};
use std::fmt;

pub const UNKNOWN_CONTACT_NAME: &str = "Contacto Desconocido";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ContactName {
    Known(String),
    #[default]
    Unknown,
}

impl ContactName {
    pub fn as_str(&self) -> &str {
        match self {
            ContactName::Known(name) => name,
            ContactName::Unknown => UNKNOWN_CONTACT_NAME,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ContactName::Known(_))
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContactName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactName, UNKNOWN_CONTACT_NAME};

    #[test]
    fn unknown_renders_sentinel() {
        assert_eq!(ContactName::Unknown.to_string(), UNKNOWN_CONTACT_NAME);
        assert!(!ContactName::Unknown.is_known());
    }

    #[test]
    fn serializes_as_plain_string() {
        let value = serde_json::to_value(ContactName::Known("Maria".to_string())).unwrap();
        assert_eq!(value, serde_json::json!("Maria"));
    }
}

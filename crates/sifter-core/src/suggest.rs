//! Keyword-based column role proposals. Advisory only: callers are free to
//! replace any suggestion.

use crate::domain::roles::{ColumnRoles, Role, RoleColumns};
use crate::error::CoreError;

pub const PHONE_KEYWORDS: &[&str] = &[
    "tel", "phone", "telefono", "teléfono", "móvil", "celular", "cel", "grupo",
];
pub const EMAIL_KEYWORDS: &[&str] = &["email", "correo", "mail", "@"];
pub const NAME_KEYWORDS: &[&str] = &["nombre", "name", "tutor", "student"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleKeywords {
    phone: Vec<String>,
    email: Vec<String>,
    name: Vec<String>,
}

impl Default for RoleKeywords {
    fn default() -> Self {
        Self {
            phone: owned(PHONE_KEYWORDS),
            email: owned(EMAIL_KEYWORDS),
            name: owned(NAME_KEYWORDS),
        }
    }
}

impl RoleKeywords {
    /// Replaces the keyword list of one role. Keywords are matched
    /// case-insensitively, so they are stored lower-cased.
    pub fn with_role<I, S>(mut self, role: Role, keywords: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(CoreError::EmptyKeyword(role.to_string()));
            }
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        match role {
            Role::Phone => self.phone = normalized,
            Role::Email => self.email = normalized,
            Role::Name => self.name = normalized,
        }
        Ok(self)
    }

    pub fn for_role(&self, role: Role) -> &[String] {
        match role {
            Role::Phone => &self.phone,
            Role::Email => &self.email,
            Role::Name => &self.name,
        }
    }
}

pub fn suggest_columns<'a>(
    columns: &'a [String],
    role: Role,
    keywords: &RoleKeywords,
) -> Vec<&'a str> {
    let keywords = keywords.for_role(role);
    columns
        .iter()
        .filter(|column| {
            let lower = column.to_lowercase();
            keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
        })
        .map(String::as_str)
        .collect()
}

pub fn suggest_roles(columns: &[String], keywords: &RoleKeywords) -> ColumnRoles {
    let mut roles = ColumnRoles::default();
    for role in Role::all() {
        let suggested = suggest_columns(columns, *role, keywords);
        roles.set(*role, RoleColumns::from_columns(suggested));
    }
    roles
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

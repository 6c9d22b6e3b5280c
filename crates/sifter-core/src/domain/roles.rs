use crate::error::CoreError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Phone,
    Email,
    Name,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Phone => "phone",
            Role::Email => "email",
            Role::Name => "name",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "phone" => Ok(Role::Phone),
            "email" => Ok(Role::Email),
            "name" => Ok(Role::Name),
            _ => Err(CoreError::InvalidRole(value.to_string())),
        }
    }

    pub const fn all() -> &'static [Role] {
        &[Role::Phone, Role::Email, Role::Name]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns designated for one role. An empty selection is the same as
/// switching the role off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoleColumns {
    #[default]
    Disabled,
    Columns(Vec<String>),
}

impl RoleColumns {
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if !out.contains(&column) {
                out.push(column);
            }
        }
        if out.is_empty() {
            RoleColumns::Disabled
        } else {
            RoleColumns::Columns(out)
        }
    }

    pub fn columns(&self) -> &[String] {
        match self {
            RoleColumns::Disabled => &[],
            RoleColumns::Columns(columns) => columns,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, RoleColumns::Columns(_))
    }
}

impl Serialize for RoleColumns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.columns().serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnRoles {
    pub phone: RoleColumns,
    pub email: RoleColumns,
    pub name: RoleColumns,
}

impl ColumnRoles {
    pub fn get(&self, role: Role) -> &RoleColumns {
        match role {
            Role::Phone => &self.phone,
            Role::Email => &self.email,
            Role::Name => &self.name,
        }
    }

    pub fn set(&mut self, role: Role, columns: RoleColumns) {
        match role {
            Role::Phone => self.phone = columns,
            Role::Email => self.email = columns,
            Role::Name => self.name = columns,
        }
    }

    pub fn disabled_roles(&self) -> Vec<Role> {
        Role::all()
            .iter()
            .copied()
            .filter(|role| !self.get(*role).is_enabled())
            .collect()
    }
}

use crate::domain::contact::Contact;
use crate::domain::roles::{ColumnRoles, Role};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    pub found: usize,
    pub unique: usize,
}

impl ValueCounts {
    pub fn count<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = 0;
        let mut distinct = HashSet::new();
        for value in values {
            if value.is_empty() {
                continue;
            }
            found += 1;
            distinct.insert(value);
        }
        Self {
            found,
            unique: distinct.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub rows_scanned: usize,
    pub phones: ValueCounts,
    pub emails: ValueCounts,
    pub disabled_roles: Vec<Role>,
}

impl SummaryStats {
    /// Counts taken from the final, deduplicated contact table.
    pub fn from_contacts(rows_scanned: usize, contacts: &[Contact], roles: &ColumnRoles) -> Self {
        Self {
            rows_scanned,
            phones: ValueCounts::count(contacts.iter().filter_map(|c| c.phone.as_deref())),
            emails: ValueCounts::count(contacts.iter().filter_map(|c| c.email.as_deref())),
            disabled_roles: roles.disabled_roles(),
        }
    }

    pub fn is_disabled(&self, role: Role) -> bool {
        self.disabled_roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::{SummaryStats, ValueCounts};
    use crate::domain::contact::Contact;
    use crate::domain::roles::{ColumnRoles, Role, RoleColumns};

    #[test]
    fn counts_skip_empty_values() {
        let counts = ValueCounts::count(["a", "", "b", "a"]);
        assert_eq!(counts, ValueCounts { found: 3, unique: 2 });
    }

    #[test]
    fn stats_report_disabled_roles() {
        let contacts = vec![Contact {
            phone: Some("3001234567".to_string()),
            email: None,
            name: None,
            source: "a.csv".to_string(),
        }];
        let roles = ColumnRoles {
            phone: RoleColumns::from_columns(["Tel"]),
            ..Default::default()
        };
        let stats = SummaryStats::from_contacts(4, &contacts, &roles);
        assert_eq!(stats.rows_scanned, 4);
        assert_eq!(stats.phones, ValueCounts { found: 1, unique: 1 });
        assert_eq!(stats.emails, ValueCounts::default());
        assert!(stats.is_disabled(Role::Email));
        assert!(!stats.is_disabled(Role::Phone));
    }
}

pub mod classify;
pub mod name;

pub use classify::{classify_row, Outcome};
pub use name::{first_name_token, resolve_name};

use serde::{Deserialize, Serialize};

/// How rows are classified. `ReportErrors` surfaces rejected phone candidates
/// as error records; `Simple` only extracts valid phones and emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineMode {
    #[default]
    ReportErrors,
    Simple,
}

impl EngineMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            EngineMode::ReportErrors => "report-errors",
            EngineMode::Simple => "simple",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "report-errors" => Some(EngineMode::ReportErrors),
            "simple" => Some(EngineMode::Simple),
            _ => None,
        }
    }

    pub const fn default_identity(self) -> DedupIdentity {
        match self {
            EngineMode::ReportErrors => DedupIdentity::Phone,
            EngineMode::Simple => DedupIdentity::PhoneEmail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupIdentity {
    Phone,
    PhoneEmail,
}

impl DedupIdentity {
    pub const fn as_str(self) -> &'static str {
        match self {
            DedupIdentity::Phone => "phone",
            DedupIdentity::PhoneEmail => "phone-email",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "phone" => Some(DedupIdentity::Phone),
            "phone-email" => Some(DedupIdentity::PhoneEmail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    pub mode: EngineMode,
    pub identity: DedupIdentity,
}

impl EngineOptions {
    pub const fn for_mode(mode: EngineMode) -> Self {
        Self {
            mode,
            identity: mode.default_identity(),
        }
    }

    pub const fn with_identity(self, identity: DedupIdentity) -> Self {
        Self {
            mode: self.mode,
            identity,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::for_mode(EngineMode::default())
    }
}

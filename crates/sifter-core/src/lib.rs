pub mod aggregate;
pub mod annotate;
pub mod domain;
pub mod dto;
pub mod error;
pub mod patterns;
pub mod rules;
pub mod scan;
pub mod suggest;

pub use aggregate::{aggregate, dedup_contacts, dedup_errors, Aggregate};
pub use annotate::{annotate, AnnotatedRow, AnnotatedTable, SOURCE_COLUMN};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use rules::*;
pub use scan::{scan_cell, CellScan};
pub use suggest::{suggest_columns, suggest_roles, RoleKeywords};

pub mod csv;
pub mod error;
pub mod json;
pub mod load;
pub mod report;
pub mod source;
pub mod vcf;
pub mod xlsx;

pub use error::{Result, TableError};
pub use load::{load_tables, LoadFailure, LoadReport};
pub use report::{build_sheets, ReportOptions, Sheet};
pub use source::{open_source, TableSource};

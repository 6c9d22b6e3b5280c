use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("table has no columns: {0}")]
    NoColumns(String),
    #[error("empty keyword for role {0}")]
    EmptyKeyword(String),
    #[error("unknown column role: {0}")]
    InvalidRole(String),
}

use sifter_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("file has no header row: {0}")]
    MissingHeader(String),
}

pub type Result<T> = std::result::Result<T, TableError>;

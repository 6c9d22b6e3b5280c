use crate::error::invalid_input;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;

const OUTPUT_PREFIX: &str = "datos_procesados";

/// `datos_procesados_YYYYmmdd_HHMMSS.<ext>` in the working directory.
pub fn default_output_path(now: DateTime<Local>, extension: &str) -> PathBuf {
    PathBuf::from(format!(
        "{OUTPUT_PREFIX}_{}.{extension}",
        now.format("%Y%m%d_%H%M%S")
    ))
}

pub fn parse_field(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(invalid_input(format!(
            "invalid field {raw:?}: expected NAME=VALUE"
        )));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid_input(format!(
            "invalid field {raw:?}: name cannot be empty"
        )));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Command-line fields replace configured fields of the same name.
pub fn merge_fields(
    configured: &[(String, String)],
    overrides: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let mut merged = configured.to_vec();
    for (name, value) in overrides {
        match merged.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => merged.push((name, value)),
        }
    }
    merged
}

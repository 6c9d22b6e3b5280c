use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sifter_core::{DedupIdentity, EngineMode, EngineOptions, Role, RoleKeywords};
use thiserror::Error;

const APP_DIR: &str = "sifter";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineOptions,
    pub keywords: RoleKeywords,
    pub output: OutputConfig,
    pub report_fields: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub full_sheet: bool,
    pub unique_sheets: bool,
    pub error_sheet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Vcf,
    Json,
}

impl OutputFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Vcf => "vcf",
            OutputFormat::Json => "json",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            keywords: RoleKeywords::default(),
            output: OutputConfig {
                format: OutputFormat::Xlsx,
                full_sheet: true,
                unique_sheets: true,
                error_sheet: true,
            },
            report_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid keywords for role {0}: keywords cannot be empty")]
    InvalidKeyword(Role),
    #[error("invalid report field name: {0:?}")]
    InvalidReportField(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    mode: Option<EngineMode>,
    identity: Option<DedupIdentity>,
    keywords: Option<KeywordsFile>,
    output: Option<OutputFile>,
    report_fields: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordsFile {
    phone: Option<Vec<String>>,
    email: Option<Vec<String>>,
    name: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    format: Option<OutputFormat>,
    full_sheet: Option<bool>,
    unique_sheets: Option<bool>,
    error_sheet: Option<bool>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(mode) = parsed.mode {
        config.engine = EngineOptions::for_mode(mode);
    }
    if let Some(identity) = parsed.identity {
        config.engine = config.engine.with_identity(identity);
    }

    if let Some(keywords) = parsed.keywords {
        let overrides = [
            (Role::Phone, keywords.phone),
            (Role::Email, keywords.email),
            (Role::Name, keywords.name),
        ];
        for (role, list) in overrides {
            let Some(list) = list else {
                continue;
            };
            if list.is_empty() {
                return Err(ConfigError::InvalidKeyword(role));
            }
            config.keywords = config
                .keywords
                .with_role(role, &list)
                .map_err(|_| ConfigError::InvalidKeyword(role))?;
        }
    }

    if let Some(output) = parsed.output {
        if let Some(format) = output.format {
            config.output.format = format;
        }
        if let Some(full_sheet) = output.full_sheet {
            config.output.full_sheet = full_sheet;
        }
        if let Some(unique_sheets) = output.unique_sheets {
            config.output.unique_sheets = unique_sheets;
        }
        if let Some(error_sheet) = output.error_sheet {
            config.output.error_sheet = error_sheet;
        }
    }

    if let Some(fields) = parsed.report_fields {
        config.report_fields = validate_report_fields(fields)?;
    }

    Ok(config)
}

/// Constant report columns, as `(name, value)` pairs.
pub fn validate_report_fields<I>(fields: I) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut out: Vec<(String, String)> = Vec::new();
    for (name, value) in fields {
        let name = name.trim().to_string();
        if name.is_empty() || out.iter().any(|(existing, _)| *existing == name) {
            return Err(ConfigError::InvalidReportField(name));
        }
        out.push((name, value));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, validate_report_fields, ConfigFile, KeywordsFile, OutputFile,
        OutputFormat,
    };
    use sifter_core::{DedupIdentity, EngineMode, Role};
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn empty_file() -> ConfigFile {
        ConfigFile {
            mode: None,
            identity: None,
            keywords: None,
            output: None,
            report_fields: None,
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let mut fields = BTreeMap::new();
        fields.insert("campaña".to_string(), "2024".to_string());
        let parsed = ConfigFile {
            mode: Some(EngineMode::Simple),
            identity: Some(DedupIdentity::Phone),
            keywords: Some(KeywordsFile {
                phone: Some(vec!["WhatsApp".to_string()]),
                email: None,
                name: None,
            }),
            output: Some(OutputFile {
                format: Some(OutputFormat::Csv),
                full_sheet: Some(false),
                unique_sheets: None,
                error_sheet: None,
            }),
            report_fields: Some(fields),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.engine.mode, EngineMode::Simple);
        assert_eq!(merged.engine.identity, DedupIdentity::Phone);
        assert_eq!(merged.keywords.for_role(Role::Phone), ["whatsapp".to_string()]);
        assert!(!merged.keywords.for_role(Role::Email).is_empty());
        assert_eq!(merged.output.format, OutputFormat::Csv);
        assert!(!merged.output.full_sheet);
        assert!(merged.output.unique_sheets);
        assert_eq!(
            merged.report_fields,
            vec![("campaña".to_string(), "2024".to_string())]
        );
    }

    #[test]
    fn mode_sets_default_identity() {
        let mut parsed = empty_file();
        parsed.mode = Some(EngineMode::Simple);
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.engine.identity, DedupIdentity::PhoneEmail);
    }

    #[test]
    fn empty_keyword_list_is_rejected() {
        let mut parsed = empty_file();
        parsed.keywords = Some(KeywordsFile {
            phone: None,
            email: Some(Vec::new()),
            name: None,
        });
        let err = merge_config(parsed).unwrap_err();
        assert!(err.to_string().contains("role email"));
    }

    #[test]
    fn report_fields_reject_blank_names() {
        let err = validate_report_fields(vec![(" ".to_string(), "x".to_string())]).unwrap_err();
        assert!(err.to_string().contains("invalid report field"));
        let err = validate_report_fields(vec![
            ("lote".to_string(), "1".to_string()),
            ("lote".to_string(), "2".to_string()),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("lote"));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "mode = \"simple\"\nidentity = \"phone\"\n[keywords]\nname = [\"alumno\"]\n[output]\nformat = \"vcf\"\nerror_sheet = false\n[report_fields]\nlote = \"A\"\n",
        )
        .expect("write config");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.engine.mode, EngineMode::Simple);
        assert_eq!(config.engine.identity, DedupIdentity::Phone);
        assert_eq!(config.keywords.for_role(Role::Name), ["alumno".to_string()]);
        assert_eq!(config.output.format, OutputFormat::Vcf);
        assert!(!config.output.error_sheet);
        assert_eq!(config.report_fields.len(), 1);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "columns = 3\n").expect("write config");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));

        fs::write(&path, "[output]\nsheet_name = \"Datos\"\n").expect("write config");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}

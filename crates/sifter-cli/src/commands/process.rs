use anyhow::{Context as _, Result};
use chrono::Local;
use clap::{Args, ValueEnum};
use serde::Serialize;
use sifter_config::{validate_report_fields, OutputFormat};
use sifter_core::{
    aggregate, annotate, suggest_roles, Aggregate, ColumnRoles, DedupIdentity, EngineMode,
    EngineOptions, Role, RoleColumns, SummaryStats, Table,
};
use sifter_tables::report::summary_rows;
use sifter_tables::{build_sheets, LoadFailure, ReportOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::commands::{load_inputs, print_json, Context};
use crate::error::invalid_input;
use crate::util::{default_output_path, merge_fields, parse_field};

#[derive(Debug, Args)]
pub struct ProcessArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Column holding phone numbers (repeatable)
    #[arg(long = "phone", value_name = "COLUMN", conflicts_with = "no_phone")]
    pub phone: Vec<String>,
    /// Column holding emails (repeatable)
    #[arg(long = "email", value_name = "COLUMN", conflicts_with = "no_email")]
    pub email: Vec<String>,
    /// Column holding names (repeatable)
    #[arg(long = "name", value_name = "COLUMN", conflicts_with = "no_name")]
    pub name: Vec<String>,
    #[arg(long)]
    pub no_phone: bool,
    #[arg(long)]
    pub no_email: bool,
    #[arg(long)]
    pub no_name: bool,
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    #[arg(long, value_enum)]
    pub identity: Option<IdentityArg>,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Constant column added to every contact row, as NAME=VALUE
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    #[value(name = "report-errors")]
    ReportErrors,
    Simple,
}

impl From<ModeArg> for EngineMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::ReportErrors => EngineMode::ReportErrors,
            ModeArg::Simple => EngineMode::Simple,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IdentityArg {
    Phone,
    #[value(name = "phone-email")]
    PhoneEmail,
}

impl From<IdentityArg> for DedupIdentity {
    fn from(identity: IdentityArg) -> Self {
        match identity {
            IdentityArg::Phone => DedupIdentity::Phone,
            IdentityArg::PhoneEmail => DedupIdentity::PhoneEmail,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
    Vcf,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Vcf => OutputFormat::Vcf,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProcessReport<'a> {
    inputs: Vec<&'a str>,
    failures: &'a [LoadFailure],
    roles: &'a ColumnRoles,
    options: EngineOptions,
    contacts: usize,
    errors: usize,
    stats: &'a SummaryStats,
    outputs: Vec<String>,
}

pub fn process(ctx: &Context<'_>, args: ProcessArgs) -> Result<()> {
    let fields = args
        .fields
        .iter()
        .map(|raw| parse_field(raw))
        .collect::<Result<Vec<_>>>()?;
    let report_fields = validate_report_fields(merge_fields(&ctx.config.report_fields, fields))?;

    let loaded = load_inputs(&args.files)?;
    let roles = resolve_roles(ctx, &args, &loaded.tables)?;
    for role in roles.disabled_roles() {
        warn!(role = %role, "role disabled, no column assigned");
    }
    debug!(roles = ?roles, "column roles resolved");

    let mut options = ctx.config.engine;
    if let Some(mode) = args.mode {
        options = EngineOptions::for_mode(mode.into());
    }
    if let Some(identity) = args.identity {
        options = options.with_identity(identity.into());
    }
    debug!(mode = options.mode.as_str(), identity = options.identity.as_str(), "engine options");

    let result = aggregate(&loaded.tables, &roles, options);

    let format: OutputFormat = args
        .format
        .map(Into::into)
        .unwrap_or(ctx.config.output.format);
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(Local::now(), format.extension()));
    let report_options = ReportOptions {
        full_sheet: ctx.config.output.full_sheet,
        unique_sheets: ctx.config.output.unique_sheets,
        error_sheet: ctx.config.output.error_sheet && options.mode == EngineMode::ReportErrors,
        report_fields,
    };
    let outputs = write_outputs(&out, format, &result, &loaded.tables, &roles, &report_options)?;

    if ctx.json {
        return print_json(&ProcessReport {
            inputs: loaded.tables.iter().map(Table::source).collect(),
            failures: &loaded.failures,
            roles: &roles,
            options,
            contacts: result.contacts.len(),
            errors: result.errors.len(),
            stats: &result.stats,
            outputs: outputs.iter().map(|path| path.display().to_string()).collect(),
        });
    }

    for (label, value) in summary_rows(&result.stats) {
        println!("{label}: {value}");
    }
    if options.mode == EngineMode::ReportErrors {
        println!("Phone errors: {}", result.errors.len());
    }
    for path in &outputs {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Explicit columns win, `--no-*` disables a role, anything else falls back
/// to the keyword suggestions over the union of input columns.
fn resolve_roles(ctx: &Context<'_>, args: &ProcessArgs, tables: &[Table]) -> Result<ColumnRoles> {
    let mut known: Vec<String> = Vec::new();
    for table in tables {
        for column in table.columns() {
            if !known.contains(column) {
                known.push(column.clone());
            }
        }
    }

    let mut roles = suggest_roles(&known, &ctx.config.keywords);
    let requested = [
        (Role::Phone, &args.phone, args.no_phone),
        (Role::Email, &args.email, args.no_email),
        (Role::Name, &args.name, args.no_name),
    ];
    for (role, columns, disabled) in requested {
        if disabled {
            roles.set(role, RoleColumns::Disabled);
            continue;
        }
        if columns.is_empty() {
            continue;
        }
        if let Some(missing) = columns.iter().find(|column| !known.contains(column)) {
            return Err(invalid_input(format!(
                "unknown {role} column {missing:?}"
            )));
        }
        roles.set(role, RoleColumns::from_columns(columns));
    }
    Ok(roles)
}

fn write_outputs(
    out: &Path,
    format: OutputFormat,
    result: &Aggregate,
    tables: &[Table],
    roles: &ColumnRoles,
    options: &ReportOptions,
) -> Result<Vec<PathBuf>> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }

    match format {
        OutputFormat::Xlsx => {
            let annotated = options.full_sheet.then(|| annotate(tables, roles));
            let sheets = build_sheets(result, annotated.as_ref(), options);
            sifter_tables::xlsx::write_workbook(out, &sheets)
                .with_context(|| format!("write workbook {}", out.display()))?;
            Ok(vec![out.to_path_buf()])
        }
        OutputFormat::Csv => {
            let annotated = options.full_sheet.then(|| annotate(tables, roles));
            let sheets = build_sheets(result, annotated.as_ref(), options);
            sifter_tables::csv::write_sheets(out, &sheets)
                .with_context(|| format!("write csv files next to {}", out.display()))
        }
        OutputFormat::Vcf => {
            let data = sifter_tables::vcf::export_vcf(&result.contacts, &options.report_fields);
            fs::write(out, data)
                .with_context(|| format!("write vcard file {}", out.display()))?;
            Ok(vec![out.to_path_buf()])
        }
        OutputFormat::Json => {
            let data = sifter_tables::json::export_json(result, &options.report_fields)?;
            fs::write(out, data).with_context(|| format!("write json file {}", out.display()))?;
            Ok(vec![out.to_path_buf()])
        }
    }
}

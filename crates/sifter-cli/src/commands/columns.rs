use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sifter_core::{suggest_roles, ColumnRoles, Role};
use sifter_tables::LoadFailure;
use std::path::PathBuf;

use crate::commands::{load_inputs, print_json, Context};

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FileColumns {
    file: String,
    rows: usize,
    columns: Vec<String>,
    suggested: ColumnRoles,
}

#[derive(Debug, Serialize)]
struct ColumnsReport {
    files: Vec<FileColumns>,
    failures: Vec<LoadFailure>,
}

pub fn list_columns(ctx: &Context<'_>, args: ColumnsArgs) -> Result<()> {
    let loaded = load_inputs(&args.files)?;
    let files: Vec<FileColumns> = loaded
        .tables
        .iter()
        .map(|table| FileColumns {
            file: table.source().to_string(),
            rows: table.len(),
            columns: table.columns().to_vec(),
            suggested: suggest_roles(table.columns(), &ctx.config.keywords),
        })
        .collect();

    if ctx.json {
        return print_json(&ColumnsReport {
            files,
            failures: loaded.failures,
        });
    }

    for file in &files {
        println!("{} ({} rows)", file.file, file.rows);
        for column in &file.columns {
            println!("  {column}");
        }
        for role in Role::all() {
            let suggested = file.suggested.get(*role).columns();
            if suggested.is_empty() {
                println!("  suggested {role}: -");
            } else {
                println!("  suggested {role}: {}", suggested.join(", "));
            }
        }
    }
    for failure in &loaded.failures {
        println!("skipped {}: {}", failure.path, failure.message);
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use layout_cli::config::AppConfig;
use layout_cli::pipeline::{
    self, GenerateRequest, copy_table_fields, load_tables, recalculate_table, select_table,
    validate_table,
};
use layout_encode::encode_raw;
use layout_ingest::write_table_csv;
use layout_model::{DuplicatePolicy, Table};
use layout_validate::ErrorPolicy;

use crate::cli::{CopyArgs, EncodeArgs, GenerateArgs, InputArgs, RecalculateArgs, ValidateArgs};
use crate::summary::{print_generation, print_report, print_tables};

/// Process exit status of a finished command.
pub type ExitCode = i32;

pub fn run_tables(args: &InputArgs) -> Result<ExitCode> {
    let loaded = load_tables(&args.input, None)?;
    print_tables(&loaded.tables);
    if let Some(metadata) = &loaded.metadata {
        println!("Metadata entries: {}", metadata.len());
    }
    Ok(0)
}

pub fn run_validate(args: &ValidateArgs, mut config: AppConfig) -> Result<ExitCode> {
    if args.no_truncation_warnings {
        config.validation = config.validation.with_truncation_warnings(false);
    }
    let loaded = load_tables(&args.input, None)?;
    let table = select_table(
        &loaded.tables,
        args.table.as_deref(),
        &config.generation.layout_table,
    )?;
    let report = validate_table(table, &config);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(if report.is_valid() { 0 } else { 1 })
}

pub fn run_encode(args: &EncodeArgs) -> ExitCode {
    let slot = encode_raw(&args.value, args.size, &args.alignment, &args.field_type);
    println!("{slot}");
    0
}

pub fn run_generate(args: &GenerateArgs, mut config: AppConfig) -> Result<ExitCode> {
    if args.block_on_errors {
        config.validation = config.validation.with_error_policy(ErrorPolicy::Block);
    }
    let request = GenerateRequest {
        input: args.input.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.input)),
        targets: args.targets.clone(),
        metadata: args.metadata.clone(),
    };
    let summary = pipeline::run_generate(&request, &config)?;
    print_generation(&summary);
    Ok(if summary.blocked() || summary.has_failures() {
        1
    } else {
        0
    })
}

pub fn run_recalculate(args: &RecalculateArgs, config: &AppConfig) -> Result<ExitCode> {
    let loaded = load_tables(&args.input, None)?;
    let table = select_table(
        &loaded.tables,
        args.table.as_deref(),
        &config.generation.layout_table,
    )?;
    let (table, renumbered) = recalculate_table(table);
    tracing::info!(table = %table.name, fields = renumbered, "positions recalculated");

    match &args.output {
        Some(path) => {
            write_table_csv(&table, path)
                .with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {} ({renumbered} fields renumbered)", path.display());
        }
        None => print_positions(&table),
    }
    Ok(0)
}

pub fn run_copy(args: &CopyArgs, config: &AppConfig) -> Result<ExitCode> {
    let layout_table = &config.generation.layout_table;
    let loaded = load_tables(&args.input, None)?;
    let target = select_table(&loaded.tables, args.table.as_deref(), layout_table)?;
    let origin_loaded = load_tables(&args.origin, None)?;
    let origin = select_table(
        &origin_loaded.tables,
        args.origin_table.as_deref(),
        layout_table,
    )?;
    let policy = if args.update_existing {
        DuplicatePolicy::Update
    } else {
        DuplicatePolicy::Skip
    };
    let (table, outcome) = copy_table_fields(target, origin, &args.fields, policy)?;

    println!(
        "Copied {}, updated {}, skipped {} existing.",
        outcome.copied.len(),
        outcome.updated.len(),
        outcome.skipped.len()
    );
    match &args.output {
        Some(path) => {
            write_table_csv(&table, path)
                .with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print_positions(&table),
    }
    Ok(0)
}

fn print_positions(table: &Table) {
    for record in table.active_positioned() {
        println!(
            "{:>6} {:>6} {:>6}  {}",
            record.start.unwrap_or(0),
            record.size.unwrap_or(0),
            record.end().unwrap_or(0),
            record.name
        );
    }
}

/// `<dir>/output` for a directory input, `<parent>/output` for a file.
fn default_output_dir(input: &Path) -> PathBuf {
    let base = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    base.join("output")
}

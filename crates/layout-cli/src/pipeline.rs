//! Load, validate and generate, as driven by the subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use layout_ingest::{LoadedInput, load_input, load_metadata};
use layout_model::{CopyOutcome, DuplicatePolicy, FieldRecord, Table, TableSet};
use layout_output::{GenerationContext, Target, generate_all};
use layout_validate::{
    GatingDecision, LayoutValidator, ValidationReport, gate_generation, recalculate_positions,
};

use crate::config::AppConfig;

/// Loads every table under `input`, with metadata from `metadata` when given.
///
/// An explicit metadata file replaces one discovered next to the tables.
pub fn load_tables(input: &Path, metadata: Option<&Path>) -> Result<LoadedInput> {
    let mut loaded =
        load_input(input).with_context(|| format!("load tables from {}", input.display()))?;
    if let Some(path) = metadata {
        let metadata = load_metadata(path)
            .with_context(|| format!("load metadata from {}", path.display()))?;
        loaded.metadata = Some(metadata);
    }
    tracing::info!(
        tables = loaded.tables.len(),
        metadata = loaded.metadata.is_some(),
        "input loaded"
    );
    Ok(loaded)
}

/// The table named `name`, or the configured layout table.
pub fn select_table<'a>(
    tables: &'a TableSet,
    name: Option<&str>,
    layout_table: &str,
) -> Result<&'a Table> {
    let table = match name {
        Some(name) => tables.require(name),
        None => tables.require_layout(layout_table),
    };
    Ok(table?)
}

/// Validates one table under the configured options.
pub fn validate_table(table: &Table, config: &AppConfig) -> ValidationReport {
    LayoutValidator::new(config.validation.clone()).validate(table)
}

/// A copy of `table` with its active fields renumbered from 1.
pub fn recalculate_table(table: &Table) -> (Table, usize) {
    let mut table = table.clone();
    let renumbered = recalculate_positions(&mut table.records);
    (table, renumbered)
}

/// A copy of `target` with fields from `origin` appended or refreshed.
///
/// `names` picks origin fields by name; empty means all of them.
pub fn copy_table_fields(
    target: &Table,
    origin: &Table,
    names: &[String],
    policy: DuplicatePolicy,
) -> Result<(Table, CopyOutcome)> {
    let selected: Vec<&FieldRecord> = if names.is_empty() {
        origin.records.iter().collect()
    } else {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let Some(record) = origin.records.iter().find(|r| r.name == name.trim()) else {
                bail!("field '{name}' not found in {}", origin.name);
            };
            selected.push(record);
        }
        selected
    };
    let mut table = target.clone();
    let outcome = table.copy_fields(selected, policy);
    Ok((table, outcome))
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Targets to produce; empty means all of them.
    pub targets: Vec<Target>,
    pub metadata: Option<PathBuf>,
}

/// What happened to one requested target.
#[derive(Debug, Clone)]
pub struct ArtifactResult {
    pub target: Target,
    pub path: Option<PathBuf>,
    pub bytes: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub report: ValidationReport,
    pub decision: GatingDecision,
    pub artifacts: Vec<ArtifactResult>,
}

impl GenerateSummary {
    pub fn blocked(&self) -> bool {
        self.decision.block_generation
    }

    pub fn has_failures(&self) -> bool {
        self.artifacts.iter().any(|artifact| artifact.error.is_some())
    }
}

/// Validates the layout table, then writes every requested artifact.
///
/// A target that fails, in generation or while being written, is recorded
/// and the others are still written.
/// Under a blocking error policy nothing is written while the layout has
/// errors.
pub fn run_generate(request: &GenerateRequest, config: &AppConfig) -> Result<GenerateSummary> {
    let loaded = load_tables(&request.input, request.metadata.as_deref())?;
    let options = &config.generation;

    let report = match loaded.tables.require_layout(&options.layout_table) {
        Ok(table) => validate_table(table, config),
        Err(err) => {
            tracing::debug!(error = %err, "layout table missing; skipping validation");
            ValidationReport::new(options.layout_table.as_str())
        }
    };
    let decision = gate_generation(&report, config.validation.error_policy);
    if decision.block_generation {
        tracing::warn!(
            errors = decision.error_count,
            "generation blocked by validation errors"
        );
        return Ok(GenerateSummary {
            report,
            decision,
            artifacts: Vec::new(),
        });
    }

    fs::create_dir_all(&request.output_dir)
        .with_context(|| format!("create {}", request.output_dir.display()))?;

    let targets: &[Target] = if request.targets.is_empty() {
        &Target::ALL
    } else {
        &request.targets
    };
    let ctx = GenerationContext::new(&loaded.tables, options)
        .with_metadata(loaded.metadata.as_ref());

    let mut artifacts = Vec::new();
    for output in generate_all(&ctx, targets) {
        let target = output.target;
        let written = output.result.map_err(anyhow::Error::from).and_then(|text| {
            write_artifact(&request.output_dir, target, &text).map(|path| (path, text.len()))
        });
        let artifact = match written {
            Ok((path, bytes)) => ArtifactResult {
                target,
                path: Some(path),
                bytes,
                error: None,
            },
            Err(err) => ArtifactResult {
                target,
                path: None,
                bytes: 0,
                error: Some(format!("{err:#}")),
            },
        };
        artifacts.push(artifact);
    }

    Ok(GenerateSummary {
        report,
        decision,
        artifacts,
    })
}

/// Writes through a temporary file so a target file is never left half written.
///
/// The temporary file is removed again when the write or the rename fails.
fn write_artifact(dir: &Path, target: Target, text: &str) -> Result<PathBuf> {
    let path = dir.join(target.file_name());
    let partial = dir.join(format!(".{}.partial", target.file_name()));
    let written = fs::write(&partial, text)
        .with_context(|| format!("write {}", partial.display()))
        .and_then(|()| {
            fs::rename(&partial, &path).with_context(|| format!("replace {}", path.display()))
        });
    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(&partial)
            && partial.exists()
        {
            tracing::warn!(path = %partial.display(), error = %cleanup, "partial file left behind");
        }
        return Err(err);
    }
    tracing::debug!(%target, path = %path.display(), "artifact written");
    Ok(path)
}

//! Generator trait, shared context and the multi-target runner.

use layout_model::{ExternalMetadata, ModelError, Table, TableSet};

use crate::attribute_map::AttributeMapGenerator;
use crate::enrichment::EnrichmentGenerator;
use crate::error::{GenerateError, GenerateErrorKind, Result};
use crate::fixed_layout::{FixedLayoutGenerator, RecordGenerator};
use crate::options::GenerationOptions;
use crate::persistence::PersistenceGenerator;
use crate::sql::SqlGenerator;
use crate::target::Target;

/// Everything a generator reads. Generators never mutate it.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub tables: &'a TableSet,
    pub metadata: Option<&'a ExternalMetadata>,
    pub options: &'a GenerationOptions,
}

impl<'a> GenerationContext<'a> {
    pub fn new(tables: &'a TableSet, options: &'a GenerationOptions) -> Self {
        Self {
            tables,
            metadata: None,
            options,
        }
    }

    pub fn with_metadata(mut self, metadata: Option<&'a ExternalMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The primary layout table, which must exist and have a name column.
    pub fn layout_table(&self, target: Target) -> Result<&'a Table> {
        let name = &self.options.layout_table;
        let table = self.tables.require_layout(name).map_err(|err| match err {
            ModelError::UnknownTable { name } => {
                GenerateError::new(target, GenerateErrorKind::MissingPrimaryTable { name })
            }
            other => GenerateError::new(target, other.into()),
        })?;
        table
            .ensure_field_columns()
            .map_err(|err| GenerateError::new(target, err.into()))?;
        Ok(table)
    }

    /// An optional side table; absence only leaves a section empty.
    pub fn auxiliary(&self, target: Target, name: &str) -> Option<&'a Table> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let table = self.tables.get(name);
        if table.is_none() {
            tracing::debug!(%target, table = name, "auxiliary table not loaded");
        }
        table
    }

    /// Metadata value through one of its accessors, `None` without metadata.
    pub fn metadata_value(
        &self,
        accessor: impl FnOnce(&'a ExternalMetadata) -> Option<&'a str>,
    ) -> Option<&'a str> {
        self.metadata.and_then(accessor)
    }
}

/// One output artifact.
pub trait TargetGenerator {
    fn target(&self) -> Target;

    /// Renders the full artifact text.
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String>;
}

/// The generator producing `target`.
pub fn generator_for(target: Target) -> Box<dyn TargetGenerator> {
    match target {
        Target::FixedLayout => Box::new(FixedLayoutGenerator),
        Target::Record => Box::new(RecordGenerator),
        Target::Persistence => Box::new(PersistenceGenerator),
        Target::AttributeMap => Box::new(AttributeMapGenerator),
        Target::Enrichment => Box::new(EnrichmentGenerator),
        Target::Sql => Box::new(SqlGenerator),
    }
}

/// Result of one target in a multi-target run.
#[derive(Debug)]
pub struct TargetOutput {
    pub target: Target,
    pub result: Result<String>,
}

impl TargetOutput {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Generates a single target.
pub fn generate(target: Target, ctx: &GenerationContext<'_>) -> Result<String> {
    generator_for(target).generate(ctx)
}

/// Runs every requested target; a failing target never stops the others.
///
/// Duplicate targets are generated once, in first-requested order.
pub fn generate_all(ctx: &GenerationContext<'_>, targets: &[Target]) -> Vec<TargetOutput> {
    let mut outputs: Vec<TargetOutput> = Vec::with_capacity(targets.len());
    for &target in targets {
        if outputs.iter().any(|output| output.target == target) {
            continue;
        }
        let result = generate(target, ctx);
        match &result {
            Ok(text) => tracing::info!(%target, bytes = text.len(), "generated"),
            Err(err) => tracing::warn!(%target, error = %err, "generation failed"),
        }
        outputs.push(TargetOutput { target, result });
    }
    outputs
}

/// Wraps a writer failure with its target.
pub(crate) fn io_error(target: Target) -> impl FnOnce(std::io::Error) -> GenerateError {
    move |err| GenerateError::new(target, GenerateErrorKind::Io(err))
}

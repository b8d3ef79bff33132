//! Column-metadata SQL script.

use layout_model::keys::parse_cell_u32;
use layout_model::{ExternalMetadata, FieldRecord, FieldType, Table, aliases, is_truthy};

use crate::error::Result;
use crate::generate::{GenerationContext, TargetGenerator};
use crate::options::GenerationOptions;
use crate::target::Target;

/// Database column type a field maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    Varchar2,
    Number,
    Date,
}

impl DbType {
    /// Fixed lookup from the field type.
    pub fn of(field_type: &FieldType) -> Self {
        if field_type.is_numeric() {
            Self::Number
        } else if field_type.is_temporal() {
            Self::Date
        } else {
            Self::Varchar2
        }
    }

    /// Reads an explicit database type such as `NUMBER(10)` or `VARCHAR2`.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        if upper.starts_with("NUMBER") || upper.starts_with("INTEGER") {
            Some(Self::Number)
        } else if upper.starts_with("DATE") || upper.starts_with("TIMESTAMP") {
            Some(Self::Date)
        } else if upper.starts_with("VARCHAR") || upper.starts_with("CHAR") {
            Some(Self::Varchar2)
        } else {
            None
        }
    }

    /// The record's explicit database type column, else the mapped type.
    pub fn for_record(record: &FieldRecord) -> Self {
        record
            .column(aliases::ORACLE_TYPE)
            .and_then(Self::parse)
            .unwrap_or_else(|| Self::of(&record.field_type))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Varchar2 => "VARCHAR2",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
        }
    }
}

/// Length, precision and scale of one column; `None` renders as `NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnShape {
    pub db_type: DbType,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl ColumnShape {
    pub fn of(record: &FieldRecord) -> Self {
        let number = |list: &[&str]| record.column(list).and_then(parse_cell_u32);
        let db_type = DbType::for_record(record);
        match db_type {
            DbType::Varchar2 => Self {
                db_type,
                length: number(aliases::DATA_LENGTH).or(record.size),
                precision: None,
                scale: None,
            },
            DbType::Number => Self {
                db_type,
                length: None,
                precision: number(aliases::NUMBER_PRECISION).or(record.size),
                scale: number(aliases::NUMBER_SCALE),
            },
            DbType::Date => Self {
                db_type,
                length: None,
                precision: None,
                scale: None,
            },
        }
    }
}

/// Nullability: the `Nullable` column when present, else the inverse of required.
pub(crate) fn nullable(record: &FieldRecord) -> bool {
    match record.column(aliases::NULLABLE) {
        Some(value) => is_truthy(value),
        None => !record.required,
    }
}

/// Passthrough lines from the SQL table, or generated inserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlGenerator;

impl TargetGenerator for SqlGenerator {
    fn target(&self) -> Target {
        Target::Sql
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let target = self.target();
        let layout = ctx.layout_table(target)?;
        let label = ctx
            .metadata_value(ExternalMetadata::identifier)
            .unwrap_or(layout.name.as_str());

        let mut lines = vec![format!("-- {}", single_line(label))];
        let passthrough = ctx
            .auxiliary(target, &ctx.options.sql_table)
            .map(passthrough_lines)
            .unwrap_or_default();

        if passthrough.is_empty() {
            let global = ctx.metadata_value(ExternalMetadata::table_name);
            let records = layout.flagged(aliases::FLAG_PERSISTENCE);
            tracing::debug!(fields = records.len(), "generating column inserts");
            lines.extend(
                records
                    .into_iter()
                    .map(|record| insert_statement(record, global, ctx.options)),
            );
        } else {
            tracing::debug!(lines = passthrough.len(), "using literal SQL lines");
            lines.extend(passthrough);
        }

        let mut script = lines.join("\n");
        script.push('\n');
        Ok(script)
    }
}

/// Non-blank lines of the SQL table, one per row, copied as stored.
///
/// Cells are already trimmed when a table is loaded; the line content is
/// otherwise passed through without escaping or rewriting. A table whose
/// header is not a recognized SQL column was read with its first line as
/// the header, so that header counts as a line too.
pub fn passthrough_lines(table: &Table) -> Vec<String> {
    let mut lines = Vec::new();
    let sql_header = table.header_matching(aliases::SQL_LINE);
    if sql_header.is_none()
        && let Some(first) = table.headers.iter().find(|h| !h.trim().is_empty())
    {
        lines.push(first.clone());
    }
    for row in &table.rows {
        let line = sql_header
            .and_then(|header| row.get(header.trim()))
            .filter(|value| !value.trim().is_empty())
            .or_else(|| row.iter().map(|(_, v)| v).find(|v| !v.trim().is_empty()));
        if let Some(line) = line {
            lines.push(line.to_string());
        }
    }
    lines
}

/// One `INSERT` describing a persisted column.
pub fn insert_statement(
    record: &FieldRecord,
    global_table: Option<&str>,
    options: &GenerationOptions,
) -> String {
    let table = options
        .table_name_policy
        .resolve(record.column(aliases::TABLE_NAME).unwrap_or(""), global_table);
    let column = record
        .column(aliases::COLUMN_NAME)
        .map_or(record.name.as_str(), str::trim);
    let shape = ColumnShape::of(record);
    let null_flag = if nullable(record) { "Y" } else { "N" };
    format!(
        "INSERT INTO {} (TABLE_NAME, COLUMN_NAME, FIELD_NAME, DATA_TYPE, DATA_LENGTH, \
         DATA_PRECISION, DATA_SCALE, NULLABLE) VALUES ({}, {}, {}, {}, {}, {}, {}, {});",
        options.sql_metadata_table,
        quote(table),
        quote(column),
        quote(&record.name),
        quote(shape.db_type.as_str()),
        number_or_null(shape.length),
        number_or_null(shape.precision),
        number_or_null(shape.scale),
        quote(null_flag),
    )
}

/// SQL string literal with embedded quotes doubled.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn number_or_null(value: Option<u32>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

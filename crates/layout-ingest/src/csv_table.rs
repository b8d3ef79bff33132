use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use layout_model::{Sections, Table, aliases, header_matches};

use crate::error::{IngestError, Result};

/// How many leading rows are searched for the header.
pub const HEADER_SCAN_ROWS: usize = 10;

/// Non-blank rows of a CSV file with their 1-based line numbers.
#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    pub rows: Vec<(usize, Vec<String>)>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads every non-blank row of a headerless, flexible CSV file.
pub fn read_csv_rows(path: &Path) -> Result<CsvRows> {
    if !path.is_file() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push((idx + 1, row));
    }
    Ok(CsvRows { rows })
}

/// Index of the header row: the first of the leading rows that names a
/// field-name column. Falls back to the first row.
pub fn detect_header_row(rows: &[(usize, Vec<String>)]) -> usize {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|(_, row)| row.iter().any(|cell| header_matches(cell, aliases::NAME)))
        .unwrap_or(0)
}

/// Builds a table from already read rows.
///
/// The row right above the header, when it has any label, is read as the
/// section metadata row.
pub fn table_from_rows(name: &str, rows: CsvRows) -> Table {
    let mut rows = rows.rows;
    if rows.is_empty() {
        return Table::new(name, Vec::new());
    }
    let header_index = detect_header_row(&rows);
    let headers: Vec<String> = rows[header_index]
        .1
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    let sections = header_index
        .checked_sub(1)
        .and_then(|above| Sections::from_metadata_row(&rows[above].1, &headers));
    let data = rows.split_off(header_index + 1);

    tracing::debug!(
        table = name,
        header_row = rows[header_index].0,
        rows = data.len(),
        sectioned = sections.is_some(),
        "parsed table"
    );
    Table::from_rows(name, headers, sections, data)
}

/// Reads one CSV file as a table named after its file stem.
pub fn read_layout_table(path: &Path) -> Result<Table> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("layout")
        .to_string();
    read_layout_table_named(path, &name)
}

/// Reads one CSV file as a table with an explicit name.
pub fn read_layout_table_named(path: &Path, name: &str) -> Result<Table> {
    let rows = read_csv_rows(path)?;
    Ok(table_from_rows(name, rows))
}

/// Writes a table back to CSV: headers, then every record's raw columns.
///
/// Typed positions override the raw position columns so a recalculated
/// table round-trips.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<()> {
    let to_err = |source: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(to_err)?;
    writer.write_record(&table.headers).map_err(to_err)?;
    for record in &table.records {
        let row: Vec<String> = table
            .headers
            .iter()
            .map(|header| {
                if header_matches(header, aliases::START) {
                    record.start.map(|v| v.to_string()).unwrap_or_default()
                } else if header_matches(header, aliases::END) {
                    record.end().map(|v| v.to_string()).unwrap_or_default()
                } else {
                    record.raw.get(header.trim()).unwrap_or("").to_string()
                }
            })
            .collect();
        writer.write_record(&row).map_err(to_err)?;
    }
    writer.flush().map_err(|source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    Ok(())
}

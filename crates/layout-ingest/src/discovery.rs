//! Input discovery: a single CSV file or a directory of them.

use std::path::{Path, PathBuf};

use layout_model::{ExternalMetadata, TableSet, normalize_header_key};

use crate::csv_table::read_layout_table;
use crate::error::{IngestError, Result};
use crate::metadata::load_metadata;

/// Everything loaded from one input path.
#[derive(Debug, Clone, Default)]
pub struct LoadedInput {
    pub tables: TableSet,
    /// Identification metadata found alongside the tables, if any.
    pub metadata: Option<ExternalMetadata>,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Checks if a file stem names an identification metadata sheet.
pub fn is_metadata_file(stem: &str) -> bool {
    const INDICATORS: &[&str] = &["metadata", "metadados", "identificacao", "identification"];
    let key = normalize_header_key(stem);
    INDICATORS.iter().any(|indicator| key.contains(indicator))
}

/// Loads a CSV file or every CSV file of a directory.
///
/// Each file becomes a table named after its stem. In a directory, files
/// that look like metadata sheets are read as [`ExternalMetadata`] instead.
pub fn load_input(path: &Path) -> Result<LoadedInput> {
    if path.is_file() {
        let mut tables = TableSet::new();
        tables.insert(read_layout_table(path)?);
        return Ok(LoadedInput {
            tables,
            metadata: None,
        });
    }
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let files = list_csv_files(path)?;
    if files.is_empty() {
        return Err(IngestError::NoTables {
            path: path.to_path_buf(),
        });
    }

    let mut loaded = LoadedInput::default();
    for file in files {
        let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if is_metadata_file(stem) {
            tracing::debug!(path = %file.display(), "reading metadata sheet");
            loaded.metadata = Some(load_metadata(&file)?);
            continue;
        }
        let table = read_layout_table(&file)?;
        tracing::debug!(
            table = %table.name,
            records = table.records.len(),
            rows = table.rows.len(),
            "loaded table"
        );
        loaded.tables.insert(table);
    }
    tracing::info!(
        tables = loaded.tables.len(),
        metadata = loaded.metadata.is_some(),
        "loaded input directory"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_stems() {
        assert!(is_metadata_file("Metadados"));
        assert!(is_metadata_file("layout_metadata"));
        assert!(is_metadata_file("Identificação"));
        assert!(!is_metadata_file("Campos Entrada"));
    }
}

//! Identification metadata files.

use std::path::Path;

use layout_model::ExternalMetadata;

use crate::csv_table::read_csv_rows;
use crate::error::Result;

/// Loads a metadata CSV.
///
/// Two shapes are accepted: `key,value` rows, or a header row followed by
/// one value row when the first row has more than two filled cells.
pub fn load_metadata(path: &Path) -> Result<ExternalMetadata> {
    let rows = read_csv_rows(path)?.rows;
    Ok(metadata_from_rows(rows.into_iter().map(|(_, row)| row).collect()))
}

fn metadata_from_rows(rows: Vec<Vec<String>>) -> ExternalMetadata {
    let mut metadata = ExternalMetadata::new();
    let Some(first) = rows.first() else {
        return metadata;
    };

    let filled = first.iter().filter(|cell| !cell.is_empty()).count();
    if filled > 2 {
        let values = rows.get(1).cloned().unwrap_or_default();
        for (idx, key) in first.iter().enumerate() {
            if key.is_empty() {
                continue;
            }
            metadata.insert(key.as_str(), values.get(idx).map_or("", String::as_str));
        }
    } else {
        for row in &rows {
            let key = row.first().map_or("", String::as_str);
            if key.is_empty() {
                continue;
            }
            metadata.insert(key, row.get(1).map_or("", String::as_str));
        }
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
        values
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn key_value_rows() {
        let metadata = metadata_from_rows(rows(&[
            &["Identificador", "LAYOUT_01"],
            &["IdEvento", "42"],
            &["", "ignored"],
        ]));
        assert_eq!(metadata.identifier(), Some("LAYOUT_01"));
        assert_eq!(metadata.event_id(), Some("42"));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn header_and_value_row() {
        let metadata = metadata_from_rows(rows(&[
            &["Identificador", "IdEvento", "NomeTabela"],
            &["LAYOUT_02", "7"],
        ]));
        assert_eq!(metadata.identifier(), Some("LAYOUT_02"));
        assert_eq!(metadata.event_id(), Some("7"));
        assert_eq!(metadata.table_name(), None);
    }
}

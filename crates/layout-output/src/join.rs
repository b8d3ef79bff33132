//! Cross-table fan-out by a shared identifier.

use std::collections::BTreeMap;

use layout_model::{RawColumns, Table, normalize_key};

/// Auxiliary rows grouped by canonical join key.
#[derive(Debug, Clone, Default)]
pub struct JoinIndex {
    groups: BTreeMap<String, Vec<RawColumns>>,
}

impl JoinIndex {
    /// Groups every row of `tables` by the first header matching `key_aliases`.
    ///
    /// Tables without such a header and rows with a blank key contribute
    /// nothing.
    pub fn build(tables: &[&Table], key_aliases: &[&str]) -> Self {
        let mut groups: BTreeMap<String, Vec<RawColumns>> = BTreeMap::new();
        for table in tables {
            let Some(header) = table.header_matching(key_aliases) else {
                tracing::debug!(table = %table.name, "no join column; table skipped");
                continue;
            };
            let header = header.trim();
            for row in &table.rows {
                let key = normalize_key(row.get(header).unwrap_or(""));
                if key.is_empty() {
                    continue;
                }
                groups.entry(key).or_default().push(row.clone());
            }
        }
        Self { groups }
    }

    /// Rows joined to `key`; empty when nothing matches.
    pub fn group(&self, key: &str) -> &[RawColumns] {
        self.groups
            .get(&normalize_key(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_rows(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            None,
            rows.iter()
                .enumerate()
                .map(|(idx, row)| (idx + 2, row.iter().map(|v| v.to_string()).collect())),
        )
    }

    #[test]
    fn groups_by_canonical_key() {
        let keys = table(
            "Chaves",
            &["IdEnriquecimento", "Chave"],
            &[&["1", "CPF"], &["1.0", "CONTA"], &["02", "CARTAO"], &["", "X"]],
        );
        let index = JoinIndex::build(&[&keys], &["IdEnriquecimento"]);
        assert_eq!(index.key_count(), 2);
        assert_eq!(index.group("1").len(), 2);
        assert_eq!(index.group(" 01 ").len(), 2);
        assert_eq!(index.group("2").len(), 1);
        assert!(index.group("3").is_empty());
    }

    #[test]
    fn tables_without_key_column_are_skipped() {
        let other = table("Outros", &["Nome"], &[&["A"]]);
        let index = JoinIndex::build(&[&other], &["IdEnriquecimento"]);
        assert!(index.is_empty());
        assert!(index.group("A").is_empty());
    }
}

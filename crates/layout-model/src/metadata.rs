//! Identification metadata and default-value definitions.
//!
//! Both come from small side sources: a flat key/value sheet describing the
//! layout as a whole, and a list of named default values used by the
//! attribute map.

use serde::{Deserialize, Serialize};

use crate::aliases;
use crate::keys::normalize_header_key;
use crate::table::Table;

/// Flat, ordered key/value record describing the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMetadata {
    entries: Vec<(String, String)>,
}

impl ExternalMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, replacing an existing key with the same normalized form.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into().trim().to_string();
        let normalized = normalize_header_key(&key);
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(k, _)| normalize_header_key(k) == normalized)
        {
            entry.1 = value;
        } else {
            self.entries.push((key.trim().to_string(), value));
        }
    }

    /// Value for `key`, blank values treated as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        let normalized = normalize_header_key(key);
        self.entries
            .iter()
            .find(|(k, v)| normalize_header_key(k) == normalized && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value among `keys`.
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn identifier(&self) -> Option<&str> {
        self.get_any(aliases::META_IDENTIFIER)
    }

    pub fn event_id(&self) -> Option<&str> {
        self.get_any(aliases::META_EVENT)
    }

    pub fn table_name(&self) -> Option<&str> {
        self.get_any(aliases::META_TABLE_NAME)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExternalMetadata {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut metadata = ExternalMetadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// A named default value offered to the attribute map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultValueDefinition {
    pub name: String,
    pub value: String,
    pub value_type: String,
    pub description: String,
}

impl DefaultValueDefinition {
    /// Reads every row of `table` with a non-blank name.
    pub fn from_table(table: &Table) -> Vec<Self> {
        table
            .rows
            .iter()
            .filter_map(|row| {
                let name = row.find(aliases::DEFAULT_DEF_NAME)?.trim();
                Some(Self {
                    name: name.to_string(),
                    value: row.find_or_empty(aliases::DEFAULT_DEF_VALUE).trim().to_string(),
                    value_type: row.find_or_empty(aliases::DEFAULT_DEF_TYPE).trim().to_string(),
                    description: row
                        .find_or_empty(aliases::DEFAULT_DEF_DESCRIPTION)
                        .trim()
                        .to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_lookup_is_normalized() {
        let metadata: ExternalMetadata = [
            ("Identificador", "LAYOUT_01"),
            ("Nome Tabela", "  "),
            ("ID Evento", "42"),
        ]
        .into_iter()
        .collect();
        assert_eq!(metadata.identifier(), Some("LAYOUT_01"));
        assert_eq!(metadata.event_id(), Some("42"));
        assert_eq!(metadata.table_name(), None);
        assert_eq!(metadata.get("identificador"), Some("LAYOUT_01"));
        assert_eq!(metadata.len(), 3);
    }

    #[test]
    fn later_insert_replaces() {
        let mut metadata = ExternalMetadata::new();
        metadata.insert("Tabela", "A");
        metadata.insert("tabela", "B");
        assert_eq!(metadata.table_name(), Some("B"));
        assert_eq!(metadata.len(), 1);
    }
}

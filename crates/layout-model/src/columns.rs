use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keys::normalize_header_key;

/// One source row as an order-preserving map from original header text to
/// cell value.
///
/// This is the source of truth for outputs that reproduce the original
/// column names and order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumns {
    entries: Vec<(String, String)>,
}

impl RawColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut columns = Self::new();
        for (header, value) in pairs {
            columns.push(header, value);
        }
        columns
    }

    /// Appends a column, replacing the value when the header already exists.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(h, _)| *h == header) {
            entry.1 = value;
        } else {
            self.entries.push((header, value));
        }
    }

    /// Exact header lookup.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value among columns matching `aliases` (normalized).
    ///
    /// Aliases are tried in order, so the first alias wins over later ones.
    pub fn find(&self, aliases: &[&str]) -> Option<&str> {
        for alias in aliases {
            let key = normalize_header_key(alias);
            let hit = self
                .entries
                .iter()
                .find(|(h, v)| normalize_header_key(h) == key && !v.trim().is_empty());
            if let Some((_, value)) = hit {
                return Some(value.as_str());
            }
        }
        None
    }

    /// Like [`find`](Self::find) but returns an empty string when nothing matches.
    pub fn find_or_empty(&self, aliases: &[&str]) -> &str {
        self.find(aliases).unwrap_or("")
    }

    /// Header text of the first column matching `aliases`, blank or not.
    pub fn header_for(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| {
            let key = normalize_header_key(alias);
            self.entries
                .iter()
                .find(|(h, _)| normalize_header_key(h) == key)
                .map(|(h, _)| h.as_str())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.trim().is_empty())
    }
}

/// Truthy cell values for flag columns (compared case-insensitively).
const TRUTHY: &[&str] = &["S", "SIM", "Y", "YES", "TRUE", "1", "X", "V"];

/// Returns true for the spellings spreadsheets use for "yes".
pub fn is_truthy(value: &str) -> bool {
    let trimmed = value.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(trimmed))
}

/// Boolean routing flags of one record, keyed by normalized header.
///
/// The set of flags is open: it is discovered from the source header rather
/// than fixed, and each generator names the keys it reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingFlags {
    flags: BTreeMap<String, bool>,
}

impl RoutingFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: &str, value: bool) {
        self.flags.insert(normalize_header_key(header), value);
    }

    /// Flag value for `header`; absent flags are false.
    pub fn get(&self, header: &str) -> bool {
        self.flags
            .get(&normalize_header_key(header))
            .copied()
            .unwrap_or(false)
    }

    /// True when any of `aliases` is set.
    pub fn any(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| self.get(alias))
    }

    pub fn contains(&self, header: &str) -> bool {
        self.flags.contains_key(&normalize_header_key(header))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_columns_preserve_order_and_replace() {
        let mut raw = RawColumns::from_pairs([("B", "2"), ("A", "1")]);
        raw.push("B", "3");
        let headers: Vec<&str> = raw.iter().map(|(h, _)| h).collect();
        assert_eq!(headers, vec!["B", "A"]);
        assert_eq!(raw.get("B"), Some("3"));
        assert_eq!(raw.get("b"), None);
    }

    #[test]
    fn find_skips_blank_values_and_respects_alias_order() {
        let raw = RawColumns::from_pairs([("Nome", ""), ("Nome Campo", "CPF"), ("Campo", "X")]);
        assert_eq!(raw.find(&["NomeCampo", "Nome", "Campo"]), Some("CPF"));
        assert_eq!(raw.find(&["Nome"]), None);
        assert_eq!(raw.find_or_empty(&["Missing"]), "");
        assert_eq!(raw.header_for(&["Nome"]), Some("Nome"));
    }

    #[test]
    fn truthy_values() {
        for value in ["S", "s", " sim ", "Y", "yes", "TRUE", "1", "x"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["N", "", "0", "false", "nao"] {
            assert!(!is_truthy(value), "{value} should be falsy");
        }
    }

    #[test]
    fn flags_are_normalized() {
        let mut flags = RoutingFlags::new();
        flags.insert("Mapa Atributo", true);
        flags.insert("Persistencia", false);
        assert!(flags.get("MapaAtributo"));
        assert!(flags.get("mapa_atributo"));
        assert!(!flags.get("Persistencia"));
        assert!(!flags.get("Unknown"));
        assert!(flags.any(&["Unknown", "MapaAtributo"]));
        assert!(flags.contains("persistencia"));
    }
}

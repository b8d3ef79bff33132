#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::aliases;
use crate::columns::RawColumns;
use crate::error::{ModelError, Result};
use crate::field::FieldRecord;
use crate::keys::{header_matches, normalize_header_key};
use crate::sections::Sections;

/// A named, ordered table loaded from one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Original column names, left to right.
    pub headers: Vec<String>,
    pub sections: Option<Sections>,
    /// Rows that carry a field name, parsed.
    pub records: Vec<FieldRecord>,
    /// Every non-blank data row, parsed or not.
    pub rows: Vec<RawColumns>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            ..Self::default()
        }
    }

    /// Builds a table from numbered data rows.
    ///
    /// Blank rows are dropped. Rows without a field name are kept in
    /// [`rows`](Self::rows) only.
    pub fn from_rows<I>(
        name: impl Into<String>,
        headers: Vec<String>,
        sections: Option<Sections>,
        rows: I,
    ) -> Self
    where
        I: IntoIterator<Item = (usize, Vec<String>)>,
    {
        let mut table = Self::new(name, headers);
        table.sections = sections;
        for (row_number, values) in rows {
            table.push_row(row_number, &values);
        }
        table
    }

    /// Appends one data row.
    pub fn push_row(&mut self, row_number: usize, values: &[String]) {
        let raw = RawColumns::from_pairs(
            self.headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.trim().is_empty())
                .map(|(idx, header)| {
                    let value = values.get(idx).map(|v| v.trim()).unwrap_or("");
                    (header.trim().to_string(), value.to_string())
                }),
        );
        if raw.is_blank() {
            return;
        }
        if let Some(record) = FieldRecord::from_raw(row_number, raw.clone(), self.sections.as_ref())
        {
            self.records.push(record);
        }
        self.rows.push(raw);
    }

    /// Appends an already built record, keeping `rows` in step.
    pub fn push_record(&mut self, record: FieldRecord) {
        self.rows.push(record.raw.clone());
        self.records.push(record);
    }

    /// Active records with both start and size, sorted by start.
    ///
    /// The sort is stable so ties keep source order.
    pub fn active_positioned(&self) -> Vec<&FieldRecord> {
        let mut positioned: Vec<&FieldRecord> =
            self.records.iter().filter(|r| r.has_position()).collect();
        positioned.sort_by_key(|r| r.start.unwrap_or(0));
        positioned
    }

    /// Records with any of the flag aliases set, in source order.
    pub fn flagged(&self, flag_aliases: &[&str]) -> Vec<&FieldRecord> {
        self.records
            .iter()
            .filter(|r| r.flagged(flag_aliases))
            .collect()
    }

    /// Sum of sizes over the active positioned records.
    pub fn layout_size(&self) -> u64 {
        self.active_positioned()
            .iter()
            .map(|r| u64::from(r.size.unwrap_or(0)))
            .sum()
    }

    /// First header matching one of the aliases.
    pub fn header_matching(&self, header_aliases: &[&str]) -> Option<&str> {
        header_aliases.iter().find_map(|alias| {
            self.headers
                .iter()
                .find(|h| header_matches(h, &[alias]))
                .map(String::as_str)
        })
    }

    /// Fails when the table has no recognizable field-name column.
    pub fn ensure_field_columns(&self) -> Result<()> {
        if self.header_matching(aliases::NAME).is_some() {
            Ok(())
        } else {
            Err(ModelError::MissingNameColumn {
                table: self.name.clone(),
            })
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Ordered collection of tables with name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing one with the same normalized name.
    pub fn insert(&mut self, table: Table) {
        let key = normalize_header_key(&table.name);
        if let Some(existing) = self
            .tables
            .iter_mut()
            .find(|t| normalize_header_key(&t.name) == key)
        {
            *existing = table;
        } else {
            self.tables.push(table);
        }
    }

    /// Lookup by name, ignoring case, accents and separators.
    pub fn get(&self, name: &str) -> Option<&Table> {
        let key = normalize_header_key(name);
        self.tables
            .iter()
            .find(|t| normalize_header_key(&t.name) == key)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Table> {
        let key = normalize_header_key(name);
        self.tables
            .iter_mut()
            .find(|t| normalize_header_key(&t.name) == key)
    }

    /// First table matching any of the names.
    pub fn find(&self, names: &[&str]) -> Option<&Table> {
        names.iter().find_map(|name| self.get(name))
    }

    /// Like [`get`](Self::get) but an absent table is an error.
    pub fn require(&self, name: &str) -> Result<&Table> {
        self.get(name).ok_or_else(|| ModelError::UnknownTable {
            name: name.to_string(),
        })
    }

    /// Resolves the layout table: the named one, or the only table loaded.
    pub fn require_layout(&self, name: &str) -> Result<&Table> {
        match self.get(name) {
            Some(table) => Ok(table),
            None if self.tables.len() == 1 => Ok(&self.tables[0]),
            None => Err(ModelError::UnknownTable {
                name: name.to_string(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<T: IntoIterator<Item = Table>>(iter: T) -> Self {
        let mut set = TableSet::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}

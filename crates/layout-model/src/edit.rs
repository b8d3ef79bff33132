//! Adding fields to a layout table and copying fields between tables.
//!
//! New fields are numbered after the highest existing id and placed at the
//! first position after every positioned field.

use serde::{Deserialize, Serialize};

use crate::aliases;
use crate::columns::{RawColumns, is_truthy};
use crate::field::FieldRecord;
use crate::keys::{header_matches, normalize_header_key};
use crate::table::Table;

/// Column groups carried over when a field is copied between tables whose
/// headers are spelled differently.
const COPIED_COLUMNS: &[&[&str]] = &[
    aliases::NAME,
    aliases::ID,
    aliases::ACTIVE,
    aliases::SIZE,
    aliases::START,
    aliases::END,
    aliases::TYPE,
    aliases::ALIGNMENT,
    aliases::REQUIRED,
    aliases::DEFAULT_VALUE,
    aliases::CURRENT_VALUE,
    aliases::DESCRIPTION,
    aliases::TABLE_NAME,
    aliases::COLUMN_NAME,
];

/// What to do with a copied field whose name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Leave the existing field untouched.
    #[default]
    Skip,
    /// Refresh the existing field's type, size, alignment, description,
    /// requirement, column name and default value from the copy.
    Update,
}

/// Names of the fields a copy touched, in origin order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOutcome {
    pub copied: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

impl Table {
    /// Position right after the furthest positioned field, or 1.
    ///
    /// Saturates at `u32::MAX`; validation reports such a field.
    pub fn next_free_position(&self) -> u32 {
        self.records
            .iter()
            .filter_map(|r| Some(u64::from(r.start?) + u64::from(r.size?)))
            .max()
            .map_or(1, |next| u32::try_from(next).unwrap_or(u32::MAX))
    }

    /// One past the highest field id, or 1.
    pub fn next_field_id(&self) -> u32 {
        self.records
            .iter()
            .filter_map(|r| r.id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }

    /// Appends `record` with the next field id and returns that id.
    pub fn add_field(&mut self, mut record: FieldRecord) -> u32 {
        let id = self.next_field_id();
        record.id = Some(id);
        set_column(&mut record.raw, &self.headers, aliases::ID, id.to_string());
        tracing::debug!(table = %self.name, field = %record.name, id, "field added");
        self.push_record(record);
        id
    }

    /// Copies `fields` from another table into this one.
    ///
    /// A field whose name is new is appended at the next free position with
    /// a fresh id. A field whose name already exists is handled by `policy`.
    pub fn copy_fields<'a, I>(&mut self, fields: I, policy: DuplicatePolicy) -> CopyOutcome
    where
        I: IntoIterator<Item = &'a FieldRecord>,
    {
        let mut outcome = CopyOutcome::default();
        for origin in fields {
            let existing = self.records.iter().position(|r| r.name == origin.name);
            match (existing, policy) {
                (Some(idx), DuplicatePolicy::Update) => {
                    let headers = self.headers.clone();
                    update_from(&mut self.records[idx], origin, &headers);
                    if let Some(row) = self.rows.iter_mut().find(|row| {
                        row.find(aliases::NAME).map(str::trim) == Some(origin.name.as_str())
                    }) {
                        row.clone_from(&self.records[idx].raw);
                    }
                    outcome.updated.push(origin.name.clone());
                }
                (Some(_), DuplicatePolicy::Skip) => outcome.skipped.push(origin.name.clone()),
                (None, _) => {
                    let record = self.placed_copy(origin);
                    self.add_field(record);
                    outcome.copied.push(origin.name.clone());
                }
            }
        }
        tracing::info!(
            table = %self.name,
            copied = outcome.copied.len(),
            updated = outcome.updated.len(),
            skipped = outcome.skipped.len(),
            "fields copied"
        );
        outcome
    }

    /// `origin` re-keyed to this table's headers and moved to the next free
    /// position.
    fn placed_copy(&self, origin: &FieldRecord) -> FieldRecord {
        let raw = RawColumns::from_pairs(
            self.headers
                .iter()
                .filter(|header| !header.trim().is_empty())
                .map(|header| {
                    let header = header.trim();
                    (header.to_string(), origin_value(&origin.raw, header).to_string())
                }),
        );
        let mut record = FieldRecord::from_raw(origin.row, raw, self.sections.as_ref())
            .unwrap_or_else(|| FieldRecord {
                raw: RawColumns::new(),
                ..origin.clone()
            });
        // typed attributes the destination has no column for still travel
        record.name.clone_from(&origin.name);
        record.size = origin.size;
        record.field_type = origin.field_type.clone();
        record.alignment = origin.alignment.clone();
        record.required = origin.required;
        record.default_value.clone_from(&origin.default_value);
        record.current_value.clone_from(&origin.current_value);
        record.description.clone_from(&origin.description);

        let start = self.next_free_position();
        record.start = Some(start);
        set_column(&mut record.raw, &self.headers, aliases::START, start.to_string());
        record.declared_end = record.end();
        let end = record.declared_end.map(|end| end.to_string()).unwrap_or_default();
        set_column(&mut record.raw, &self.headers, aliases::END, end);
        record
    }
}

/// Value of `header` in `raw`: same header, else any header of the same
/// alias group.
fn origin_value<'a>(raw: &'a RawColumns, header: &str) -> &'a str {
    let key = normalize_header_key(header);
    if let Some((_, value)) = raw.iter().find(|(h, _)| normalize_header_key(h) == key) {
        return value;
    }
    COPIED_COLUMNS
        .iter()
        .find(|group| header_matches(header, group))
        .and_then(|group| raw.find(group))
        .unwrap_or("")
}

/// Writes `value` under the table's header for `column`, if it has one.
fn set_column(raw: &mut RawColumns, headers: &[String], column: &[&str], value: String) {
    if let Some(header) = headers.iter().find(|h| header_matches(h, column)) {
        raw.push(header.trim(), value);
    }
}

fn update_from(target: &mut FieldRecord, origin: &FieldRecord, headers: &[String]) {
    target.field_type = origin.field_type.clone();
    target.size = origin.size;
    target.alignment = origin.alignment.clone();
    target.description.clone_from(&origin.description);
    target.required = origin.required;
    target.default_value.clone_from(&origin.default_value);
    if target.current_value.trim().is_empty() {
        target.current_value.clone_from(&origin.default_value);
    }

    let raw = &mut target.raw;
    set_column(raw, headers, aliases::TYPE, origin.field_type.as_str().to_string());
    let size = origin.size.map(|size| size.to_string()).unwrap_or_default();
    set_column(raw, headers, aliases::SIZE, size);
    set_column(raw, headers, aliases::ALIGNMENT, origin.alignment.as_str().to_string());
    set_column(raw, headers, aliases::DESCRIPTION, origin.description.clone());
    let required = origin
        .raw
        .find(aliases::REQUIRED)
        .filter(|value| is_truthy(value) == origin.required)
        .map_or_else(
            || if origin.required { "S" } else { "N" }.to_string(),
            str::to_string,
        );
    set_column(raw, headers, aliases::REQUIRED, required);
    set_column(raw, headers, aliases::DEFAULT_VALUE, origin.default_value.clone());
    if let Some(column) = origin.raw.find(aliases::COLUMN_NAME) {
        set_column(raw, headers, aliases::COLUMN_NAME, column.to_string());
    }
    let current = target.current_value.clone();
    set_column(raw, headers, aliases::CURRENT_VALUE, current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::FieldType;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn main_table() -> Table {
        Table::from_rows(
            "Campos Entrada",
            strings(&["Id", "Nome", "PosIni", "Tamanho", "PosFin", "Tipo", "Valor"]),
            None,
            vec![
                (2, strings(&["1", "CODE", "1", "3", "3", "TEXTO", ""])),
                (3, strings(&["4", "AMOUNT", "4", "5", "8", "INTEIRO", "12"])),
            ],
        )
    }

    fn origin_table() -> Table {
        Table::from_rows(
            "Origem",
            strings(&["Campo", "Size", "FieldType", "Description", "ValorPadrao"]),
            None,
            vec![
                (2, strings(&["AMOUNT", "7", "DECIMAL", "amount", "0"])),
                (3, strings(&["CITY", "10", "TEXTO", "city", "SP"])),
            ],
        )
    }

    #[test]
    fn next_position_and_id() {
        let table = main_table();
        assert_eq!(table.next_free_position(), 9);
        assert_eq!(table.next_field_id(), 5);
        let empty = Table::new("T", vec![]);
        assert_eq!(empty.next_free_position(), 1);
        assert_eq!(empty.next_field_id(), 1);
    }

    #[test]
    fn next_position_saturates() {
        let mut table = Table::new("T", vec![]);
        table.push_record(FieldRecord::new("A").with_position(u32::MAX, 5));
        assert_eq!(table.next_free_position(), u32::MAX);
    }

    #[test]
    fn add_field_numbers_sequentially() {
        let mut table = main_table();
        let id = table.add_field(FieldRecord::new("NEW").with_position(9, 1));
        assert_eq!(id, 5);
        assert_eq!(table.add_field(FieldRecord::new("NEWER")), 6);
        let added = table.records.iter().find(|r| r.name == "NEW").expect("added");
        assert_eq!(added.raw.get("Id"), Some("5"));
        assert_eq!(table.rows.len(), table.records.len());
    }

    #[test]
    fn copies_new_fields_after_the_last_one() {
        let mut table = main_table();
        let origin = origin_table();
        let outcome = table.copy_fields(&origin.records, DuplicatePolicy::Skip);

        assert_eq!(outcome.copied, strings(&["CITY"]));
        assert_eq!(outcome.skipped, strings(&["AMOUNT"]));
        let city = table.records.iter().find(|r| r.name == "CITY").expect("city");
        assert_eq!(city.start, Some(9));
        assert_eq!(city.size, Some(10));
        assert_eq!(city.declared_end, Some(18));
        assert_eq!(city.id, Some(5));
        assert_eq!(city.raw.get("Nome"), Some("CITY"));
        assert_eq!(city.raw.get("Tamanho"), Some("10"));
        assert_eq!(city.raw.get("PosIni"), Some("9"));
        assert_eq!(city.raw.get("PosFin"), Some("18"));
        assert_eq!(city.raw.get("Id"), Some("5"));
        assert_eq!(city.value(), "SP");
    }

    #[test]
    fn successive_copies_are_contiguous() {
        let mut table = Table::new("T", strings(&["Nome", "PosIni", "Tamanho"]));
        let origin = origin_table();
        table.copy_fields(&origin.records, DuplicatePolicy::Skip);
        let starts: Vec<Option<u32>> = table.records.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![Some(1), Some(8)]);
        let ids: Vec<Option<u32>> = table.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn update_refreshes_existing_attributes() {
        let mut table = main_table();
        let origin = origin_table();
        let outcome = table.copy_fields(&origin.records[..1], DuplicatePolicy::Update);

        assert_eq!(outcome.updated, strings(&["AMOUNT"]));
        let amount = &table.records[1];
        assert_eq!(amount.size, Some(7));
        assert_eq!(amount.field_type, FieldType::Decimal);
        assert_eq!(amount.description, "amount");
        assert_eq!(amount.start, Some(4));
        assert_eq!(amount.current_value, "12");
        assert_eq!(amount.raw.get("Tamanho"), Some("7"));
        assert_eq!(table.rows[1].get("Tamanho"), Some("7"));
    }

    #[test]
    fn update_fills_missing_value_from_default() {
        let mut table = main_table();
        let mut origin = origin_table();
        origin.records[0].name = "CODE".to_string();
        table.copy_fields(&origin.records[..1], DuplicatePolicy::Update);
        assert_eq!(table.records[0].current_value, "0");
        assert_eq!(table.records[0].raw.get("Valor"), Some("0"));
    }
}

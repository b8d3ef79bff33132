//! A single field row of a layout table.

use serde::{Deserialize, Serialize};

use crate::aliases;
use crate::columns::{RawColumns, RoutingFlags, is_truthy};
use crate::enums::{Alignment, FieldType};
use crate::keys::{header_matches, parse_cell_u32};
use crate::sections::Sections;

/// Highest end position a field may reach in a rendered record.
pub const MAX_RECORD_WIDTH: u32 = 1 << 20;

/// One parsed field of a layout table.
///
/// The typed attributes are read from the row through header aliases; the
/// full row is kept in [`raw`](Self::raw) for outputs that reproduce the
/// original columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// 1-based source row number.
    pub row: usize,
    pub name: String,
    pub id: Option<u32>,
    /// Participates in the positional layout.
    pub active: bool,
    pub size: Option<u32>,
    /// 1-based start position.
    pub start: Option<u32>,
    /// End position as written in the source, if any.
    pub declared_end: Option<u32>,
    pub field_type: FieldType,
    pub alignment: Alignment,
    pub required: bool,
    pub default_value: String,
    pub current_value: String,
    pub description: String,
    pub flags: RoutingFlags,
    pub raw: RawColumns,
}

impl FieldRecord {
    /// Creates an active text field with no position.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, start: u32, size: u32) -> Self {
        self.start = Some(start);
        self.size = Some(size);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.current_value = value.into();
        self
    }

    /// Parses one data row against its header row.
    ///
    /// Returns `None` when the row has no field name.
    pub fn from_row(
        row: usize,
        headers: &[String],
        values: &[String],
        sections: Option<&Sections>,
    ) -> Option<Self> {
        let raw = RawColumns::from_pairs(
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.trim().is_empty())
                .map(|(idx, header)| {
                    let value = values.get(idx).map(|v| v.trim()).unwrap_or("");
                    (header.trim().to_string(), value.to_string())
                }),
        );
        Self::from_raw(row, raw, sections)
    }

    /// Builds a record from an already collected column map.
    pub fn from_raw(row: usize, raw: RawColumns, sections: Option<&Sections>) -> Option<Self> {
        let name = raw.find(aliases::NAME)?.trim().to_string();
        if name.is_empty() {
            return None;
        }

        let mut flags = RoutingFlags::new();
        for (header, value) in raw.iter() {
            let is_flag = header_matches(header, aliases::KNOWN_ROUTING_FLAGS)
                || sections.is_some_and(|s| s.is_routing(header));
            if is_flag {
                flags.insert(header, is_truthy(value));
            }
        }

        // A blank activity cell keeps the field in the layout.
        let active = raw.find(aliases::ACTIVE).is_none_or(is_truthy);

        let text = |list: &[&str]| raw.find(list).map(str::trim).unwrap_or("").to_string();
        let number = |list: &[&str]| raw.find(list).and_then(parse_cell_u32);

        Some(Self {
            row,
            id: number(aliases::ID),
            active,
            size: number(aliases::SIZE),
            start: number(aliases::START),
            declared_end: number(aliases::END),
            field_type: FieldType::parse(&text(aliases::TYPE)),
            alignment: Alignment::parse(&text(aliases::ALIGNMENT)),
            required: raw.find(aliases::REQUIRED).is_some_and(is_truthy),
            default_value: text(aliases::DEFAULT_VALUE),
            current_value: text(aliases::CURRENT_VALUE),
            description: text(aliases::DESCRIPTION),
            flags,
            name,
            raw,
        })
    }

    /// `start + size - 1` when both are known, otherwise the declared end.
    ///
    /// `None` when the computed end does not fit a `u32`.
    pub fn end(&self) -> Option<u32> {
        match (self.start, self.size) {
            (Some(start), Some(size)) => {
                let end = (u64::from(start) + u64::from(size)).saturating_sub(1);
                u32::try_from(end).ok()
            }
            _ => self.declared_end,
        }
    }

    /// Positioned and ending within [`MAX_RECORD_WIDTH`].
    pub fn fits_record_width(&self) -> bool {
        self.size.is_some()
            && self.start.is_some()
            && self.end().is_some_and(|end| end <= MAX_RECORD_WIDTH)
    }

    /// Value used for encoding: current value, else the default.
    pub fn value(&self) -> &str {
        if self.current_value.trim().is_empty() {
            &self.default_value
        } else {
            &self.current_value
        }
    }

    /// Active with both start and size present.
    pub fn has_position(&self) -> bool {
        self.active && self.start.is_some() && self.size.is_some()
    }

    /// Routing flag lookup; absent flags are false.
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key)
    }

    /// True when any of the flag aliases is set.
    pub fn flagged(&self, keys: &[&str]) -> bool {
        self.flags.any(keys)
    }

    /// Raw column value by alias, first non-empty hit.
    pub fn column(&self, aliases: &[&str]) -> Option<&str> {
        self.raw.find(aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::Sections;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_portuguese_row() {
        let headers = strings(&[
            "Entrada",
            "Nome Campo",
            "Posição Inicial",
            "Tamanho",
            "Posição Final",
            "Tipo",
            "Alinhamento",
            "Obrigatório",
            "Valor Padrão",
            "Persistencia",
        ]);
        let values = strings(&[
            "S",
            "CPF",
            "1",
            "11.0",
            "11",
            "INTEIRO",
            "ZERO_ESQUERDA",
            "sim",
            "0",
            "N",
        ]);
        let record = FieldRecord::from_row(3, &headers, &values, None).expect("record");
        assert_eq!(record.row, 3);
        assert_eq!(record.name, "CPF");
        assert!(record.active);
        assert_eq!(record.start, Some(1));
        assert_eq!(record.size, Some(11));
        assert_eq!(record.declared_end, Some(11));
        assert_eq!(record.end(), Some(11));
        assert_eq!(record.field_type, FieldType::Integer);
        assert_eq!(record.alignment, Alignment::ZeroLeft);
        assert!(record.required);
        assert_eq!(record.value(), "0");
        assert!(record.flag("Entrada"));
        assert!(!record.flag("Persistencia"));
        assert_eq!(record.raw.get("Posição Inicial"), Some("1"));
    }

    #[test]
    fn blank_name_is_skipped() {
        let headers = strings(&["Nome", "Tamanho"]);
        assert!(FieldRecord::from_row(2, &headers, &strings(&["", "3"]), None).is_none());
    }

    #[test]
    fn missing_or_blank_active_means_active() {
        let headers = strings(&["Nome", "Entrada"]);
        let blank = FieldRecord::from_row(1, &headers, &strings(&["A", ""]), None).expect("a");
        assert!(blank.active);
        let off = FieldRecord::from_row(1, &headers, &strings(&["A", "N"]), None).expect("a");
        assert!(!off.active);
        let missing = FieldRecord::from_row(1, &strings(&["Nome"]), &strings(&["A"]), None)
            .expect("a");
        assert!(missing.active);
    }

    #[test]
    fn section_routing_columns_become_flags() {
        let headers = strings(&["Nome", "Feeds Audit"]);
        let labels = strings(&["Comum", "Flags"]);
        let sections = Sections::from_metadata_row(&labels, &headers);
        let record = FieldRecord::from_row(1, &headers, &strings(&["A", "X"]), sections.as_ref())
            .expect("record");
        assert!(record.flag("FeedsAudit"));
    }

    #[test]
    fn short_rows_and_bad_numbers() {
        let headers = strings(&["Nome", "Tamanho", "Inicio", "Valor"]);
        let record =
            FieldRecord::from_row(1, &headers, &strings(&["A", "abc"]), None).expect("record");
        assert_eq!(record.size, None);
        assert_eq!(record.value(), "");
        assert!(!record.has_position());
    }

    #[test]
    fn end_prefers_computed_value() {
        let mut record = FieldRecord::new("A").with_position(4, 2);
        record.declared_end = Some(9);
        assert_eq!(record.end(), Some(5));
        record.size = None;
        assert_eq!(record.end(), Some(9));
    }

    #[test]
    fn end_beyond_u32_is_none() {
        let record = FieldRecord::new("A").with_position(u32::MAX, 1);
        assert_eq!(record.end(), Some(u32::MAX));
        assert!(!record.fits_record_width());
        let record = FieldRecord::new("A").with_position(u32::MAX, 2);
        assert_eq!(record.end(), None);
        let record = FieldRecord::new("A").with_position(2, u32::MAX);
        assert_eq!(record.end(), None);
        assert!(FieldRecord::new("B").with_position(1, 3).fits_record_width());
    }
}

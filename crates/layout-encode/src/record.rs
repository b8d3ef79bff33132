//! Whole-record rendering.

use layout_model::{FieldRecord, MAX_RECORD_WIDTH, Table};

use crate::encoder::PositionalEncoder;

/// Renders the table's fixed-width record line (without terminator).
#[must_use]
pub fn render_record(table: &Table) -> String {
    render_fields(&table.active_positioned(), &PositionalEncoder::default())
}

/// Renders records already sorted by start.
///
/// The line is as long as the furthest end position. Gaps stay blank and
/// a later field overwrites an earlier one where they overlap. Fields ending
/// past [`MAX_RECORD_WIDTH`] are left out.
#[must_use]
pub fn render_fields(records: &[&FieldRecord], encoder: &PositionalEncoder) -> String {
    let records: Vec<&FieldRecord> = records
        .iter()
        .copied()
        .filter(|record| {
            let fits = record.fits_record_width();
            if !fits && record.has_position() {
                tracing::warn!(
                    field = %record.name,
                    start = ?record.start,
                    size = ?record.size,
                    "field ends beyond the record width; left out of the record"
                );
            }
            fits
        })
        .collect();
    let width = records
        .iter()
        .filter_map(|r| r.end())
        .max()
        .unwrap_or(0) as usize;
    let mut line = vec![' '; width];

    for record in records {
        let (Some(start), Some(size)) = (record.start, record.size) else {
            continue;
        };
        if start == 0 {
            tracing::debug!(field = %record.name, "skipping field with start 0");
            continue;
        }
        let slot = encoder.encode(
            record.value(),
            size as usize,
            &record.alignment,
            &record.field_type,
        );
        let offset = start as usize - 1;
        for (idx, ch) in slot.chars().enumerate() {
            if let Some(cell) = line.get_mut(offset + idx) {
                *cell = ch;
            }
        }
    }

    line.into_iter().collect()
}

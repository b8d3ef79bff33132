//! Fixed-layout XML and the flat record line.

use std::io;

use layout_encode::{PositionalEncoder, render_record};
use layout_model::Table;

use crate::common::{
    XmlWriter, empty_element, end_element, finish_document, new_document, start_element,
    start_element_with, write_optional_element, write_text_element,
};
use crate::error::Result;
use crate::generate::{GenerationContext, TargetGenerator, io_error};
use crate::sections::{
    PositionPart, derive_element_names, position_part, resolve_columns, sanitize_tag,
};
use crate::target::Target;

/// Every active positioned field as an item with its encoded slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLayoutGenerator;

impl TargetGenerator for FixedLayoutGenerator {
    fn target(&self) -> Target {
        Target::FixedLayout
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let table = ctx.layout_table(self.target())?;
        render_fixed_layout(table, &PositionalEncoder::default()).map_err(io_error(self.target()))
    }
}

/// The layout table's record line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordGenerator;

impl TargetGenerator for RecordGenerator {
    fn target(&self) -> Target {
        Target::Record
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let table = ctx.layout_table(self.target())?;
        let mut line = render_record(table);
        line.push('\n');
        Ok(line)
    }
}

/// Renders `table` as fixed-layout XML, items sorted by start.
pub fn render_fixed_layout(table: &Table, encoder: &PositionalEncoder) -> io::Result<String> {
    let names = derive_element_names(&table.name);
    let columns = resolve_columns(table);
    let records = table.active_positioned();

    let position_tag = |part: PositionPart, fallback: &str| {
        columns
            .position
            .iter()
            .find(|header| position_part(header) == Some(part))
            .map_or_else(|| fallback.to_string(), |header| sanitize_tag(header))
    };
    let start_tag = position_tag(PositionPart::Start, "Start");
    let end_tag = position_tag(PositionPart::End, "End");
    let element_tags: Vec<(&str, String)> = columns
        .element_columns()
        .iter()
        .map(|header| (header.as_str(), sanitize_tag(header)))
        .collect();

    let total_size = table.layout_size().to_string();
    let field_count = records.len().to_string();

    let mut xml = new_document()?;
    start_element_with(
        &mut xml,
        &names.root,
        &[
            ("totalSize", total_size.as_str()),
            ("fieldCount", field_count.as_str()),
        ],
    )?;
    for record in records {
        let (Some(start), Some(size)) = (record.start, record.size) else {
            continue;
        };
        start_element(&mut xml, &names.item)?;
        for (header, tag) in &element_tags {
            write_optional_element(&mut xml, tag, record.raw.get(header).unwrap_or(""))?;
        }
        // out-of-range slots are reported by validation and left empty here
        let slot = if record.fits_record_width() {
            encoder.encode(
                record.value(),
                size as usize,
                &record.alignment,
                &record.field_type,
            )
        } else {
            String::new()
        };
        write_slot(&mut xml, &slot)?;

        start_element(&mut xml, "Position")?;
        write_text_element(&mut xml, &start_tag, &start.to_string())?;
        let end = record.end().map(|end| end.to_string()).unwrap_or_default();
        write_text_element(&mut xml, &end_tag, &end)?;
        end_element(&mut xml, "Position")?;

        end_element(&mut xml, &names.item)?;
    }
    end_element(&mut xml, &names.root)?;

    tracing::debug!(table = %table.name, fields = %field_count, "fixed layout rendered");
    Ok(finish_document(xml))
}

/// `<Value>` keeps the slot's padding as is.
fn write_slot(xml: &mut XmlWriter, slot: &str) -> io::Result<()> {
    if slot.is_empty() {
        empty_element(xml, "Value")
    } else {
        write_text_element(xml, "Value", slot)
    }
}

//! Persistence XML: one item per persisted field.

use std::io;

use layout_model::{ExternalMetadata, FieldRecord, Table, aliases};

use crate::common::{
    XmlWriter, end_element, finish_document, new_document, start_element,
    write_optional_element, write_required_element,
};
use crate::error::Result;
use crate::generate::{GenerationContext, TargetGenerator, io_error};
use crate::options::TableNamePolicy;
use crate::sql::{DbType, nullable};
use crate::target::Target;

#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceGenerator;

impl TargetGenerator for PersistenceGenerator {
    fn target(&self) -> Target {
        Target::Persistence
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let table = ctx.layout_table(self.target())?;
        if ctx.metadata.is_none() {
            tracing::debug!("no identification metadata; header left blank");
        }
        render_persistence(table, ctx.metadata, ctx.options.table_name_policy)
            .map_err(io_error(self.target()))
    }
}

/// Renders the persistence document for the fields flagged for persistence.
pub fn render_persistence(
    table: &Table,
    metadata: Option<&ExternalMetadata>,
    policy: TableNamePolicy,
) -> io::Result<String> {
    let global_table = metadata.and_then(ExternalMetadata::table_name);
    let records = table.flagged(aliases::FLAG_PERSISTENCE);

    let mut xml = new_document()?;
    start_element(&mut xml, "Persistence")?;

    start_element(&mut xml, "Header")?;
    write_required_element(
        &mut xml,
        "Identifier",
        metadata.and_then(ExternalMetadata::identifier).unwrap_or(""),
    )?;
    write_required_element(&mut xml, "LayoutSize", &table.layout_size().to_string())?;
    write_required_element(
        &mut xml,
        "EventId",
        metadata.and_then(ExternalMetadata::event_id).unwrap_or(""),
    )?;
    end_element(&mut xml, "Header")?;

    start_element(&mut xml, "Fields")?;
    for record in &records {
        write_field(&mut xml, record, global_table, policy)?;
    }
    end_element(&mut xml, "Fields")?;

    end_element(&mut xml, "Persistence")?;
    tracing::debug!(fields = records.len(), "persistence rendered");
    Ok(finish_document(xml))
}

fn write_field(
    xml: &mut XmlWriter,
    record: &FieldRecord,
    global_table: Option<&str>,
    policy: TableNamePolicy,
) -> io::Result<()> {
    let column = |list: &[&str]| record.column(list).unwrap_or("");
    let number = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();

    start_element(xml, "Field")?;
    write_required_element(
        xml,
        "Table",
        policy.resolve(column(aliases::TABLE_NAME), global_table),
    )?;
    write_required_element(
        xml,
        "Column",
        record.column(aliases::COLUMN_NAME).unwrap_or(&record.name),
    )?;
    write_optional_element(xml, "Name", &record.name)?;
    write_optional_element(xml, "Id", &number(record.id))?;
    write_optional_element(xml, "Type", record.field_type.as_str())?;
    write_optional_element(xml, "Size", &number(record.size))?;
    write_optional_element(xml, "Start", &number(record.start))?;
    write_optional_element(xml, "Value", record.value())?;
    write_optional_element(xml, "Alignment", record.alignment.as_str())?;
    write_optional_element(xml, "Required", if record.required { "Y" } else { "N" })?;

    let data_type = record
        .column(aliases::ORACLE_TYPE)
        .unwrap_or(DbType::of(&record.field_type).as_str());
    write_optional_element(xml, "DataType", data_type)?;
    write_optional_element(xml, "DataLength", column(aliases::DATA_LENGTH))?;
    write_optional_element(xml, "Precision", column(aliases::NUMBER_PRECISION))?;
    write_optional_element(xml, "Scale", column(aliases::NUMBER_SCALE))?;
    if record.column(aliases::NULLABLE).is_some() {
        write_optional_element(xml, "Nullable", if nullable(record) { "Y" } else { "N" })?;
    }
    write_optional_element(xml, "Encrypted", column(aliases::ENCRYPTED))?;
    write_optional_element(xml, "Unique", column(aliases::UNIQUE))?;
    end_element(xml, "Field")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn layout() -> Table {
        Table::from_rows(
            "Campos Entrada",
            strings(&["Nome", "Id", "PosIni", "Tamanho", "Persistencia", "NomeTabela"]),
            None,
            vec![
                (2, strings(&["CPF", "1", "1", "11", "S", ""])),
                (3, strings(&["NOME", "2", "12", "30", "N", ""])),
                (4, strings(&["CONTA", "3", "42", "8", "S", "CONTAS"])),
            ],
        )
    }

    #[test]
    fn header_is_always_present() {
        let xml = render_persistence(&layout(), None, TableNamePolicy::FillMissing).expect("xml");
        assert!(xml.contains("<Identifier/>"));
        assert!(xml.contains("<LayoutSize>49</LayoutSize>"));
        assert!(xml.contains("<EventId/>"));
        assert_eq!(xml.matches("<Field>").count(), 2);
        assert!(xml.contains("<Table/>"));
        assert!(xml.contains("<Column>CPF</Column>"));
        assert!(xml.contains("<Required>N</Required>"));
        assert!(xml.contains("<DataType>VARCHAR2</DataType>"));
        assert!(!xml.contains("NOME"));
    }

    #[test]
    fn field_children_keep_order() {
        let xml = render_persistence(&layout(), None, TableNamePolicy::FillMissing).expect("xml");
        let expected = "    <Field>\n      \
                        <Table/>\n      \
                        <Column>CPF</Column>\n      \
                        <Name>CPF</Name>\n      \
                        <Id>1</Id>\n      \
                        <Type>TEXT</Type>\n      \
                        <Size>11</Size>\n      \
                        <Start>1</Start>\n      \
                        <Required>N</Required>\n      \
                        <DataType>VARCHAR2</DataType>\n    \
                        </Field>\n";
        assert!(xml.contains(expected), "{xml}");
    }
}

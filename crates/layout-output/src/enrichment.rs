//! External-enrichment XML.
//!
//! Each field flagged for enrichment becomes an `Access` block. Its key and
//! return-field rows are fanned in from two side tables by the enrichment
//! identifier, so the side tables need not line up row by row with the
//! layout. Query and condition text go out as CDATA.

use std::io;

use layout_model::{FieldRecord, RawColumns, Table, aliases, canonical_id, header_matches};

use crate::common::{
    XmlWriter, empty_element, end_element, finish_document, new_document, start_element,
    start_element_with, write_cdata_element, write_optional_element, write_required_element,
};
use crate::error::Result;
use crate::generate::{GenerationContext, TargetGenerator, io_error};
use crate::join::JoinIndex;
use crate::sections::sanitize_tag;
use crate::target::Target;

#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichmentGenerator;

impl TargetGenerator for EnrichmentGenerator {
    fn target(&self) -> Target {
        Target::Enrichment
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let target = self.target();
        let table = ctx.layout_table(target)?;
        let keys = join_index(ctx.auxiliary(target, &ctx.options.enrichment_keys_table));
        let returns = join_index(ctx.auxiliary(target, &ctx.options.enrichment_returns_table));
        render_enrichment(table, &keys, &returns).map_err(io_error(target))
    }
}

fn join_index(table: Option<&Table>) -> JoinIndex {
    match table {
        Some(table) => JoinIndex::build(&[table], aliases::ENRICHMENT_ID),
        None => JoinIndex::default(),
    }
}

/// The join identifier of a record: its enrichment id column, else its id,
/// else its name. A numeric id column is given in canonical form.
pub fn access_key(record: &FieldRecord) -> String {
    if let Some(id) = record.column(aliases::ENRICHMENT_ID) {
        return canonical_id(id);
    }
    match record.id {
        Some(id) => id.to_string(),
        None => record.name.clone(),
    }
}

pub fn render_enrichment(
    table: &Table,
    keys: &JoinIndex,
    returns: &JoinIndex,
) -> io::Result<String> {
    let records = table.flagged(aliases::FLAG_ENRICHMENT);

    let mut xml = new_document()?;
    start_element(&mut xml, "Enrichment")?;
    for record in &records {
        let key = access_key(record);
        let key_rows = keys.group(&key);
        let return_rows = returns.group(&key);
        if key_rows.is_empty() && return_rows.is_empty() {
            tracing::debug!(field = %record.name, key = %key, "no joined rows");
        }

        start_element_with(&mut xml, "Access", &[("id", key.as_str())])?;
        write_required_element(&mut xml, "Name", &record.name)?;
        write_optional_element(&mut xml, "Description", &record.description)?;
        write_optional_element(
            &mut xml,
            "Source",
            record.column(aliases::ENRICHMENT_SOURCE).unwrap_or(""),
        )?;
        write_cdata_element(&mut xml, "Query", record.column(aliases::QUERY).unwrap_or(""))?;
        write_cdata_element(
            &mut xml,
            "Condition",
            record.column(aliases::CONDITION).unwrap_or(""),
        )?;
        write_group(&mut xml, "Keys", "Key", key_rows)?;
        write_group(&mut xml, "ReturnFields", "ReturnField", return_rows)?;
        end_element(&mut xml, "Access")?;
    }
    end_element(&mut xml, "Enrichment")?;

    tracing::debug!(accesses = records.len(), "enrichment rendered");
    Ok(finish_document(xml))
}

/// Joined rows under `outer`, one `inner` element per row.
fn write_group(
    xml: &mut XmlWriter,
    outer: &str,
    inner: &str,
    rows: &[RawColumns],
) -> io::Result<()> {
    if rows.is_empty() {
        return empty_element(xml, outer);
    }
    start_element(xml, outer)?;
    for row in rows {
        let cells: Vec<(&str, &str)> = row
            .iter()
            .filter(|(header, value)| {
                !value.trim().is_empty() && !header_matches(header, aliases::ENRICHMENT_ID)
            })
            .collect();
        if cells.is_empty() {
            empty_element(xml, inner)?;
            continue;
        }
        start_element(xml, inner)?;
        for (header, value) in cells {
            write_optional_element(xml, &sanitize_tag(header), value)?;
        }
        end_element(xml, inner)?;
    }
    end_element(xml, outer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn access_key_falls_back_to_id_then_name() {
        let mut record = FieldRecord::new("SCORE");
        assert_eq!(access_key(&record), "SCORE");
        record.id = Some(7);
        assert_eq!(access_key(&record), "7");
        record.raw.push("IdEnriquecimento", " 12 ");
        assert_eq!(access_key(&record), "12");
    }

    #[test]
    fn access_id_uses_canonical_number() {
        let mut record = FieldRecord::new("SCORE");
        record.raw.push("IdEnriquecimento", "1.0");
        assert_eq!(access_key(&record), "1");
        let mut named = FieldRecord::new("SCORE");
        named.raw.push("IdEnriquecimento", " Score Ação ");
        assert_eq!(access_key(&named), "Score Ação");
    }

    #[test]
    fn renders_access_with_joined_rows() {
        let layout = Table::from_rows(
            "Campos Entrada",
            strings(&["Nome", "Enriquecimento", "IdEnriquecimento", "Consulta"]),
            None,
            vec![(2, strings(&["SCORE", "S", "1", "SELECT * FROM T WHERE A < 1"]))],
        );
        let keys = Table::from_rows(
            "Chaves Enriquecimento",
            strings(&["IdEnriquecimento", "Nome Chave"]),
            None,
            vec![(2, strings(&["1.0", "CPF"]))],
        );
        let keys = JoinIndex::build(&[&keys], aliases::ENRICHMENT_ID);
        let xml = render_enrichment(&layout, &keys, &JoinIndex::default()).expect("xml");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Enrichment>\n  \
             <Access id=\"1\">\n    \
             <Name>SCORE</Name>\n    \
             <Query><![CDATA[SELECT * FROM T WHERE A < 1]]></Query>\n    \
             <Keys>\n      \
             <Key>\n        \
             <Nome_Chave>CPF</Nome_Chave>\n      \
             </Key>\n    \
             </Keys>\n    \
             <ReturnFields/>\n  \
             </Access>\n\
             </Enrichment>\n"
        );
    }
}

//! Namespaced attribute-map XML.
//!
//! Fields flagged for the attribute map are grouped under the origin found
//! in their own row. Origins appear in the order they are first seen, and
//! fields without one fall under `DEFAULT`.

use std::io;

use layout_model::{DefaultValueDefinition, FieldRecord, Table, aliases};

use crate::common::{
    XmlWriter, empty_element, end_element, finish_document, new_document, start_element,
    start_element_with, write_optional_element, write_required_element, write_text_element_with,
};
use crate::error::Result;
use crate::generate::{GenerationContext, TargetGenerator, io_error};
use crate::target::Target;

/// Origin used when a field's row names none.
pub const DEFAULT_ORIGIN: &str = "DEFAULT";

#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeMapGenerator;

impl TargetGenerator for AttributeMapGenerator {
    fn target(&self) -> Target {
        Target::AttributeMap
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let target = self.target();
        let table = ctx.layout_table(target)?;
        let defaults = ctx
            .auxiliary(target, &ctx.options.default_values_table)
            .map(DefaultValueDefinition::from_table)
            .unwrap_or_default();
        render_attribute_map(table, &defaults, &ctx.options.attribute_map_namespace)
            .map_err(io_error(target))
    }
}

/// Flagged records grouped by origin, in first-appearance order.
pub fn group_by_origin<'a>(
    records: &[&'a FieldRecord],
) -> Vec<(String, Vec<&'a FieldRecord>)> {
    let mut groups: Vec<(String, Vec<&'a FieldRecord>)> = Vec::new();
    for &record in records {
        let origin = record
            .column(aliases::ORIGIN)
            .map_or(DEFAULT_ORIGIN, str::trim);
        match groups.iter_mut().find(|(name, _)| name == origin) {
            Some((_, members)) => members.push(record),
            None => groups.push((origin.to_string(), vec![record])),
        }
    }
    groups
}

pub fn render_attribute_map(
    table: &Table,
    defaults: &[DefaultValueDefinition],
    namespace: &str,
) -> io::Result<String> {
    let records = table.flagged(aliases::FLAG_ATTRIBUTE_MAP);
    let groups = group_by_origin(&records);

    let mut xml = new_document()?;
    start_element_with(&mut xml, "am:attributeMap", &[("xmlns:am", namespace)])?;

    if defaults.is_empty() {
        empty_element(&mut xml, "am:defaultValues")?;
    } else {
        start_element(&mut xml, "am:defaultValues")?;
        for definition in defaults {
            write_default(&mut xml, definition)?;
        }
        end_element(&mut xml, "am:defaultValues")?;
    }

    if groups.is_empty() {
        empty_element(&mut xml, "am:input")?;
    } else {
        start_element(&mut xml, "am:input")?;
        for (origin, members) in &groups {
            start_element_with(&mut xml, "am:origin", &[("name", origin.as_str())])?;
            for record in members {
                write_attribute(&mut xml, record)?;
            }
            end_element(&mut xml, "am:origin")?;
        }
        end_element(&mut xml, "am:input")?;
    }

    end_element(&mut xml, "am:attributeMap")?;
    tracing::debug!(
        fields = records.len(),
        origins = groups.len(),
        defaults = defaults.len(),
        "attribute map rendered"
    );
    Ok(finish_document(xml))
}

fn write_default(xml: &mut XmlWriter, definition: &DefaultValueDefinition) -> io::Result<()> {
    let mut attributes = vec![("name", definition.name.as_str())];
    if !definition.value_type.is_empty() {
        attributes.push(("type", definition.value_type.as_str()));
    }
    if !definition.description.is_empty() {
        attributes.push(("description", definition.description.as_str()));
    }
    write_text_element_with(xml, "am:defaultValue", &attributes, &definition.value)
}

fn write_attribute(xml: &mut XmlWriter, record: &FieldRecord) -> io::Result<()> {
    let column = |list: &[&str]| record.column(list).map(str::trim);
    let name = column(aliases::RULE_ATTRIBUTE).unwrap_or(&record.name);

    start_element_with(xml, "am:attribute", &[("name", name)])?;
    write_required_element(
        xml,
        "am:eventAttribute",
        column(aliases::EVENT_ATTRIBUTE).unwrap_or(&record.name),
    )?;
    write_optional_element(
        xml,
        "am:modelAttribute",
        column(aliases::MODEL_ATTRIBUTE).unwrap_or(""),
    )?;
    write_optional_element(
        xml,
        "am:type",
        column(aliases::ATTRIBUTE_TYPE).unwrap_or(record.field_type.as_str()),
    )?;
    write_optional_element(
        xml,
        "am:defaultValue",
        column(aliases::ATTRIBUTE_DEFAULT).unwrap_or(&record.default_value),
    )?;
    write_optional_element(
        xml,
        "am:description",
        column(aliases::ATTRIBUTE_DESCRIPTION).unwrap_or(&record.description),
    )?;
    write_optional_element(
        xml,
        "am:scoreModelIn",
        column(aliases::SCORE_MODEL_IN).unwrap_or(""),
    )?;
    end_element(xml, "am:attribute")
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
            strings(&["Nome", "MapaAtributo", "Origin", "RuleAttribute", "ScoreModelIn"]),
            None,
            vec![
                (2, strings(&["CPF", "S", "CLIENTE", "cpfCliente", ""])),
                (3, strings(&["VALOR", "S", "", "", "S"])),
                (4, strings(&["CONTA", "S", "CLIENTE", "", ""])),
                (5, strings(&["IGNORADO", "N", "CLIENTE", "", ""])),
            ],
        )
    }

    #[test]
    fn groups_origins_in_first_appearance_order() {
        let table = layout();
        let records = table.flagged(aliases::FLAG_ATTRIBUTE_MAP);
        let groups = group_by_origin(&records);
        let names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["CLIENTE", "DEFAULT"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn renders_namespaced_document() {
        let defaults = vec![DefaultValueDefinition {
            name: "canal".to_string(),
            value: "WEB".to_string(),
            value_type: "STRING".to_string(),
            description: String::new(),
        }];
        let xml = render_attribute_map(&layout(), &defaults, "urn:test").expect("xml");
        assert!(xml.contains("<am:attributeMap xmlns:am=\"urn:test\">"));
        assert!(xml.contains("<am:defaultValue name=\"canal\" type=\"STRING\">WEB</am:defaultValue>"));
        assert!(xml.contains("<am:attribute name=\"cpfCliente\">"));
        assert!(xml.contains("<am:eventAttribute>CPF</am:eventAttribute>"));
        assert!(xml.contains("<am:origin name=\"DEFAULT\">"));
        assert!(xml.contains("<am:scoreModelIn>S</am:scoreModelIn>"));
        assert!(xml.contains("<am:type>TEXT</am:type>"));
        assert!(!xml.contains("IGNORADO"));
    }

    #[test]
    fn missing_defaults_render_empty_list() {
        let xml = render_attribute_map(&layout(), &[], "urn:test").expect("xml");
        assert!(xml.contains("<am:defaultValues/>"));
    }
}

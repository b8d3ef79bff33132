//! Element naming and column grouping for generated XML.

use layout_model::{
    SectionKind, Table, aliases, fold_accents, header_matches, normalize_header_key,
};

/// Words stripped from the front of a table name before deriving tags.
const NAME_PREFIXES: &[&str] = &["fields", "field", "campos", "campo"];

/// Root and item element names derived from a table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNames {
    pub root: String,
    pub item: String,
    /// Derived suffix; empty when the name gave nothing usable.
    pub suffix: String,
}

/// Derives element names: `"Fields Input"` gives `LayoutInput` / `FieldInput`.
///
/// Total: names with nothing left after the prefix fall back to `Layout` /
/// `Field`.
pub fn derive_element_names(table_name: &str) -> ElementNames {
    let folded = fold_accents(table_name);
    let mut words: Vec<&str> = folded
        .split(|ch: char| ch.is_whitespace() || ch == '_' || ch == '-')
        .filter(|word| !word.is_empty())
        .collect();
    if words
        .first()
        .is_some_and(|first| NAME_PREFIXES.contains(&first.to_lowercase().as_str()))
    {
        words.remove(0);
    }

    let mut suffix = String::new();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            suffix.extend(first.to_uppercase());
            suffix.push_str(chars.as_str());
        }
    }
    let suffix: String = suffix
        .chars()
        .map(|ch| if is_tag_char(ch) { ch } else { '_' })
        .collect();

    ElementNames {
        root: format!("Layout{suffix}"),
        item: format!("Field{suffix}"),
        suffix,
    }
}

fn is_tag_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}

/// Turns arbitrary header text into a valid XML element name.
///
/// Idempotent: sanitizing a sanitized tag returns it unchanged.
pub fn sanitize_tag(text: &str) -> String {
    let mut tag: String = text
        .trim()
        .chars()
        .map(|ch| if is_tag_char(ch) { ch } else { '_' })
        .collect();
    if tag.is_empty() {
        return "field".to_string();
    }
    if !tag.starts_with(|ch: char| ch.is_ascii_alphabetic() || ch == '_') {
        tag.insert(0, '_');
    }
    tag
}

/// Position column role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPart {
    Start,
    End,
}

/// Recognizes start/end position headers under any of their spellings.
pub fn position_part(header: &str) -> Option<PositionPart> {
    if header_matches(header, aliases::START) {
        Some(PositionPart::Start)
    } else if header_matches(header, aliases::END) {
        Some(PositionPart::End)
    } else {
        None
    }
}

/// A table's headers sorted by how the generators treat them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub routing: Vec<String>,
    pub shared: Vec<String>,
    pub specific: Vec<String>,
    pub position: Vec<String>,
    elements: Vec<String>,
}

impl ResolvedColumns {
    /// Shared and schema-specific headers in original order, positions removed.
    pub fn element_columns(&self) -> &[String] {
        &self.elements
    }
}

/// Splits a table's headers into routing, shared, specific and position
/// columns.
///
/// With section metadata, columns of another schema's section are dropped.
/// Without it, only the known routing-flag names are excluded.
pub fn resolve_columns(table: &Table) -> ResolvedColumns {
    let names = derive_element_names(&table.name);
    let mut resolved = ResolvedColumns::default();

    for header in &table.headers {
        let header = header.trim();
        if header.is_empty() {
            continue;
        }
        let kind = match &table.sections {
            Some(sections) => match sections.section_of(header) {
                Some(section) if section.kind == SectionKind::Schema => {
                    if schema_matches(&section.label, &names) {
                        Some(SectionKind::Schema)
                    } else {
                        None
                    }
                }
                Some(section) => Some(section.kind),
                None => Some(SectionKind::Shared),
            },
            None if header_matches(header, aliases::KNOWN_ROUTING_FLAGS) => {
                Some(SectionKind::Routing)
            }
            None => Some(SectionKind::Shared),
        };

        let owned = header.to_string();
        match kind {
            Some(SectionKind::Routing) => resolved.routing.push(owned),
            Some(_) if position_part(header).is_some() => resolved.position.push(owned),
            Some(SectionKind::Shared) => {
                resolved.shared.push(owned.clone());
                resolved.elements.push(owned);
            }
            Some(SectionKind::Schema) => {
                resolved.specific.push(owned.clone());
                resolved.elements.push(owned);
            }
            None => {}
        }
    }
    resolved
}

/// True when a schema section label names this table's schema.
fn schema_matches(label: &str, names: &ElementNames) -> bool {
    let key = normalize_header_key(label);
    if key.is_empty() {
        return false;
    }
    let label_suffix = normalize_header_key(&derive_element_names(label).suffix);
    [&names.suffix, &names.root, &names.item]
        .iter()
        .map(|name| normalize_header_key(name))
        .any(|candidate| {
            !candidate.is_empty() && (candidate == key || candidate == label_suffix)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_model::Sections;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn derives_names_from_table_name() {
        let names = derive_element_names("Fields Input");
        assert_eq!(names.root, "LayoutInput");
        assert_eq!(names.item, "FieldInput");

        let names = derive_element_names("Campos Entrada");
        assert_eq!(names.root, "LayoutEntrada");

        let names = derive_element_names("campos_retorno-cartão");
        assert_eq!(names.item, "FieldRetornoCartao");

        let names = derive_element_names("Pedido de compra");
        assert_eq!(names.root, "LayoutPedidoDeCompra");
    }

    #[test]
    fn names_fall_back() {
        for name in ["", "Fields", "  campos  ", "--"] {
            let names = derive_element_names(name);
            assert_eq!(names.root, "Layout");
            assert_eq!(names.item, "Field");
            assert!(names.suffix.is_empty());
        }
    }

    #[test]
    fn sanitizes_tags() {
        assert_eq!(sanitize_tag("Nome Campo"), "Nome_Campo");
        assert_eq!(sanitize_tag("1st"), "_1st");
        assert_eq!(sanitize_tag(".hidden"), "_.hidden");
        assert_eq!(sanitize_tag("  "), "field");
        assert_eq!(sanitize_tag("Ação"), "A__o");
        assert_eq!(sanitize_tag("ção"), "__o");
        assert_eq!(sanitize_tag("a:b/c"), "a_b_c");
    }

    #[test]
    fn position_headers() {
        assert_eq!(position_part("Posição Inicial"), Some(PositionPart::Start));
        assert_eq!(position_part("PosFinal"), Some(PositionPart::End));
        assert_eq!(position_part("Tamanho"), None);
    }

    #[test]
    fn resolves_without_sections() {
        let table = Table::new(
            "Campos Entrada",
            strings(&["Entrada", "Nome", "PosIni", "Tamanho", "PosFin", "Persistencia"]),
        );
        let resolved = resolve_columns(&table);
        assert_eq!(resolved.routing, strings(&["Entrada", "Persistencia"]));
        assert_eq!(resolved.position, strings(&["PosIni", "PosFin"]));
        assert_eq!(resolved.element_columns(), strings(&["Nome", "Tamanho"]).as_slice());
    }

    #[test]
    fn resolves_with_sections() {
        let headers = strings(&[
            "Entrada", "Audit", "Nome", "PosIni", "Tamanho", "Mascara", "Coluna",
        ]);
        let labels = strings(&["Flags", "", "Comum", "", "", "Input", "Output"]);
        let mut table = Table::new("Fields Input", headers.clone());
        table.sections = Sections::from_metadata_row(&labels, &headers);
        let resolved = resolve_columns(&table);
        assert_eq!(resolved.routing, strings(&["Entrada", "Audit"]));
        assert_eq!(resolved.shared, strings(&["Nome", "Tamanho"]));
        assert_eq!(resolved.specific, strings(&["Mascara"]));
        assert_eq!(
            resolved.element_columns(),
            strings(&["Nome", "Tamanho", "Mascara"]).as_slice()
        );
    }
}

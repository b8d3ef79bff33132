//! Column sections declared by a metadata row above the header.
//!
//! A spreadsheet may group its columns under merged cells such as
//! "Flags", "Shared" or "Input". Each non-empty label opens a section that
//! extends to the column before the next label.

use serde::{Deserialize, Serialize};

use crate::keys::normalize_header_key;

/// How a section's columns are used by the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Boolean routing flags, never emitted as field elements.
    Routing,
    /// Columns shared by every derived schema.
    Shared,
    /// Columns specific to one derived schema, named by the label.
    Schema,
}

impl SectionKind {
    /// Classifies a section label by keyword.
    pub fn classify(label: &str) -> Self {
        let key = normalize_header_key(label);
        const ROUTING: &[&str] = &["flag", "rout", "roteamento", "presenca"];
        const SHARED: &[&str] = &["shared", "common", "comum", "geral", "general"];
        if ROUTING.iter().any(|kw| key.contains(kw)) {
            SectionKind::Routing
        } else if SHARED.iter().any(|kw| key.contains(kw)) {
            SectionKind::Shared
        } else {
            SectionKind::Schema
        }
    }
}

/// One labelled group of headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    pub kind: SectionKind,
    pub headers: Vec<String>,
}

/// Ordered section list for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    /// Builds sections from a metadata row aligned with the header row.
    ///
    /// Headers before the first label belong to no section. Blank headers
    /// are skipped. Returns `None` when the row carries no label at all.
    pub fn from_metadata_row(labels: &[String], headers: &[String]) -> Option<Self> {
        let mut sections: Vec<Section> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            let label = labels.get(idx).map(|l| l.trim()).unwrap_or("");
            if !label.is_empty() {
                sections.push(Section {
                    label: label.to_string(),
                    kind: SectionKind::classify(label),
                    headers: Vec::new(),
                });
            }
            let header = header.trim();
            if header.is_empty() {
                continue;
            }
            if let Some(current) = sections.last_mut() {
                current.headers.push(header.to_string());
            }
        }
        if sections.is_empty() {
            None
        } else {
            Some(Self { sections })
        }
    }

    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section containing `header` (normalized comparison).
    pub fn section_of(&self, header: &str) -> Option<&Section> {
        let key = normalize_header_key(header);
        self.sections.iter().find(|section| {
            section
                .headers
                .iter()
                .any(|h| normalize_header_key(h) == key)
        })
    }

    /// True when `header` sits in a routing section.
    pub fn is_routing(&self, header: &str) -> bool {
        self.section_of(header)
            .is_some_and(|section| section.kind == SectionKind::Routing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn classifies_labels() {
        assert_eq!(SectionKind::classify("Flags"), SectionKind::Routing);
        assert_eq!(SectionKind::classify("Roteamento"), SectionKind::Routing);
        assert_eq!(SectionKind::classify("Presença"), SectionKind::Routing);
        assert_eq!(SectionKind::classify("Comum"), SectionKind::Shared);
        assert_eq!(SectionKind::classify("Shared Columns"), SectionKind::Shared);
        assert_eq!(SectionKind::classify("Input"), SectionKind::Schema);
    }

    #[test]
    fn merged_cells_extend_to_next_label() {
        let labels = strings(&["Flags", "", "Comum", "", "", "Input"]);
        let headers = strings(&["Entrada", "Persistencia", "Nome", "Tamanho", "", "Mascara"]);
        let sections = Sections::from_metadata_row(&labels, &headers).expect("sections");
        let collected: Vec<(&str, usize)> = sections
            .iter()
            .map(|s| (s.label.as_str(), s.headers.len()))
            .collect();
        assert_eq!(collected, vec![("Flags", 2), ("Comum", 2), ("Input", 1)]);
        assert!(sections.is_routing("persistencia"));
        assert!(!sections.is_routing("Nome"));
        assert_eq!(
            sections.section_of("Mascara").map(|s| s.kind),
            Some(SectionKind::Schema)
        );
    }

    #[test]
    fn blank_row_has_no_sections() {
        let labels = strings(&["", " "]);
        let headers = strings(&["Nome", "Tamanho"]);
        assert!(Sections::from_metadata_row(&labels, &headers).is_none());
    }

    #[test]
    fn headers_before_first_label_are_unsectioned() {
        let labels = strings(&["", "Flags"]);
        let headers = strings(&["Nome", "Entrada"]);
        let sections = Sections::from_metadata_row(&labels, &headers).expect("sections");
        assert!(sections.section_of("Nome").is_none());
        assert!(sections.is_routing("Entrada"));
    }
}

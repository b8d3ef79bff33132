//! Validation findings and their textual rendering.

use std::fmt::{self, Write as _};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// The check that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    NoPositionedFields,
    InvalidSize,
    InvalidStart,
    PositionOutOfRange,
    EndMismatch,
    StartNotAtOne,
    Gap,
    Overlap,
    DuplicateId,
    RequiredWithoutValue,
    ValueOverflow,
    Summary,
}

impl CheckKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoPositionedFields => "no_positioned_fields",
            Self::InvalidSize => "invalid_size",
            Self::InvalidStart => "invalid_start",
            Self::PositionOutOfRange => "position_out_of_range",
            Self::EndMismatch => "end_mismatch",
            Self::StartNotAtOne => "start_not_at_one",
            Self::Gap => "gap",
            Self::Overlap => "overlap",
            Self::DuplicateId => "duplicate_id",
            Self::RequiredWithoutValue => "required_without_value",
            Self::ValueOverflow => "value_overflow",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub check: CheckKind,
    pub severity: Severity,
    /// Field the issue is about, when it concerns one field.
    pub field: Option<String>,
    /// Source row of that field.
    pub row: Option<usize>,
    pub message: String,
}

/// Errors, warnings and informational notes for one layout table.
///
/// Findings are data: nothing here blocks generation by itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub table: String,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub infos: Vec<Issue>,
    pub total_fields: usize,
    pub total_size: u64,
    pub final_position: Option<u32>,
}

impl ValidationReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub(crate) fn push(
        &mut self,
        check: CheckKind,
        severity: Severity,
        field: Option<(&str, usize)>,
        message: String,
    ) {
        let issue = Issue {
            check,
            severity,
            field: field.map(|(name, _)| name.to_string()),
            row: field.map(|(_, row)| row),
            message,
        };
        match severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.infos.push(issue),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Issues of one check, across all severities.
    pub fn issues_of(&self, check: CheckKind) -> impl Iterator<Item = &Issue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.infos)
            .filter(move |issue| issue.check == check)
    }

    /// One-line summary suitable for a status bar.
    pub fn status_line(&self) -> String {
        if !self.is_valid() {
            format!(
                "INVALID: {} error(s), {} warning(s)",
                self.errors.len(),
                self.warnings.len()
            )
        } else if self.has_warnings() {
            format!(
                "OK with warnings: {} warning(s) | {} fields | {} bytes",
                self.warnings.len(),
                self.total_fields,
                self.total_size
            )
        } else {
            format!("OK: {} fields | {} bytes", self.total_fields, self.total_size)
        }
    }

    /// Full multi-section text report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let sections = [
            ("INFO", "✔", &self.infos),
            ("WARNINGS", "⚠", &self.warnings),
            ("ERRORS", "✗", &self.errors),
        ];
        for (title, marker, issues) in sections {
            if issues.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "=== {title} ===");
            for issue in issues {
                let _ = writeln!(out, "  {marker} {}", issue.message);
            }
        }
        if self.errors.is_empty() && self.warnings.is_empty() {
            out.push_str("✔ Validation finished without problems.\n");
        }
        if self.total_fields > 0 {
            let _ = writeln!(
                out,
                "\nTotal: {} fields | layout size: {} bytes",
                self.total_fields, self.total_size
            );
        }
        out
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

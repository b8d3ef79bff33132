//! Positional consistency checks over the active fields of a layout table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use layout_model::{FieldRecord, MAX_RECORD_WIDTH, Table};

use crate::report::{CheckKind, Severity, ValidationReport};

/// Whether validation errors stop downstream generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Report errors and let the caller continue.
    #[default]
    Advisory,
    /// Refuse to generate while errors remain.
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    pub error_policy: ErrorPolicy,
    /// Warn about values longer than their slot.
    pub warn_on_truncation: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Advisory,
            warn_on_truncation: true,
        }
    }
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_truncation_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_truncation = enabled;
        self
    }
}

/// Validates a table with default options.
pub fn validate_layout(table: &Table) -> ValidationReport {
    LayoutValidator::default().validate(table)
}

#[derive(Debug, Clone, Default)]
pub struct LayoutValidator {
    options: ValidateOptions,
}

impl LayoutValidator {
    pub fn new(options: ValidateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub fn validate(&self, table: &Table) -> ValidationReport {
        let mut report = ValidationReport::new(&table.name);
        let fields = table.active_positioned();

        if fields.is_empty() {
            report.push(
                CheckKind::NoPositionedFields,
                Severity::Warning,
                None,
                "no active fields with a defined position were found".to_string(),
            );
            return report;
        }

        for field in &fields {
            self.check_field(field, &mut report);
        }
        check_continuity(&fields, &mut report);
        check_unique_ids(&table.records, &mut report);

        report.total_fields = fields.len();
        report.total_size = fields.iter().map(|f| u64::from(size_of(f))).sum();
        report.final_position = fields.last().and_then(|f| f.end());

        report.push(
            CheckKind::Summary,
            Severity::Info,
            None,
            format!("fields: {}", report.total_fields),
        );
        report.push(
            CheckKind::Summary,
            Severity::Info,
            None,
            format!("total size: {} bytes", report.total_size),
        );
        if let Some(position) = report.final_position {
            report.push(
                CheckKind::Summary,
                Severity::Info,
                None,
                format!("final position: {position}"),
            );
        }

        tracing::debug!(
            table = %table.name,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validated layout"
        );
        report
    }

    fn check_field(&self, field: &FieldRecord, report: &mut ValidationReport) {
        let at = Some((field.name.as_str(), field.row));
        let start = start_of(field);
        let size = size_of(field);

        if size == 0 {
            report.push(
                CheckKind::InvalidSize,
                Severity::Error,
                at,
                format!(
                    "row {} | field '{}': invalid size ({size})",
                    field.row, field.name
                ),
            );
        }
        if start == 0 {
            report.push(
                CheckKind::InvalidStart,
                Severity::Error,
                at,
                format!(
                    "row {} | field '{}': invalid start position ({start})",
                    field.row, field.name
                ),
            );
        }
        if start > 0 && size > 0 && !field.fits_record_width() {
            report.push(
                CheckKind::PositionOutOfRange,
                Severity::Error,
                at,
                format!(
                    "row {} | field '{}': start={start} + size={size} ends beyond \
                     position {MAX_RECORD_WIDTH}",
                    field.row, field.name
                ),
            );
        }

        if let Some(declared) = field.declared_end {
            let expected = i64::from(start) + i64::from(size) - 1;
            if i64::from(declared) != expected {
                report.push(
                    CheckKind::EndMismatch,
                    Severity::Error,
                    at,
                    format!(
                        "row {} | field '{}': end={declared} but expected={expected} \
                         (start={start} + size={size} - 1)",
                        field.row, field.name
                    ),
                );
            }
        }

        if field.required && field.value().trim().is_empty() {
            report.push(
                CheckKind::RequiredWithoutValue,
                Severity::Warning,
                at,
                format!(
                    "row {} | required field '{}' has no value",
                    field.row, field.name
                ),
            );
        }

        let value = field.value();
        let length = value.chars().count();
        if self.options.warn_on_truncation && !value.trim().is_empty() && length > size as usize {
            report.push(
                CheckKind::ValueOverflow,
                Severity::Warning,
                at,
                format!(
                    "row {} | field '{}': value ({length} chars) exceeds size ({size}) \
                     and will be truncated",
                    field.row, field.name
                ),
            );
        }
    }
}

fn check_continuity(fields: &[&FieldRecord], report: &mut ValidationReport) {
    let Some(first) = fields.first() else {
        return;
    };
    if start_of(first) != 1 {
        report.push(
            CheckKind::StartNotAtOne,
            Severity::Warning,
            Some((first.name.as_str(), first.row)),
            format!(
                "layout does not start at position 1: first field '{}' starts at {}",
                first.name,
                start_of(first)
            ),
        );
    }

    for pair in fields.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let expected = u64::from(start_of(prev)) + u64::from(size_of(prev));
        let start = u64::from(start_of(cur));
        if start > expected {
            report.push(
                CheckKind::Gap,
                Severity::Warning,
                Some((cur.name.as_str(), cur.row)),
                format!(
                    "gap before '{}': expected position {expected}, found {start}; \
                     gap of {} byte(s)",
                    cur.name,
                    start - expected
                ),
            );
        } else if start < expected {
            report.push(
                CheckKind::Overlap,
                Severity::Error,
                Some((cur.name.as_str(), cur.row)),
                format!(
                    "overlap at position {start}: '{}' (ends at {}) overlaps '{}' (starts at {start})",
                    prev.name,
                    expected.saturating_sub(1),
                    cur.name
                ),
            );
        }
    }
}

/// Every field id must belong to one field only.
fn check_unique_ids(records: &[FieldRecord], report: &mut ValidationReport) {
    let mut by_id: BTreeMap<u32, Vec<&FieldRecord>> = BTreeMap::new();
    for record in records {
        if let Some(id) = record.id {
            by_id.entry(id).or_default().push(record);
        }
    }
    for (id, holders) in by_id {
        let [first, rest @ ..] = holders.as_slice() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let names: Vec<&str> = holders.iter().map(|r| r.name.as_str()).collect();
        report.push(
            CheckKind::DuplicateId,
            Severity::Error,
            Some((first.name.as_str(), first.row)),
            format!("id {id} is used by {} fields: {}", holders.len(), names.join(", ")),
        );
    }
}

/// Renumbers the active positioned fields contiguously from 1.
///
/// Fields keep their start order; only `start` and `declared_end` change.
/// Renumbering stops at the first field whose new position would not fit a
/// `u32`; that field and the ones after it keep their old positions.
/// Returns the number of fields renumbered.
pub fn recalculate_positions(records: &mut [FieldRecord]) -> usize {
    let mut order: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.has_position())
        .map(|(idx, _)| idx)
        .collect();
    order.sort_by_key(|&idx| records[idx].start.unwrap_or(0));

    let mut position: u64 = 1;
    let mut renumbered = 0;
    for &idx in &order {
        let record = &mut records[idx];
        let size = u64::from(record.size.unwrap_or(0));
        let end = (position + size).saturating_sub(1);
        let (Ok(start), Ok(end)) = (u32::try_from(position), u32::try_from(end)) else {
            tracing::warn!(
                field = %record.name,
                position,
                "position out of range; remaining fields left as they were"
            );
            break;
        };
        record.start = Some(start);
        record.declared_end = Some(end);
        position += size;
        renumbered += 1;
    }
    renumbered
}

fn start_of(field: &FieldRecord) -> u32 {
    field.start.unwrap_or(0)
}

fn size_of(field: &FieldRecord) -> u32 {
    field.size.unwrap_or(0)
}

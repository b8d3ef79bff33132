use layout_model::{FieldRecord, Table};
use layout_validate::{
    CheckKind, ErrorPolicy, Severity, gate_generation, recalculate_positions, validate_layout,
};
use proptest::prelude::*;

fn layout(fields: &[(&str, u32, u32)]) -> Table {
    let mut table = Table::new("Campos Entrada", vec![]);
    for (idx, (name, start, size)) in fields.iter().enumerate() {
        let mut record = FieldRecord::new(*name).with_position(*start, *size);
        record.row = idx + 2;
        table.push_record(record);
    }
    table
}

fn messages(issues: &[layout_validate::Issue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.message.as_str()).collect()
}

#[test]
fn contiguous_layout_is_clean() {
    let report = validate_layout(&layout(&[("A", 1, 3), ("B", 4, 2), ("C", 6, 1)]));
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.total_fields, 3);
    assert_eq!(report.total_size, 6);
    assert_eq!(
        messages(&report.infos),
        vec!["fields: 3", "total size: 6 bytes", "final position: 6"]
    );
    assert_eq!(report.status_line(), "OK: 3 fields | 6 bytes");
}

#[test]
fn trailing_gap_reports_final_position() {
    let report = validate_layout(&layout(&[("A", 1, 3), ("B", 4, 2), ("C", 7, 1)]));
    assert!(report.errors.is_empty());
    assert_eq!(report.total_size, 6);
    assert_eq!(report.final_position, Some(7));
    assert!(
        report
            .infos
            .iter()
            .any(|issue| issue.message == "final position: 7")
    );
    let gap = report.issues_of(CheckKind::Gap).next().expect("gap before C");
    assert_eq!(gap.field.as_deref(), Some("C"));
}

#[test]
fn gap_of_one_byte() {
    let report = validate_layout(&layout(&[("A", 1, 3), ("B", 5, 2), ("C", 7, 1)]));
    assert!(report.is_valid());
    let gaps: Vec<_> = report.issues_of(CheckKind::Gap).collect();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].severity, Severity::Warning);
    assert_eq!(gaps[0].field.as_deref(), Some("B"));
    assert!(gaps[0].message.contains("gap of 1 byte(s)"));
}

#[test]
fn overlap_at_position_three() {
    let report = validate_layout(&layout(&[("A", 1, 3), ("B", 3, 2), ("C", 5, 1)]));
    assert!(!report.is_valid());
    let overlaps: Vec<_> = report.issues_of(CheckKind::Overlap).collect();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].severity, Severity::Error);
    assert!(overlaps[0].message.contains("'A'"));
    assert!(overlaps[0].message.contains("'B'"));
    assert!(overlaps[0].message.contains("position 3"));
    assert_eq!(report.status_line(), "INVALID: 1 error(s), 0 warning(s)");
}

#[test]
fn empty_subset_only_warns() {
    let mut table = layout(&[("A", 1, 3)]);
    table.records[0].active = false;
    table.push_record(FieldRecord::new("NOPOS"));
    let report = validate_layout(&table);
    assert!(report.errors.is_empty());
    assert!(report.infos.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].check, CheckKind::NoPositionedFields);
}

#[test]
fn first_field_not_at_one() {
    let report = validate_layout(&layout(&[("A", 2, 3)]));
    let issue = report
        .issues_of(CheckKind::StartNotAtOne)
        .next()
        .expect("start warning");
    assert!(issue.message.contains("'A' starts at 2"));
}

#[test]
fn required_uses_default_value() {
    let mut table = layout(&[("A", 1, 3), ("B", 4, 3)]);
    table.records[0].required = true;
    table.records[1].required = true;
    table.records[1].default_value = "X".to_string();
    let report = validate_layout(&table);
    let required: Vec<_> = report.issues_of(CheckKind::RequiredWithoutValue).collect();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].field.as_deref(), Some("A"));
    assert!(report.is_valid());
}

#[test]
fn advisory_policy_never_blocks() {
    let report = validate_layout(&layout(&[("A", 1, 3), ("B", 2, 2)]));
    let advisory = gate_generation(&report, ErrorPolicy::default());
    assert!(!advisory.block_generation);
    assert_eq!(advisory.error_count, 1);
    assert!(gate_generation(&report, ErrorPolicy::Block).block_generation);

    let clean = validate_layout(&layout(&[("A", 1, 3)]));
    assert!(!gate_generation(&clean, ErrorPolicy::Block).block_generation);
}

#[test]
fn report_serializes_to_json() {
    let report = validate_layout(&layout(&[("A", 1, 3), ("B", 3, 2)]));
    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["errors"][0]["check"], "overlap");
    assert_eq!(json["errors"][0]["severity"], "error");
    assert_eq!(json["total_size"], 5);
}

proptest! {
    #[test]
    fn continuity_matches_arithmetic(
        first_size in 1u32..20,
        second_start in 1u32..40,
        second_size in 1u32..20,
    ) {
        let table = layout(&[("P", 1, first_size), ("Q", second_start, second_size)]);
        let report = validate_layout(&table);
        let expected = 1 + first_size;
        let gaps = report.issues_of(CheckKind::Gap).count();
        let overlaps = report.issues_of(CheckKind::Overlap).count();
        prop_assert_eq!(gaps == 1, second_start > expected);
        prop_assert_eq!(overlaps == 1, second_start < expected);
        prop_assert_eq!(gaps + overlaps == 0, second_start == expected);
    }

    #[test]
    fn recalculated_layouts_are_contiguous(
        fields in proptest::collection::vec((1u32..100, 1u32..10), 1..12),
    ) {
        let named: Vec<(String, u32, u32)> = fields
            .iter()
            .enumerate()
            .map(|(idx, (start, size))| (format!("F{idx}"), *start, *size))
            .collect();
        let borrowed: Vec<(&str, u32, u32)> = named
            .iter()
            .map(|(name, start, size)| (name.as_str(), *start, *size))
            .collect();
        let mut table = layout(&borrowed);
        recalculate_positions(&mut table.records);
        let report = validate_layout(&table);
        prop_assert!(report.is_valid());
        prop_assert!(!report.has_warnings());
        let total: u64 = fields.iter().map(|(_, size)| u64::from(*size)).sum();
        prop_assert_eq!(report.total_size, total);
    }
}

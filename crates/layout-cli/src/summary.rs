use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use layout_cli::pipeline::{ArtifactResult, GenerateSummary};
use layout_model::TableSet;
use layout_validate::{Issue, Severity, ValidationReport};

pub fn print_tables(tables: &TableSet) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Fields"),
        header_cell("Positioned"),
        header_cell("Size"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for source in tables.iter() {
        table.add_row(vec![
            Cell::new(&source.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.headers.len()),
            Cell::new(source.rows.len()),
            Cell::new(source.records.len()),
            Cell::new(source.active_positioned().len()),
            Cell::new(source.layout_size()),
        ]);
    }
    println!("{table}");
}

pub fn print_report(report: &ValidationReport) {
    print!("{}", report.render());
    let issues: Vec<&Issue> = report.errors.iter().chain(&report.warnings).collect();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Check"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.check),
            issue.row.map_or_else(|| dim_cell("-"), Cell::new),
            issue
                .field
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("{table}");
}

pub fn print_generation(summary: &GenerateSummary) {
    println!("{}", summary.report.status_line());
    if summary.blocked() {
        eprintln!(
            "Generation blocked: {} validation error(s). Fix them or drop --block-on-errors.",
            summary.decision.error_count
        );
        return;
    }
    if summary.decision.error_count > 0 {
        eprintln!(
            "Warning: generated despite {} validation error(s).",
            summary.decision.error_count
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("File"),
        header_cell("Bytes"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for artifact in &summary.artifacts {
        table.add_row(artifact_row(artifact));
    }
    println!("{table}");

    let failures: Vec<&str> = summary
        .artifacts
        .iter()
        .filter_map(|artifact| artifact.error.as_deref())
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for error in failures {
            eprintln!("- {error}");
        }
    }
}

fn artifact_row(artifact: &ArtifactResult) -> Vec<Cell> {
    let target = Cell::new(artifact.target)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold);
    match &artifact.path {
        Some(path) => vec![
            target,
            Cell::new(path.display()),
            Cell::new(artifact.bytes),
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ],
        None => vec![
            target,
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("FAILED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ],
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Cyan),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

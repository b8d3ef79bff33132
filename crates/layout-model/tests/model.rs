//! Tests for layout-model tables and lookups.

use layout_model::{
    DefaultValueDefinition, ModelError, Sections, Table, TableSet, normalize_key,
};
use proptest::prelude::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn layout_table() -> Table {
    let headers = strings(&["Entrada", "Nome", "PosIni", "Tamanho", "Persistencia"]);
    Table::from_rows(
        "Campos Entrada",
        headers,
        None,
        vec![
            (2, strings(&["S", "C", "7", "1", "S"])),
            (3, strings(&["S", "A", "1", "3", "N"])),
            (4, strings(&["", "", "", "", ""])),
            (5, strings(&["N", "OFF", "4", "2", "S"])),
            (6, strings(&["S", "", "9", "9", ""])),
            (7, strings(&["S", "B", "4", "2", ""])),
            (8, strings(&["S", "NOPOS", "", "5", "S"])),
        ],
    )
}

#[test]
fn from_rows_keeps_unnamed_rows_and_drops_blank_ones() {
    let table = layout_table();
    assert_eq!(table.records.len(), 5);
    assert_eq!(table.rows.len(), 6);
    assert_eq!(table.records[0].row, 2);
}

#[test]
fn active_positioned_sorts_by_start() {
    let table = layout_table();
    let names: Vec<&str> = table
        .active_positioned()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(table.layout_size(), 6);
}

#[test]
fn ties_keep_source_order() {
    let headers = strings(&["Nome", "PosIni", "Tamanho"]);
    let table = Table::from_rows(
        "T",
        headers,
        None,
        vec![
            (1, strings(&["Y", "1", "1"])),
            (2, strings(&["X", "1", "1"])),
        ],
    );
    let names: Vec<&str> = table
        .active_positioned()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Y", "X"]);
}

#[test]
fn flagged_preserves_source_order() {
    let table = layout_table();
    let names: Vec<&str> = table
        .flagged(&["Persistencia"])
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["C", "OFF", "NOPOS"]);
}

#[test]
fn table_set_lookup_is_normalized() {
    let mut set = TableSet::new();
    set.insert(layout_table());
    set.insert(Table::new("Valores Padrão", strings(&["Nome", "Valor"])));
    assert!(set.get("campos_entrada").is_some());
    assert!(set.get("VALORES PADRAO").is_some());
    assert!(set.find(&["missing", "Campos-Entrada"]).is_some());
    assert_eq!(
        set.require("Nope"),
        Err(ModelError::UnknownTable {
            name: "Nope".to_string()
        })
    );
    assert!(set.require_layout("Nope").is_err());
}

#[test]
fn single_table_is_the_layout() {
    let set: TableSet = std::iter::once(layout_table()).collect();
    let table = set.require_layout("Anything").expect("layout");
    assert_eq!(table.name, "Campos Entrada");
}

#[test]
fn missing_name_column_is_reported() {
    let table = Table::new("SQL", strings(&["Sql"]));
    assert_eq!(
        table.ensure_field_columns(),
        Err(ModelError::MissingNameColumn {
            table: "SQL".to_string()
        })
    );
    assert!(layout_table().ensure_field_columns().is_ok());
}

#[test]
fn default_values_from_any_table() {
    let table = Table::from_rows(
        "Valores Padrao",
        strings(&["Atributo", "Valor", "Tipo"]),
        None,
        vec![
            (2, strings(&["PAIS", "BR", "TEXT"])),
            (3, strings(&["", "X", ""])),
        ],
    );
    let defaults = DefaultValueDefinition::from_table(&table);
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].name, "PAIS");
    assert_eq!(defaults[0].value, "BR");
    assert_eq!(defaults[0].value_type, "TEXT");
}

#[test]
fn sections_drive_routing_flags() {
    let headers = strings(&["Nome", "Audit", "Mascara"]);
    let sections = Sections::from_metadata_row(&strings(&["Comum", "Flags", "Input"]), &headers);
    let table = Table::from_rows(
        "Fields Input",
        headers,
        sections,
        vec![(3, strings(&["A", "S", "99"]))],
    );
    assert!(table.records[0].flag("audit"));
    assert!(!table.records[0].flag("mascara"));
}

proptest! {
    #[test]
    fn normalize_key_is_idempotent(raw in "[ A-Za-z0-9.+-]{0,12}") {
        let once = normalize_key(&raw);
        prop_assert_eq!(normalize_key(&once), once.clone());
    }

    #[test]
    fn integral_forms_share_a_key(n in 0u32..100_000, zeros in 0usize..3) {
        let padded = format!("{}{}", "0".repeat(zeros), n);
        prop_assert_eq!(normalize_key(&padded), n.to_string());
        prop_assert_eq!(normalize_key(&format!("{n}.0")), n.to_string());
    }
}

//! Property tests for the positional encoder.

use layout_encode::{PositionalEncoder, encode, encode_raw, render_record};
use layout_model::{Alignment, FieldRecord, FieldType, Table};
use proptest::prelude::*;

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Unspecified),
        Just(Alignment::BlankLeft),
        Just(Alignment::BlankRight),
        Just(Alignment::ZeroLeft),
        Just(Alignment::ZeroRight),
        Just(Alignment::Other("CENTER".to_string())),
    ]
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::Text),
        Just(FieldType::Integer),
        Just(FieldType::Decimal),
        Just(FieldType::Date),
        Just(FieldType::Other("NUMBER".to_string())),
    ]
}

proptest! {
    #[test]
    fn output_has_exact_size(
        value in "\\PC{0,20}",
        size in 1usize..32,
        alignment in alignment(),
        field_type in field_type(),
    ) {
        let out = encode(&value, size, &alignment, &field_type);
        prop_assert_eq!(out.chars().count(), size);
    }

    #[test]
    fn zero_left_round_trip(value in "[1-9][0-9]{0,6}", extra in 1usize..6) {
        let size = value.len() + extra;
        let out = encode_raw(&value, size, "LEFT_ZERO", "INTEGER");
        prop_assert_eq!(out.trim_start_matches('0'), value.as_str());
    }

    #[test]
    fn short_values_are_preserved(value in "[A-Z]{1,8}", extra in 0usize..4) {
        let size = value.len() + extra;
        let out = encode_raw(&value, size, "", "TEXT");
        prop_assert!(out.starts_with(&value));
        prop_assert_eq!(out.trim_end(), value.as_str());
    }
}

#[test]
fn default_encoder_matches_free_function() {
    let encoder = PositionalEncoder::default();
    assert_eq!(
        encoder.encode("9", 3, &Alignment::Unspecified, &FieldType::LongInteger),
        encode("9", 3, &Alignment::Unspecified, &FieldType::LongInteger)
    );
}

#[test]
fn record_line_length_matches_last_end() {
    let mut table = Table::new("Campos Entrada", vec![]);
    table.push_record(FieldRecord::new("A").with_position(1, 3).with_value("X"));
    table.push_record(FieldRecord::new("B").with_position(4, 2).with_value("Y"));
    table.push_record(FieldRecord::new("C").with_position(7, 1).with_value("Z"));
    let line = render_record(&table);
    assert_eq!(line, "X  Y  Z");
    assert_eq!(line.len(), 7);
}

//! Field type and alignment vocabularies.
//!
//! Source layouts use either English tags (`INTEGER`, `LEFT_ZERO`) or the
//! Portuguese tags of the original spreadsheets (`INTEIRO`, `ZERO_ESQUERDA`).
//! Both parse to the same variants; unrecognized text is kept verbatim so it
//! can still be reported and serialized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    LongInteger,
    Decimal,
    Date,
    DateTime,
    Time,
    Boolean,
    /// A type tag outside the known vocabulary, kept uppercased.
    Other(String),
}

impl FieldType {
    /// Parses a type tag. Empty text is `Text`; unknown tags become `Other`.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "" | "TEXT" | "TEXTO" => FieldType::Text,
            "INTEGER" | "INTEIRO" => FieldType::Integer,
            "LONG_INTEGER" | "INTEIRO_LONGO" => FieldType::LongInteger,
            "DECIMAL" => FieldType::Decimal,
            "DATE" | "DATA" => FieldType::Date,
            "DATETIME" | "DATE_TIME" | "DATA_HORA" => FieldType::DateTime,
            "TIME" | "HORA" => FieldType::Time,
            "BOOLEAN" | "BOOLEANO" => FieldType::Boolean,
            _ => FieldType::Other(normalized),
        }
    }

    /// Canonical English tag.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Integer => "INTEGER",
            FieldType::LongInteger => "LONG_INTEGER",
            FieldType::Decimal => "DECIMAL",
            FieldType::Date => "DATE",
            FieldType::DateTime => "DATETIME",
            FieldType::Time => "TIME",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Other(name) => name,
        }
    }

    /// Numeric-like types default to zero padding on the left.
    ///
    /// Any unknown tag mentioning "number" (or the Portuguese "numero")
    /// counts as numeric too.
    pub fn is_numeric(&self) -> bool {
        match self {
            FieldType::Integer | FieldType::LongInteger | FieldType::Decimal => true,
            FieldType::Other(name) => name.contains("NUMBER") || name.contains("NUMERO"),
            _ => false,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            FieldType::Date | FieldType::DateTime | FieldType::Time
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        FieldType::parse(value)
    }
}

/// Padding rule applied when a value is shorter than its slot.
///
/// Variants are named by where the padding goes: `BlankLeft` puts spaces
/// before the value (right-justified text), `ZeroLeft` puts zeros before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// No alignment declared; the encoder infers one from the field type.
    #[default]
    Unspecified,
    BlankLeft,
    BlankRight,
    ZeroLeft,
    ZeroRight,
    /// An alignment tag outside the known vocabulary, kept uppercased.
    Other(String),
}

impl Alignment {
    /// Parses an alignment tag.
    ///
    /// The Portuguese tags describe the side the text sticks to, so
    /// `BRANCO_ESQUERDA` (text on the left) pads blanks on the right.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "" => Alignment::Unspecified,
            "LEFT_BLANK" | "BLANK_LEFT" | "BRANCO_DIREITA" => Alignment::BlankLeft,
            "RIGHT_BLANK" | "BLANK_RIGHT" | "BRANCO_ESQUERDA" => Alignment::BlankRight,
            "LEFT_ZERO" | "ZERO_LEFT" | "ZERO_ESQUERDA" => Alignment::ZeroLeft,
            "RIGHT_ZERO" | "ZERO_RIGHT" | "ZERO_DIREITA" => Alignment::ZeroRight,
            _ => Alignment::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Alignment::Unspecified => "",
            Alignment::BlankLeft => "LEFT_BLANK",
            Alignment::BlankRight => "RIGHT_BLANK",
            Alignment::ZeroLeft => "LEFT_ZERO",
            Alignment::ZeroRight => "RIGHT_ZERO",
            Alignment::Other(name) => name,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Alignment::Unspecified)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Alignment {
    fn from(value: &str) -> Self {
        Alignment::parse(value)
    }
}

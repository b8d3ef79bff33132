//! Fixed-width slot encoding.

use layout_model::{Alignment, FieldType};

/// What happens when a value is longer than its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the first `size` characters and drop the rest, silently.
    #[default]
    Clamp,
}

/// How a missing alignment is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Numeric-like types pad zeros on the left, everything else pads
    /// blanks on the right.
    #[default]
    InferFromType,
}

/// Concrete padding applied to a short value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    BlankLeft,
    BlankRight,
    ZeroLeft,
    ZeroRight,
}

impl Padding {
    #[must_use]
    pub const fn fill(self) -> char {
        match self {
            Self::BlankLeft | Self::BlankRight => ' ',
            Self::ZeroLeft | Self::ZeroRight => '0',
        }
    }

    #[must_use]
    pub const fn pads_left(self) -> bool {
        matches!(self, Self::BlankLeft | Self::ZeroLeft)
    }
}

/// Encodes values into fixed-width slots under explicit policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionalEncoder {
    pub overflow: OverflowPolicy,
    pub alignment: AlignmentPolicy,
}

impl PositionalEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the padding for a declared alignment and field type.
    #[must_use]
    pub fn padding(&self, alignment: &Alignment, field_type: &FieldType) -> Padding {
        match alignment {
            Alignment::BlankLeft => Padding::BlankLeft,
            Alignment::BlankRight => Padding::BlankRight,
            Alignment::ZeroLeft => Padding::ZeroLeft,
            Alignment::ZeroRight => Padding::ZeroRight,
            Alignment::Unspecified => match self.alignment {
                AlignmentPolicy::InferFromType if field_type.is_numeric() => Padding::ZeroLeft,
                AlignmentPolicy::InferFromType => Padding::BlankRight,
            },
            Alignment::Other(_) => Padding::BlankRight,
        }
    }

    /// Renders `value` into exactly `size` characters.
    ///
    /// Length is counted in characters, not bytes.
    #[must_use]
    pub fn encode(
        &self,
        value: &str,
        size: usize,
        alignment: &Alignment,
        field_type: &FieldType,
    ) -> String {
        let len = value.chars().count();
        if len > size {
            return match self.overflow {
                OverflowPolicy::Clamp => {
                    tracing::debug!(length = len, size, "value clamped to slot");
                    value.chars().take(size).collect()
                }
            };
        }
        if len == size {
            return value.to_string();
        }

        let padding = self.padding(alignment, field_type);
        let fill = std::iter::repeat_n(padding.fill(), size - len);
        let mut out = String::with_capacity(value.len() + (size - len));
        if padding.pads_left() {
            out.extend(fill);
            out.push_str(value);
        } else {
            out.push_str(value);
            out.extend(fill);
        }
        out
    }
}

/// Encodes with the default policies.
#[must_use]
pub fn encode(value: &str, size: usize, alignment: &Alignment, field_type: &FieldType) -> String {
    PositionalEncoder::default().encode(value, size, alignment, field_type)
}

/// Encodes with alignment and type given as source tags.
#[must_use]
pub fn encode_raw(value: &str, size: usize, alignment: &str, field_type: &str) -> String {
    encode(
        value,
        size,
        &Alignment::parse(alignment),
        &FieldType::parse(field_type),
    )
}

//! Fixed-width positional encoding.
//!
//! [`encode`] renders one value into a slot of a given size using the
//! field's alignment, or an alignment inferred from its type.
//! [`render_record`] lays out every active positioned field of a table
//! into one line.
//!
//! ```
//! use layout_encode::encode_raw;
//!
//! assert_eq!(encode_raw("7", 4, "ZERO_ESQUERDA", "INTEIRO"), "0007");
//! assert_eq!(encode_raw("AB", 4, "", "TEXTO"), "AB  ");
//! ```

mod encoder;
mod record;

pub use encoder::{
    AlignmentPolicy, OverflowPolicy, Padding, PositionalEncoder, encode, encode_raw,
};
pub use record::{render_fields, render_record};

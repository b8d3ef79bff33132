//! Field layout data model.
//!
//! A layout is a table of field records, each carrying a position, a size,
//! type and alignment tags, routing flags and the full original row.

pub mod aliases;
pub mod columns;
pub mod edit;
pub mod enums;
pub mod error;
pub mod field;
pub mod keys;
pub mod metadata;
pub mod sections;
pub mod table;

pub use columns::{RawColumns, RoutingFlags, is_truthy};
pub use edit::{CopyOutcome, DuplicatePolicy};
pub use enums::{Alignment, FieldType};
pub use error::{ModelError, Result};
pub use field::{FieldRecord, MAX_RECORD_WIDTH};
pub use keys::{canonical_id, fold_accents, header_matches, normalize_header_key, normalize_key};
pub use metadata::{DefaultValueDefinition, ExternalMetadata};
pub use sections::{Section, SectionKind, Sections};
pub use table::{Table, TableSet};

//! Artifact generation from field layout tables.
//!
//! Every output is produced by a [`TargetGenerator`] reading one
//! [`GenerationContext`]:
//!
//! - **fixed-layout**: XML with each positioned field and its encoded slot
//! - **record**: the flat fixed-width record line
//! - **persistence**: XML describing the persisted columns
//! - **attribute-map**: namespaced XML grouping attributes by origin
//! - **enrichment**: XML access blocks with joined keys and return fields
//! - **sql**: column-metadata inserts, or literal SQL lines
//!
//! [`generate_all`] runs several targets and reports failures per target.

mod attribute_map;
mod common;
mod enrichment;
mod error;
mod fixed_layout;
mod generate;
mod join;
mod options;
mod persistence;
mod sections;
mod sql;
mod target;

pub use attribute_map::{AttributeMapGenerator, DEFAULT_ORIGIN, group_by_origin};
pub use common::cdata_pieces;
pub use enrichment::{EnrichmentGenerator, access_key};
pub use error::{GenerateError, GenerateErrorKind, Result};
pub use fixed_layout::{FixedLayoutGenerator, RecordGenerator};
pub use generate::{
    GenerationContext, TargetGenerator, TargetOutput, generate, generate_all, generator_for,
};
pub use join::JoinIndex;
pub use options::{ATTRIBUTE_MAP_NS, GenerationOptions, TableNamePolicy};
pub use persistence::PersistenceGenerator;
pub use sections::{
    ElementNames, PositionPart, ResolvedColumns, derive_element_names, position_part,
    resolve_columns, sanitize_tag,
};
pub use sql::{ColumnShape, DbType, SqlGenerator, quote};
pub use target::Target;

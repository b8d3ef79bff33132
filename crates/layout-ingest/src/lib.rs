//! CSV ingestion for field layouts.
//!
//! Stands in for the spreadsheet reader: each CSV file is one sheet, the
//! header row is located by its field-name column, and an optional row above
//! it labels column sections.

pub mod csv_table;
pub mod discovery;
pub mod error;
pub mod metadata;

pub use csv_table::{
    CsvRows, HEADER_SCAN_ROWS, detect_header_row, read_csv_rows, read_layout_table,
    read_layout_table_named, table_from_rows, write_table_csv,
};
pub use discovery::{LoadedInput, is_metadata_file, list_csv_files, load_input};
pub use error::{IngestError, Result};
pub use metadata::load_metadata;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("table not found: {name}")]
    UnknownTable { name: String },
    #[error("table {table} has no field name column")]
    MissingNameColumn { table: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

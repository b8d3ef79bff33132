use thiserror::Error;

use layout_model::ModelError;

use crate::target::Target;

/// Failure of one target, tagged with the target it belongs to.
#[derive(Debug, Error)]
#[error("[{target}] {kind}")]
pub struct GenerateError {
    pub target: Target,
    pub kind: GenerateErrorKind,
}

impl GenerateError {
    pub fn new(target: Target, kind: GenerateErrorKind) -> Self {
        Self { target, kind }
    }
}

#[derive(Debug, Error)]
pub enum GenerateErrorKind {
    #[error("primary table not found: {name}")]
    MissingPrimaryTable { name: String },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

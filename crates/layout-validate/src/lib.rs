mod report;
mod validator;

pub use report::{CheckKind, Issue, Severity, ValidationReport};
pub use validator::{
    ErrorPolicy, LayoutValidator, ValidateOptions, recalculate_positions, validate_layout,
};

/// Outcome of applying an [`ErrorPolicy`] to a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatingDecision {
    pub block_generation: bool,
    pub error_count: usize,
}

/// Decides whether generation may proceed after validation.
///
/// Under [`ErrorPolicy::Advisory`] generation always proceeds; the error
/// count is still returned so the caller can ask for confirmation.
pub fn gate_generation(report: &ValidationReport, policy: ErrorPolicy) -> GatingDecision {
    let error_count = report.error_count();
    GatingDecision {
        block_generation: policy == ErrorPolicy::Block && error_count > 0,
        error_count,
    }
}

use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

/// Failure taxonomy for a single decision-table evaluation.
///
/// Each variant corresponds to one of the kinds in the evaluation core's
/// error design: the expression engine failed, an input entry evaluated
/// to something other than a boolean, or a hit policy's own invariant was
/// violated by the matched rules. `Uvs` is the escape hatch for failures
/// that don't originate in this crate (e.g. a caller-supplied context
/// that is malformed in some way the core doesn't name explicitly).
#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum DmnReason {
    #[error("expression evaluation failed: {0}")]
    ExpressionFailure(String),
    #[error("input entry evaluated to a non-boolean value: {0}")]
    InputEntryTypeFailure(String),
    #[error("UNIQUE hit policy violated by matching rules: {0}")]
    UniqueViolation(String),
    #[error("ANY hit policy violated by conflicting outputs: {0}")]
    AnyViolation(String),
    #[error("COLLECT numeric aggregation failed: {0}")]
    NumericAggregationFailure(String),
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for DmnReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::ExpressionFailure(_) => 3001,
            Self::InputEntryTypeFailure(_) => 3002,
            Self::UniqueViolation(_) => 3003,
            Self::AnyViolation(_) => 3004,
            Self::NumericAggregationFailure(_) => 3005,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type DmnError = StructError<DmnReason>;
pub type DmnResult<T> = Result<T, DmnError>;

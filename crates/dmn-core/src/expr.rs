//! The expression-evaluator adapter (§4.1 of the design): the thin
//! contract the core expects from whichever expression engine the
//! caller brings. Deliberately minimal — compiling, caching, and the
//! expression language itself belong to that external engine.

use crate::context::Variables;
use crate::value::Value;

/// Reported by the expression engine when it cannot produce a value for
/// a given handle and binding. Carried verbatim into
/// [`crate::error::DmnReason::ExpressionFailure`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct EngineFailure(pub String);

impl From<String> for EngineFailure {
    fn from(message: String) -> Self {
        EngineFailure(message)
    }
}

impl From<&str> for EngineFailure {
    fn from(message: &str) -> Self {
        EngineFailure(message.to_string())
    }
}

/// Adapter contract exposed by the external expression engine.
///
/// `evaluate` is deterministic with respect to its inputs: the same
/// handle and the same variable binding always produce the same value
/// or the same failure.
pub trait ExpressionEngine {
    /// Opaque, pre-parsed expression handle. Meaningful only to this
    /// engine; the core never inspects it.
    type Handle;

    fn evaluate(&self, handle: &Self::Handle, variables: &Variables) -> Result<Value, EngineFailure>;
}

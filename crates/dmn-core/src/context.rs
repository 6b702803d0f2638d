use std::collections::BTreeMap;

use crate::error::{DmnError, DmnReason, DmnResult};
use crate::value::Value;

/// Reserved binding name for the current input value during input-entry
/// evaluation (conventionally DMN's `?`).
pub const INPUT_VARIABLE: &str = "?";

/// A variable binding: name → value.
pub type Variables = BTreeMap<String, Value>;

/// Caller-supplied, read-only evaluation context.
///
/// Shared unchanged across every expression evaluation inside a single
/// table evaluation, except that input-entry evaluation augments it with
/// a scoped overlay binding [`INPUT_VARIABLE`] — see [`EvalContext::with_input`].
#[derive(Debug, Clone)]
pub struct EvalContext<H> {
    pub variables: Variables,
    pub parsed_expressions: BTreeMap<String, H>,
}

impl<H> EvalContext<H> {
    pub fn new(variables: Variables, parsed_expressions: BTreeMap<String, H>) -> Self {
        Self {
            variables,
            parsed_expressions,
        }
    }

    /// Resolve an expression's source text to its pre-parsed handle.
    pub fn handle(&self, expression: &str) -> DmnResult<&H> {
        self.parsed_expressions.get(expression).ok_or_else(|| {
            DmnError::from(DmnReason::ExpressionFailure(format!(
                "no pre-parsed expression handle for {expression:?}"
            )))
        })
    }

    /// Build the transient overlay used while evaluating one input entry:
    /// the caller's variables plus [`INPUT_VARIABLE`] bound to `value`.
    ///
    /// The overlay is a fresh copy, discarded after the single expression
    /// evaluation it was built for — it never mutates `self.variables` and
    /// never leaks into another entry or rule.
    pub fn with_input(&self, value: &Value) -> Variables {
        let mut overlay = self.variables.clone();
        overlay.insert(INPUT_VARIABLE.to_string(), value.clone());
        overlay
    }
}

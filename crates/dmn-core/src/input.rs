//! Input Evaluator (§4.1): evaluates each input expression once against
//! the caller's variable binding, producing the ordered list of input
//! values shared by every rule.

use crate::context::EvalContext;
use crate::error::{DmnError, DmnReason, DmnResult};
use crate::expr::ExpressionEngine;
use crate::model::Input;
use crate::value::Value;

/// Evaluate every input expression in declaration order.
///
/// Short-circuits on the first failing expression: remaining inputs are
/// not evaluated.
pub fn evaluate_inputs<E: ExpressionEngine>(
    inputs: &[Input],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<Vec<Value>> {
    let mut values = Vec::with_capacity(inputs.len());
    for input in inputs {
        let handle = ctx.handle(&input.expression)?;
        let value = engine.evaluate(handle, &ctx.variables).map_err(|e| {
            DmnError::from(DmnReason::ExpressionFailure(format!(
                "input '{}': {e}",
                input.expression
            )))
        })?;
        tracing::debug!(expression = %input.expression, "evaluated input");
        values.push(value);
    }
    Ok(values)
}

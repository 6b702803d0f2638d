//! Output Evaluator (§4.3) and Default-Output Evaluator (§4.4).

use std::collections::BTreeMap;

use crate::context::EvalContext;
use crate::error::{DmnError, DmnReason, DmnResult};
use crate::expr::ExpressionEngine;
use crate::model::{Output, Rule};
use crate::value::Value;

/// One rule's evaluated outputs: output name → value.
pub type OutputMap = BTreeMap<String, Value>;

/// Evaluate the output entries of each of `rules` (already narrowed per
/// hit policy — see [`crate::hit_policy`] on FIRST) into one [`OutputMap`]
/// per rule, in the same order as `rules`.
///
/// Each entry is evaluated against the unaugmented caller variable
/// binding — no input-variable injection, unlike input entries.
pub fn evaluate_outputs<E: ExpressionEngine>(
    rules: &[&Rule],
    outputs: &[Output],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<Vec<OutputMap>> {
    require_names_if_multiple(outputs)?;
    rules
        .iter()
        .map(|rule| evaluate_one_rule(rule, outputs, ctx, engine))
        .collect()
}

fn evaluate_one_rule<E: ExpressionEngine>(
    rule: &Rule,
    outputs: &[Output],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<OutputMap> {
    let mut map = OutputMap::new();
    for (output, entry) in outputs.iter().zip(rule.output_entries.iter()) {
        let handle = ctx.handle(entry)?;
        let value = engine.evaluate(handle, &ctx.variables).map_err(|e| {
            DmnError::from(DmnReason::ExpressionFailure(format!(
                "output entry '{entry}': {e}"
            )))
        })?;
        let name = output_name(output, outputs.len())?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Default-Output Evaluator (§4.4), invoked only when no rule matched.
///
/// Evaluates each output's default-output expression (if any) against
/// the caller variables and assembles a mapping containing only the
/// outputs that declared one, then applies the same empty/single/many
/// shaping as a matched-rule mapping would.
pub fn evaluate_defaults<E: ExpressionEngine>(
    outputs: &[Output],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<OutputMap> {
    require_names_if_multiple(outputs)?;
    let mut map = OutputMap::new();
    for output in outputs {
        let Some(default_expr) = &output.default_value else {
            continue;
        };
        let handle = ctx.handle(default_expr)?;
        let value = engine.evaluate(handle, &ctx.variables).map_err(|e| {
            DmnError::from(DmnReason::ExpressionFailure(format!(
                "default output '{default_expr}': {e}"
            )))
        })?;
        let name = output_name(output, outputs.len())?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Resolve the key an output's value is stored under. A single-output
/// table may omit the name; a multi-output table may not — that case is
/// rejected by [`require_names_if_multiple`] before this is reached, so
/// this only has to synthesize a name for the single-output, unnamed case.
pub(crate) fn output_name(output: &Output, output_count: usize) -> DmnResult<String> {
    match &output.name {
        Some(name) => Ok(name.clone()),
        None if output_count == 1 => Ok(String::new()),
        None => Err(DmnError::from(DmnReason::ExpressionFailure(
            "output name is required when a table declares more than one output".to_string(),
        ))),
    }
}

fn require_names_if_multiple(outputs: &[Output]) -> DmnResult<()> {
    if outputs.len() > 1 && outputs.iter().any(|o| o.name.is_none()) {
        return Err(DmnError::from(DmnReason::ExpressionFailure(
            "every output must be named when a table declares more than one output".to_string(),
        )));
    }
    Ok(())
}

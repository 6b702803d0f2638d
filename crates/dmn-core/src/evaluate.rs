//! The single public entry point: wires the Input Evaluator, Rule
//! Matcher, Hit-Policy Combinator, and Default-Output Evaluator together
//! in the order data flows per the design's system overview —
//! `inputs → input values → matched rules → (rule outputs | defaults) → shaped result`.

use crate::context::EvalContext;
use crate::error::DmnResult;
use crate::expr::ExpressionEngine;
use crate::hit_policy;
use crate::input::evaluate_inputs;
use crate::model::DecisionTable;
use crate::output::evaluate_defaults;
use crate::rule_matcher::matching_rules;
use crate::shape::{self, EvalOutcome};

/// Evaluate a decision table against `ctx` using `engine`.
///
/// Returns [`EvalOutcome::Absent`] when no rule matched and no output
/// declared a default; otherwise a scalar, a mapping, or a sequence per
/// the table's hit policy. Returns `Err` on the first expression or
/// hit-policy failure.
#[tracing::instrument(name = "dmn.evaluate", skip_all, fields(inputs = table.inputs.len(), rules = table.rules.len()))]
pub fn evaluate<E: ExpressionEngine>(
    table: &DecisionTable,
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<EvalOutcome> {
    let input_values = evaluate_inputs(&table.inputs, ctx, engine)?;
    let matched = matching_rules(&table.rules, &input_values, ctx, engine)?;
    tracing::debug!(matched = matched.len(), total = table.rules.len(), "rule matching complete");

    if matched.is_empty() {
        let defaults = evaluate_defaults(&table.outputs, ctx, engine)?;
        return Ok(shape::shape_default(defaults));
    }

    hit_policy::combine(table, &matched, ctx, engine)
}

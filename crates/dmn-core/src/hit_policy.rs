//! Hit-Policy Combinator (§4.6): narrows the matched-rule set for FIRST,
//! evaluates that set's outputs, then reduces according to the table's
//! declared hit policy. Invoked only when at least one rule matched —
//! the no-match path goes through [`crate::output::evaluate_defaults`]
//! instead.

use crate::context::EvalContext;
use crate::error::{DmnError, DmnReason, DmnResult};
use crate::expr::ExpressionEngine;
use crate::model::{Aggregator, DecisionTable, HitPolicy, Rule};
use crate::output::{OutputMap, evaluate_outputs, output_name};
use crate::shape::{self, EvalOutcome};
use crate::value::{Value, value_to_display_string, values_equal};

#[tracing::instrument(name = "dmn.hit_policy", skip_all, fields(policy = ?table.hit_policy, matched = matched.len()))]
pub fn combine<E: ExpressionEngine>(
    table: &DecisionTable,
    matched: &[usize],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<EvalOutcome> {
    debug_assert!(!matched.is_empty(), "combine is only called with a match");

    match table.hit_policy {
        HitPolicy::First => {
            let rules = select(table, &matched[..1]);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            Ok(shape::single(maps))
        }
        HitPolicy::Unique => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            if maps.len() > 1 {
                return Err(unique_violation(&maps));
            }
            Ok(shape::single(maps))
        }
        HitPolicy::Any => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            let distinct = dedup(&maps);
            if distinct.len() > 1 {
                return Err(any_violation(&distinct));
            }
            Ok(shape::single(maps))
        }
        HitPolicy::Priority => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            let sorted = sort_by_priority(table, maps)?;
            Ok(shape::single(sorted))
        }
        HitPolicy::OutputOrder => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            let sorted = sort_by_priority(table, maps)?;
            Ok(shape::multiple(sorted))
        }
        HitPolicy::RuleOrder => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            Ok(shape::multiple(maps))
        }
        HitPolicy::Collect => collect(table, matched, ctx, engine),
    }
}

fn select<'a>(table: &'a DecisionTable, indices: &[usize]) -> Vec<&'a Rule> {
    indices.iter().map(|&i| &table.rules[i]).collect()
}

fn collect<E: ExpressionEngine>(
    table: &DecisionTable,
    matched: &[usize],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<EvalOutcome> {
    match table.aggregator {
        Some(Aggregator::Count) => Ok(EvalOutcome::Scalar(Value::Number(matched.len() as f64))),
        Some(agg @ (Aggregator::Min | Aggregator::Max | Aggregator::Sum)) => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            let numbers = numeric_outputs(&maps)?;
            Ok(EvalOutcome::Scalar(Value::Number(aggregate(agg, &numbers))))
        }
        None => {
            let rules = select(table, matched);
            let maps = evaluate_outputs(&rules, &table.outputs, ctx, engine)?;
            Ok(shape::multiple(maps))
        }
    }
}

fn aggregate(agg: Aggregator, numbers: &[f64]) -> f64 {
    match agg {
        Aggregator::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregator::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregator::Sum => numbers.iter().sum(),
        Aggregator::Count => numbers.len() as f64,
    }
}

fn numeric_outputs(maps: &[OutputMap]) -> DmnResult<Vec<f64>> {
    maps.iter()
        .map(|map| {
            if map.len() != 1 {
                return Err(DmnError::from(DmnReason::NumericAggregationFailure(
                    format!(
                        "COLLECT aggregation requires exactly one output per rule, found {}",
                        map.len()
                    ),
                )));
            }
            let (name, value) = map.iter().next().expect("len checked above");
            value.as_number().ok_or_else(|| {
                DmnError::from(DmnReason::NumericAggregationFailure(format!(
                    "output '{name}' is not numeric: {}",
                    value_to_display_string(value)
                )))
            })
        })
        .collect()
}

fn dedup(maps: &[OutputMap]) -> Vec<OutputMap> {
    let mut distinct: Vec<OutputMap> = Vec::new();
    for map in maps {
        if !distinct.iter().any(|d| d == map) {
            distinct.push(map.clone());
        }
    }
    distinct
}

fn unique_violation(maps: &[OutputMap]) -> DmnError {
    DmnError::from(DmnReason::UniqueViolation(describe_maps(maps)))
}

fn any_violation(maps: &[OutputMap]) -> DmnError {
    DmnError::from(DmnReason::AnyViolation(describe_maps(maps)))
}

fn describe_maps(maps: &[OutputMap]) -> String {
    maps.iter()
        .map(|m| {
            let parts: Vec<String> = m
                .iter()
                .map(|(k, v)| format!("{k}={}", value_to_display_string(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Sort matched-rule output mappings by priority (§4.6, §9).
///
/// For each output, its declared priority list assigns each listed value
/// a 0-based position. Per rule, the sort key is the *concatenation* (not
/// a tuple) of each output's position rendered as a decimal string — the
/// empty string when the rule's value for that output isn't in the list.
/// This is an intentional legacy quirk: unlisted values sort before any
/// listed value because `""` precedes any digit lexicographically, and
/// multi-digit positions can interleave non-intuitively with neighboring
/// fields. Reproduced here exactly rather than "fixed", to stay
/// compatible with decision models authored against this behavior. A
/// stable sort preserves original rule order for equal keys.
fn sort_by_priority(table: &DecisionTable, maps: Vec<OutputMap>) -> DmnResult<Vec<OutputMap>> {
    let mut keyed: Vec<(String, OutputMap)> = maps
        .into_iter()
        .map(|map| {
            let key = priority_key(table, &map)?;
            Ok((key, map))
        })
        .collect::<DmnResult<_>>()?;
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(keyed.into_iter().map(|(_, map)| map).collect())
}

fn priority_key(table: &DecisionTable, map: &OutputMap) -> DmnResult<String> {
    let mut key = String::new();
    for output in &table.outputs {
        let name = output_name(output, table.outputs.len())?;
        let Some(value) = map.get(&name) else {
            continue;
        };
        if let Some(position) = output
            .priorities
            .iter()
            .position(|listed| values_equal(listed, value))
        {
            key.push_str(&position.to_string());
        }
    }
    Ok(key)
}

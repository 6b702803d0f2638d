//! Rule Matcher (§4.2): evaluates each rule's input entries against the
//! input values using the reserved input-variable binding, returning the
//! ordered indices of the rules that matched.

use crate::context::EvalContext;
use crate::error::{DmnError, DmnReason, DmnResult};
use crate::expr::ExpressionEngine;
use crate::model::Rule;
use crate::value::{Value, value_to_display_string};

/// Returns the indices (into `rules`, declaration order) of every rule
/// whose input entries all evaluated to boolean `true`.
pub fn matching_rules<E: ExpressionEngine>(
    rules: &[Rule],
    input_values: &[Value],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<Vec<usize>> {
    let mut matched = Vec::new();
    for (index, rule) in rules.iter().enumerate() {
        if rule_matches(rule, input_values, ctx, engine)? {
            matched.push(index);
        }
    }
    Ok(matched)
}

/// Evaluate one rule's input entries left-to-right, short-circuiting on
/// the first `false`. An empty entry list (a table with zero inputs)
/// matches vacuously.
fn rule_matches<E: ExpressionEngine>(
    rule: &Rule,
    input_values: &[Value],
    ctx: &EvalContext<E::Handle>,
    engine: &E,
) -> DmnResult<bool> {
    for (entry, input_value) in rule.input_entries.iter().zip(input_values.iter()) {
        let handle = ctx.handle(entry)?;
        let overlay = ctx.with_input(input_value);
        let result = engine.evaluate(handle, &overlay).map_err(|e| {
            DmnError::from(DmnReason::ExpressionFailure(format!(
                "input entry '{entry}': {e}"
            )))
        })?;
        match result.as_bool() {
            Some(true) => continue,
            Some(false) => return Ok(false),
            None => {
                return Err(DmnError::from(DmnReason::InputEntryTypeFailure(format!(
                    "entry '{entry}' evaluated to {}",
                    value_to_display_string(&result)
                ))));
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::context::Variables;

    /// Every handle is the constant value it evaluates to, ignoring
    /// whatever overlay the caller built — enough to exercise matching
    /// without a real expression language.
    struct ConstEngine;

    impl ExpressionEngine for ConstEngine {
        type Handle = Value;

        fn evaluate(
            &self,
            handle: &Value,
            _variables: &Variables,
        ) -> Result<Value, crate::expr::EngineFailure> {
            Ok(handle.clone())
        }
    }

    fn rule(entries: Vec<&str>) -> Rule {
        Rule {
            input_entries: entries.into_iter().map(String::from).collect(),
            output_entries: vec![],
        }
    }

    fn ctx(handles: &[(&str, Value)]) -> EvalContext<Value> {
        let parsed: BTreeMap<String, Value> = handles
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        EvalContext::new(Variables::new(), parsed)
    }

    #[test]
    fn empty_entry_list_matches_vacuously() {
        let rules = vec![rule(vec![])];
        let ctx = ctx(&[]);
        let matched = matching_rules(&rules, &[], &ctx, &ConstEngine).unwrap();
        assert_eq!(matched, vec![0]);
    }

    #[test]
    fn short_circuits_on_first_false_entry() {
        let rules = vec![rule(vec!["always_false", "would_error_if_evaluated"])];
        let ctx = ctx(&[("always_false", Value::Bool(false))]);
        // `would_error_if_evaluated` has no registered handle; if the
        // matcher evaluated it, `ctx.handle` would return an error.
        let matched = matching_rules(&rules, &[Value::Null, Value::Null], &ctx, &ConstEngine).unwrap();
        assert!(matched.is_empty());
    }

    #[test]
    fn non_boolean_entry_is_a_type_failure() {
        let rules = vec![rule(vec!["not_a_bool"])];
        let ctx = ctx(&[("not_a_bool", Value::Number(1.0))]);
        let err = matching_rules(&rules, &[Value::Null], &ctx, &ConstEngine).unwrap_err();
        assert!(err.to_string().contains("non-boolean"));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let rules = vec![
            rule(vec!["t"]),
            rule(vec!["f"]),
            rule(vec!["t"]),
        ];
        let ctx = ctx(&[("t", Value::Bool(true)), ("f", Value::Bool(false))]);
        let input_values = vec![Value::Null];
        let matched = matching_rules(&rules, &input_values, &ctx, &ConstEngine).unwrap();
        assert_eq!(matched, vec![0, 2]);
    }
}

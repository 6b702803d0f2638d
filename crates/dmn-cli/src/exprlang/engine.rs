//! [`dmn_core::expr::ExpressionEngine`] implementation for the demo
//! expression language: walks an [`Expr`] tree against a variable binding.

use dmn_core::context::Variables;
use dmn_core::expr::{EngineFailure, ExpressionEngine};
use dmn_core::value::{Value, value_to_display_string, values_equal};

use super::ast::{BinOp, Expr};

/// Zero-sized adapter; all state lives in the [`Expr`] handle and the
/// caller-supplied [`Variables`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprLangEngine;

impl ExpressionEngine for ExprLangEngine {
    type Handle = Expr;

    fn evaluate(&self, handle: &Expr, variables: &Variables) -> Result<Value, EngineFailure> {
        eval(handle, variables)
    }
}

fn eval(expr: &Expr, vars: &Variables) -> Result<Value, EngineFailure> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::StringLit(s) => Ok(Value::Str(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Any => Ok(Value::Bool(true)),
        Expr::Field(name) => vars
            .get(name)
            .cloned()
            .ok_or_else(|| EngineFailure(format!("unbound variable '{name}'"))),
        Expr::Neg(inner) => match eval(inner, vars)? {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(EngineFailure(format!(
                "cannot negate {}",
                value_to_display_string(&other)
            ))),
        },
        Expr::Not(inner) => match eval(inner, vars)? {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(EngineFailure(format!(
                "cannot negate non-boolean {}",
                value_to_display_string(&other)
            ))),
        },
        Expr::InList {
            expr,
            list,
            negated,
        } => {
            let needle = eval(expr, vars)?;
            let mut found = false;
            for item in list {
                if values_equal(&needle, &eval(item, vars)?) {
                    found = true;
                    break;
                }
            }
            Ok(Value::Bool(found != *negated))
        }
        Expr::BinOp { op, left, right } => eval_binop(*op, left, right, vars),
    }
}

fn eval_binop(op: BinOp, left: &Expr, right: &Expr, vars: &Variables) -> Result<Value, EngineFailure> {
    match op {
        BinOp::And => Ok(Value::Bool(as_bool(&eval(left, vars)?)? && as_bool(&eval(right, vars)?)?)),
        BinOp::Or => Ok(Value::Bool(as_bool(&eval(left, vars)?)? || as_bool(&eval(right, vars)?)?)),
        BinOp::Eq => Ok(Value::Bool(values_equal(&eval(left, vars)?, &eval(right, vars)?))),
        BinOp::Ne => Ok(Value::Bool(!values_equal(&eval(left, vars)?, &eval(right, vars)?))),
        BinOp::Lt => Ok(Value::Bool(as_num(&eval(left, vars)?)? < as_num(&eval(right, vars)?)?)),
        BinOp::Gt => Ok(Value::Bool(as_num(&eval(left, vars)?)? > as_num(&eval(right, vars)?)?)),
        BinOp::Le => Ok(Value::Bool(as_num(&eval(left, vars)?)? <= as_num(&eval(right, vars)?)?)),
        BinOp::Ge => Ok(Value::Bool(as_num(&eval(left, vars)?)? >= as_num(&eval(right, vars)?)?)),
        BinOp::Add => Ok(Value::Number(as_num(&eval(left, vars)?)? + as_num(&eval(right, vars)?)?)),
        BinOp::Sub => Ok(Value::Number(as_num(&eval(left, vars)?)? - as_num(&eval(right, vars)?)?)),
        BinOp::Mul => Ok(Value::Number(as_num(&eval(left, vars)?)? * as_num(&eval(right, vars)?)?)),
        BinOp::Div => Ok(Value::Number(as_num(&eval(left, vars)?)? / as_num(&eval(right, vars)?)?)),
    }
}

fn as_num(v: &Value) -> Result<f64, EngineFailure> {
    v.as_number()
        .ok_or_else(|| EngineFailure(format!("expected a number, found {}", value_to_display_string(v))))
}

fn as_bool(v: &Value) -> Result<bool, EngineFailure> {
    v.as_bool()
        .ok_or_else(|| EngineFailure(format!("expected a boolean, found {}", value_to_display_string(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::exprlang::parse_expression;

    fn vars(entries: &[(&str, Value)]) -> Variables {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn eval_source(source: &str, vars: &Variables) -> Result<Value, EngineFailure> {
        let expr = parse_expression(source).expect("parses");
        ExprLangEngine.evaluate(&expr, vars)
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        assert_eq!(eval_source("1.5", &vars(&[])).unwrap(), Value::Number(1.5));
        assert_eq!(
            eval_source(r#""Business""#, &vars(&[])).unwrap(),
            Value::Str("Business".into())
        );
        assert_eq!(eval_source("true", &vars(&[])).unwrap(), Value::Bool(true));
        assert_eq!(eval_source("null", &vars(&[])).unwrap(), Value::Null);
        assert_eq!(eval_source("-", &vars(&[])).unwrap(), Value::Bool(true));
    }

    #[test]
    fn field_reference_resolves_against_variables() {
        let bindings = vars(&[("orderSize", Value::Number(7.0))]);
        assert_eq!(
            eval_source("orderSize", &bindings).unwrap(),
            Value::Number(7.0)
        );
    }

    #[test]
    fn unbound_field_reference_is_an_engine_failure() {
        let err = eval_source("missing", &vars(&[])).unwrap_err();
        assert!(err.to_string().contains("unbound variable"));
    }

    #[test]
    fn input_variable_resolves_to_the_reserved_binding() {
        let bindings = vars(&[("?", Value::Number(9.0))]);
        assert_eq!(eval_source("? >= 5", &bindings).unwrap(), Value::Bool(true));
        assert_eq!(eval_source("? < 5", &bindings).unwrap(), Value::Bool(false));
    }

    #[test]
    fn arithmetic_operators() {
        let bindings = vars(&[]);
        assert_eq!(eval_source("2 + 3", &bindings).unwrap(), Value::Number(5.0));
        assert_eq!(eval_source("2 * 3 + 1", &bindings).unwrap(), Value::Number(7.0));
        assert_eq!(eval_source("10 / 2 - 1", &bindings).unwrap(), Value::Number(4.0));
    }

    #[test]
    fn boolean_connectives_short_circuit_structurally_but_evaluate_both_sides() {
        let bindings = vars(&[]);
        assert_eq!(eval_source("true && false", &bindings).unwrap(), Value::Bool(false));
        assert_eq!(eval_source("true || false", &bindings).unwrap(), Value::Bool(true));
        assert_eq!(eval_source("!true", &bindings).unwrap(), Value::Bool(false));
    }

    #[test]
    fn negation_of_a_number_literal() {
        assert_eq!(eval_source("-5 + 10", &vars(&[])).unwrap(), Value::Number(5.0));
    }

    #[test]
    fn negating_a_non_boolean_is_an_engine_failure() {
        let err = eval_source("!5", &vars(&[])).unwrap_err();
        assert!(err.to_string().contains("non-boolean"));
    }

    #[test]
    fn in_list_matches_by_structural_equality() {
        let bindings = vars(&[("customer", Value::Str("Business".into()))]);
        assert_eq!(
            eval_source(r#"customer in ("Business", "Consumer")"#, &bindings).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            eval_source(r#"customer not in ("Business", "Consumer")"#, &bindings).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn comparison_requires_numeric_operands() {
        let err = eval_source(r#""a" > 1"#, &vars(&[])).unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn equality_uses_structural_equality_across_value_kinds() {
        let bindings = vars(&[]);
        assert_eq!(eval_source("1 == 1", &bindings).unwrap(), Value::Bool(true));
        assert_eq!(
            eval_source(r#"1 == "1""#, &bindings).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn discount_table_example_scenario() {
        let bindings = vars(&[
            ("customer", Value::Str("Business".into())),
            ("orderSize", Value::Number(7.0)),
        ]);
        assert_eq!(
            eval_source(r#"customer == "Business""#, &bindings).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            eval_source("orderSize >= 5", &bindings).unwrap(),
            Value::Bool(true)
        );
    }
}

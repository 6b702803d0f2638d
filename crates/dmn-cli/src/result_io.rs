//! Renders a [`dmn_core::shape::EvalOutcome`] (or a [`dmn_core::error::DmnError`])
//! as the JSON the CLI prints.

use dmn_core::error::DmnError;
use dmn_core::output::OutputMap;
use dmn_core::shape::{EvalOutcome, ShapedItem};
use dmn_core::value::Value;

pub fn outcome_to_json(outcome: &EvalOutcome) -> serde_json::Value {
    match outcome {
        EvalOutcome::Absent => serde_json::Value::Null,
        EvalOutcome::Scalar(v) => value_to_json(v),
        EvalOutcome::Mapping(map) => map_to_json(map),
        EvalOutcome::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(shaped_item_to_json).collect())
        }
    }
}

fn shaped_item_to_json(item: &ShapedItem) -> serde_json::Value {
    match item {
        ShapedItem::Scalar(v) => value_to_json(v),
        ShapedItem::Mapping(map) => map_to_json(map),
    }
}

fn map_to_json(map: &OutputMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Map(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

pub fn failure_to_json(err: &DmnError) -> serde_json::Value {
    serde_json::json!({
        "error": err.to_string(),
    })
}

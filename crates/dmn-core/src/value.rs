use std::collections::BTreeMap;

/// The untyped value universe produced by the expression engine.
///
/// The core treats values opaquely except where the evaluation semantics
/// require otherwise: it inspects [`Value::Bool`] for match results,
/// [`Value::Number`] for COLLECT aggregation, and uses [`values_equal`]
/// (structural equality) for the ANY policy and for priority-list lookups.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Structural equality over the value universe.
///
/// `f64` carries no `Eq` impl, so this compares bit-for-bit via the
/// derived `PartialEq` rather than imposing numeric tolerance — the ANY
/// policy and COLLECT's distinct-value handling both want the expression
/// engine's own notion of "the same value", not fuzzy numeric comparison.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    a == b
}

pub fn value_to_display_string(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Str(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(value_to_display_string).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Map(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{k}: {}", value_to_display_string(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

//! Result Shaper (§4.5): collapses single-output mappings to a bare
//! value, leaves multi-output mappings intact, and wraps/unwraps
//! sequences per hit policy.

use crate::output::OutputMap;
use crate::value::Value;

/// The final, shaped outcome of a table evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    /// No match and no default output — the legitimate "nothing to
    /// report" outcome, distinct from a failure.
    Absent,
    Scalar(Value),
    Mapping(OutputMap),
    Sequence(Vec<ShapedItem>),
}

/// One element of a [`EvalOutcome::Sequence`]: either every element
/// collapsed to a bare value (when every rule mapping had exactly one
/// key) or none did.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapedItem {
    Scalar(Value),
    Mapping(OutputMap),
}

/// Collapse one [`OutputMap`]: a single key becomes the bare value, any
/// other key count is returned as the mapping itself.
fn shape_map(map: OutputMap) -> EvalOutcome {
    if map.len() == 1 {
        let (_, value) = map.into_iter().next().expect("len checked above");
        EvalOutcome::Scalar(value)
    } else {
        EvalOutcome::Mapping(map)
    }
}

/// `single(values)`: the first mapping in `values`, shaped; [`EvalOutcome::Absent`]
/// if `values` is empty.
pub fn single(values: Vec<OutputMap>) -> EvalOutcome {
    match values.into_iter().next() {
        Some(map) => shape_map(map),
        None => EvalOutcome::Absent,
    }
}

/// `multiple(values)`: [`EvalOutcome::Absent`] for empty input; the
/// single-output collapse for exactly one mapping; otherwise a sequence,
/// uniformly of bare values if every mapping has exactly one key,
/// otherwise uniformly of mappings.
pub fn multiple(values: Vec<OutputMap>) -> EvalOutcome {
    if values.is_empty() {
        return EvalOutcome::Absent;
    }
    if values.len() == 1 {
        return single(values);
    }
    let all_single_key = values.iter().all(|m| m.len() == 1);
    let items = values
        .into_iter()
        .map(|map| {
            if all_single_key {
                let (_, value) = map.into_iter().next().expect("len checked above");
                ShapedItem::Scalar(value)
            } else {
                ShapedItem::Mapping(map)
            }
        })
        .collect();
    EvalOutcome::Sequence(items)
}

/// Shape the default-output mapping (§4.4): empty → absent, one entry →
/// bare value, many → the full mapping. Identical collapse rule to
/// [`single`]'s per-mapping shaping, applied to the one assembled map.
pub fn shape_default(map: OutputMap) -> EvalOutcome {
    if map.is_empty() {
        EvalOutcome::Absent
    } else {
        shape_map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> OutputMap {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn single_of_empty_is_absent() {
        assert_eq!(single(vec![]), EvalOutcome::Absent);
    }

    #[test]
    fn single_takes_first_and_collapses_one_key() {
        let maps = vec![
            map(&[("discount", Value::Number(0.1))]),
            map(&[("discount", Value::Number(0.2))]),
        ];
        assert_eq!(single(maps), EvalOutcome::Scalar(Value::Number(0.1)));
    }

    #[test]
    fn single_keeps_multi_key_mapping_intact() {
        let maps = vec![map(&[
            ("discount", Value::Number(0.1)),
            ("shipping", Value::Str("Air".into())),
        ])];
        let EvalOutcome::Mapping(m) = single(maps) else {
            panic!("expected mapping");
        };
        assert_eq!(m.get("shipping"), Some(&Value::Str("Air".into())));
    }

    #[test]
    fn multiple_of_empty_is_absent() {
        assert_eq!(multiple(vec![]), EvalOutcome::Absent);
    }

    #[test]
    fn multiple_of_one_collapses_like_single() {
        let maps = vec![map(&[("a", Value::Number(1.0))])];
        assert_eq!(multiple(maps), EvalOutcome::Scalar(Value::Number(1.0)));
    }

    #[test]
    fn multiple_sequences_bare_values_when_every_mapping_has_one_key() {
        let maps = vec![
            map(&[("a", Value::Number(1.0))]),
            map(&[("a", Value::Number(2.0))]),
        ];
        let EvalOutcome::Sequence(items) = multiple(maps) else {
            panic!("expected sequence");
        };
        assert_eq!(
            items,
            vec![
                ShapedItem::Scalar(Value::Number(1.0)),
                ShapedItem::Scalar(Value::Number(2.0)),
            ]
        );
    }

    #[test]
    fn multiple_sequences_mappings_when_any_mapping_has_more_than_one_key() {
        let maps = vec![
            map(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))]),
            map(&[("a", Value::Number(3.0))]),
        ];
        let EvalOutcome::Sequence(items) = multiple(maps) else {
            panic!("expected sequence");
        };
        assert!(matches!(items[0], ShapedItem::Mapping(_)));
        assert!(matches!(items[1], ShapedItem::Mapping(_)));
    }

    #[test]
    fn shape_default_empty_is_absent() {
        assert_eq!(shape_default(OutputMap::new()), EvalOutcome::Absent);
    }
}

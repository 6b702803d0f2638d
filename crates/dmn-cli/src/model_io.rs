//! JSON-deserializable decision-table DTOs, converted into
//! [`dmn_core::model`] types. `dmn-core`'s model doesn't itself derive
//! `serde` (the parser that builds it is external per `spec.md` §1); this
//! module is the CLI's stand-in parser for the worked examples and tests.

use std::collections::BTreeMap;

use dmn_core::error::DmnResult;
use dmn_core::model::{Aggregator, DecisionTable, HitPolicy, Input, Output, Rule};
use dmn_core::value::Value;

use crate::exprlang::{Expr, parse_expression};

#[derive(Debug, serde::Deserialize)]
pub struct TableDto {
    pub inputs: Vec<InputDto>,
    pub outputs: Vec<OutputDto>,
    pub rules: Vec<RuleDto>,
    #[serde(default)]
    pub hit_policy: HitPolicyDto,
    #[serde(default)]
    pub aggregator: Option<AggregatorDto>,
}

#[derive(Debug, serde::Deserialize)]
pub struct InputDto {
    pub expression: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct OutputDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub priorities: Vec<Value>,
}

#[derive(Debug, serde::Deserialize)]
pub struct RuleDto {
    pub input_entries: Vec<String>,
    pub output_entries: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HitPolicyDto {
    #[default]
    Unique,
    First,
    Any,
    Priority,
    RuleOrder,
    OutputOrder,
    Collect,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregatorDto {
    Min,
    Max,
    Sum,
    Count,
}

impl From<HitPolicyDto> for HitPolicy {
    fn from(dto: HitPolicyDto) -> Self {
        match dto {
            HitPolicyDto::Unique => HitPolicy::Unique,
            HitPolicyDto::First => HitPolicy::First,
            HitPolicyDto::Any => HitPolicy::Any,
            HitPolicyDto::Priority => HitPolicy::Priority,
            HitPolicyDto::RuleOrder => HitPolicy::RuleOrder,
            HitPolicyDto::OutputOrder => HitPolicy::OutputOrder,
            HitPolicyDto::Collect => HitPolicy::Collect,
        }
    }
}

impl From<AggregatorDto> for Aggregator {
    fn from(dto: AggregatorDto) -> Self {
        match dto {
            AggregatorDto::Min => Aggregator::Min,
            AggregatorDto::Max => Aggregator::Max,
            AggregatorDto::Sum => Aggregator::Sum,
            AggregatorDto::Count => Aggregator::Count,
        }
    }
}

impl TableDto {
    pub fn into_model(self) -> DecisionTable {
        DecisionTable {
            inputs: self
                .inputs
                .into_iter()
                .map(|i| Input {
                    expression: i.expression,
                })
                .collect(),
            outputs: self
                .outputs
                .into_iter()
                .map(|o| Output {
                    name: o.name,
                    default_value: o.default_value,
                    priorities: o.priorities,
                })
                .collect(),
            rules: self
                .rules
                .into_iter()
                .map(|r| Rule {
                    input_entries: r.input_entries,
                    output_entries: r.output_entries,
                })
                .collect(),
            hit_policy: self.hit_policy.into(),
            aggregator: self.aggregator.map(Into::into),
        }
    }
}

/// Parse every distinct expression-text referenced by `table` with the
/// demo expression language, producing the text → handle lookup
/// [`dmn_core::context::EvalContext`] expects.
pub fn parse_table_expressions(table: &DecisionTable) -> DmnResult<BTreeMap<String, Expr>> {
    let mut texts: Vec<&str> = Vec::new();
    for input in &table.inputs {
        texts.push(&input.expression);
    }
    for output in &table.outputs {
        if let Some(default) = &output.default_value {
            texts.push(default);
        }
    }
    for rule in &table.rules {
        for entry in &rule.input_entries {
            texts.push(entry);
        }
        for entry in &rule.output_entries {
            texts.push(entry);
        }
    }

    let mut parsed = BTreeMap::new();
    for text in texts {
        if parsed.contains_key(text) {
            continue;
        }
        let expr = parse_expression(text)?;
        parsed.insert(text.to_string(), expr);
    }
    Ok(parsed)
}

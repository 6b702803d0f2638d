//! The in-memory decision-table model. Built by the external parser;
//! the core only ever reads it.
//!
//! Entries reference expressions by their source text rather than by an
//! already-resolved handle: the handle type is specific to whichever
//! [`crate::expr::ExpressionEngine`] a given evaluation uses, while the
//! table itself is produced once by the parser and may be evaluated
//! against different engines/contexts. [`crate::context::EvalContext`]
//! carries the text → handle lookup that ties the two together.

/// One input column: the source text of its input expression.
#[derive(Debug, Clone)]
pub struct Input {
    pub expression: String,
}

/// One output column.
///
/// `name` is mandatory whenever the table declares more than one output
/// (enforced by [`crate::output`], not by this type) and optional for a
/// single-output table, where the result collapses to a bare value.
#[derive(Debug, Clone)]
pub struct Output {
    pub name: Option<String>,
    pub default_value: Option<String>,
    /// Ordered preference list for PRIORITY / OUTPUT_ORDER: literal output
    /// values, most preferred first.
    pub priorities: Vec<crate::value::Value>,
}

/// One rule (table row): an input entry per [`Input`] and an output entry
/// per [`Output`], in the same order and count as the table's columns.
#[derive(Debug, Clone)]
pub struct Rule {
    pub input_entries: Vec<String>,
    pub output_entries: Vec<String>,
}

/// Hit policy governing how matched rules combine into a result.
///
/// Absent hit policy is treated as [`HitPolicy::Unique`] by whoever
/// constructs the model; this type has no "absent" variant because the
/// model is expected to resolve that default before reaching the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    #[default]
    Unique,
    First,
    Any,
    Priority,
    RuleOrder,
    OutputOrder,
    Collect,
}

/// Aggregator applied under [`HitPolicy::Collect`]. Meaningless for any
/// other policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    Min,
    Max,
    Sum,
    Count,
}

/// A complete decision table: inputs, outputs, rules, and the policy that
/// reduces matched rules into the table's result.
#[derive(Debug, Clone, Default)]
pub struct DecisionTable {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub rules: Vec<Rule>,
    pub hit_policy: HitPolicy,
    pub aggregator: Option<Aggregator>,
}

impl DecisionTable {
    pub fn single_output(&self) -> bool {
        self.outputs.len() == 1
    }
}

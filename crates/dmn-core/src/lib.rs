//! Evaluation core for DMN decision tables.
//!
//! Given a parsed [`model::DecisionTable`] and a caller-supplied
//! [`context::EvalContext`], [`evaluate::evaluate`] computes the table's
//! result: it evaluates the table's inputs, matches rules against them,
//! combines matched rules' outputs per the table's [`model::HitPolicy`],
//! and falls back to each output's default when nothing matched. Parsing
//! the DMN document and compiling/evaluating the expression language are
//! both external collaborators — see [`expr::ExpressionEngine`].

pub mod context;
pub mod error;
pub mod evaluate;
pub mod expr;
pub mod hit_policy;
pub mod input;
pub mod model;
pub mod output;
pub mod rule_matcher;
pub mod shape;
pub mod value;

pub use evaluate::evaluate;
pub use shape::EvalOutcome;

//! A small, JSON-friendly expression language the CLI uses to stand in
//! for the real FEEL/DMN expression engine (which `dmn-core` treats as an
//! external collaborator — see `dmn_core::expr::ExpressionEngine`). Only
//! covers what the CLI's worked examples need: literals, field references,
//! comparisons, boolean connectives, arithmetic, and `in` tests.

mod ast;
mod engine;
mod parse_utils;
mod parser;

pub use ast::Expr;
pub use engine::ExprLangEngine;
pub use parser::parse_expression;

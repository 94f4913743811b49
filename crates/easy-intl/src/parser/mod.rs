//! Template parser.
//!
//! Splits a template string into literal text and placeholders. Parsing is
//! total: text that does not form a placeholder is kept as a literal, so the
//! resolver can always fall back to the source text.

pub mod ast;
mod template;

pub use ast::*;
pub use template::{parse_stage, parse_template};

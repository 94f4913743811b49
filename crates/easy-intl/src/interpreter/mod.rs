//! Template resolution engine.
//!
//! This module takes parsed templates and produces finished strings. It walks
//! placeholder data paths, runs formatter pipelines against a
//! [`FormatterRegistry`], and degrades gracefully when data or formatters are
//! missing.

mod context;
mod error;
mod evaluator;
mod lint;
mod registry;
mod translator;

pub use context::ResolveContext;
pub use error::{FormatError, LoadError, ResolveWarning, compute_suggestions};
pub use evaluator::{eval_template, resolve, resolve_with_warnings};
pub use lint::{LintWarning, lint_dictionary, lint_template};
pub use registry::{FormatterFn, FormatterRegistry, RegistryEntry};
pub use translator::Translator;

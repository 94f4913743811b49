//! Static lint rules for templates.
//!
//! Analyzes parsed templates without resolving them, to catch placeholders
//! that would silently degrade at runtime: unknown formatter names, pipelines
//! that fall back to the simple form, and paths that can never resolve.

use thiserror::Error;

use crate::interpreter::FormatterRegistry;
use crate::interpreter::error::compute_suggestions;
use crate::parser::ast::{Placeholder, Template};
use crate::parser::parse_template;
use crate::store::Dictionary;

/// A problem found by static analysis of a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A pipeline stage names a formatter the registry does not have.
    #[error("{placeholder}: unknown formatter `{name}`")]
    UnknownFormatter {
        placeholder: String,
        name: String,
        suggestions: Vec<String>,
    },

    /// Looks like a pipeline but does not match the piped grammar, so the
    /// whole content is treated as a data path (e.g. a space inside the
    /// argument list).
    #[error("{placeholder}: pipeline is not recognized, placeholder will be read as a plain path")]
    MalformedPipeline { placeholder: String },

    /// A simple placeholder whose path contains an empty or non-word segment.
    #[error("{placeholder}: path can never resolve")]
    InvalidPath { placeholder: String },
}

/// Runs all lint rules over one parsed template.
pub fn lint_template(template: &Template, registry: &FormatterRegistry) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for placeholder in template.placeholders() {
        if placeholder.is_piped() {
            lint_unknown_formatters(placeholder, registry, &mut warnings);
        } else {
            lint_simple_path(placeholder, &mut warnings);
        }
    }
    warnings
}

/// Runs all lint rules over every template of a dictionary.
///
/// Results are ordered by key.
pub fn lint_dictionary(
    dictionary: &Dictionary,
    registry: &FormatterRegistry,
) -> Vec<(String, LintWarning)> {
    dictionary
        .iter()
        .flat_map(|(key, source)| {
            lint_template(&parse_template(source), registry)
                .into_iter()
                .map(move |warning| (key.clone(), warning))
        })
        .collect()
}

fn lint_unknown_formatters(
    placeholder: &Placeholder,
    registry: &FormatterRegistry,
    warnings: &mut Vec<LintWarning>,
) {
    let mut names: Option<Vec<String>> = None;
    for stage in &placeholder.pipeline {
        if registry.has_formatter(&stage.name) {
            continue;
        }
        let names = names.get_or_insert_with(|| registry.names());
        warnings.push(LintWarning::UnknownFormatter {
            placeholder: placeholder.source.clone(),
            name: stage.name.clone(),
            suggestions: compute_suggestions(&stage.name, names.as_slice()),
        });
    }
}

fn lint_simple_path(placeholder: &Placeholder, warnings: &mut Vec<LintWarning>) {
    if placeholder.source.contains("..") {
        warnings.push(LintWarning::MalformedPipeline {
            placeholder: placeholder.source.clone(),
        });
        return;
    }

    let valid = placeholder.path.iter().all(|segment| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    });
    if !valid {
        warnings.push(LintWarning::InvalidPath {
            placeholder: placeholder.source.clone(),
        });
    }
}

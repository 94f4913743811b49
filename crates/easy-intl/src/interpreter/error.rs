//! Error and warning types for resolution and loading.

use std::path::PathBuf;

use strsim::jaro_winkler;
use thiserror::Error;

/// Errors that occur while loading translation bundles.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a bundle.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or a value of the wrong shape.
    #[error("{origin}:{line}:{column}: {message}")]
    Parse {
        origin: String,
        line: usize,
        column: usize,
        message: String,
    },
}

/// An error returned by a formatter function.
///
/// The resolver never propagates these: the failing stage is skipped and the
/// previous pipeline value is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The input value is not something this formatter can format.
    #[error("expected {expected}, got '{value}'")]
    InvalidValue { expected: String, value: String },

    /// A raw string argument could not be interpreted.
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: String, reason: String },

    /// Locale data for the requested locale could not be loaded.
    #[error("no locale data for '{locale}': {message}")]
    LocaleData { locale: String, message: String },

    /// Free-form failure from a caller-supplied formatter.
    #[error("{0}")]
    Custom(String),
}

impl FormatError {
    /// Build an [`FormatError::InvalidValue`].
    pub fn invalid_value(expected: impl Into<String>, value: impl ToString) -> Self {
        FormatError::InvalidValue {
            expected: expected.into(),
            value: value.to_string(),
        }
    }

    /// Build an [`FormatError::InvalidArgument`].
    pub fn invalid_argument(arg: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::InvalidArgument {
            arg: arg.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`FormatError::LocaleData`].
    pub fn locale_data(locale: impl ToString, message: impl ToString) -> Self {
        FormatError::LocaleData {
            locale: locale.to_string(),
            message: message.to_string(),
        }
    }
}

/// A recoverable problem encountered while resolving a template.
///
/// Warnings never change the fact that resolution produces a string; they
/// describe which stages were skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveWarning {
    /// A pipeline stage names something that is not a formatter.
    #[error("Training module not found: `{name}`{}", format_suggestions(suggestions))]
    UnknownFormatter {
        name: String,
        suggestions: Vec<String>,
    },

    /// A formatter returned an error; its stage was skipped.
    #[error("formatter `{name}` failed: {message}")]
    FormatterFailed { name: String, message: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Return up to three candidates that look like `name`, best first.
///
/// Uses Jaro-Winkler similarity with a 0.8 cutoff.
pub fn compute_suggestions<S: AsRef<str>>(name: &str, candidates: &[S]) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| *candidate != name)
        .map(|candidate| (jaro_winkler(name, candidate), candidate))
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

//! Miette diagnostic wrapper for bundle parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use std::path::Path;

use easy_intl::LoadError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for malformed bundle files.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid bundle: {message}")]
#[diagnostic(code(easy_intl::bundle))]
pub struct BundleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl BundleDiagnostic {
    /// Create a diagnostic from a load error with source context.
    ///
    /// Returns `None` for errors that carry no position (I/O failures).
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Option<Self> {
        let LoadError::Parse {
            line,
            column,
            message,
            ..
        } = err
        else {
            return None;
        };

        Some(BundleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (byte_offset(content, *line, *column), 1).into(),
            message: message.clone(),
            help: Some(
                "a bundle maps scope ids to objects of string templates: \
                 {\"scope\": {\"key\": \"template\"}}"
                    .to_string(),
            ),
        })
    }
}

/// Convert a 1-based line and column to a byte offset, clamped to `content`.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use std::io::Error as IoError;

    use super::*;

    #[test]
    fn byte_offset_counts_previous_lines() {
        let content = "{\n  \"a\": 1\n}";
        assert_eq!(byte_offset(content, 1, 1), 0);
        assert_eq!(byte_offset(content, 2, 8), 9);
    }

    #[test]
    fn byte_offset_is_clamped() {
        assert_eq!(byte_offset("{}", 9, 9), 1);
        assert_eq!(byte_offset("", 1, 1), 0);
    }

    #[test]
    fn io_errors_have_no_diagnostic() {
        let err = LoadError::Io {
            path: "x.json".into(),
            source: IoError::other("gone"),
        };
        assert!(BundleDiagnostic::from_load_error(Path::new("x.json"), "", &err).is_none());
    }
}

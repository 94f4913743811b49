//! JSON translation bundles.
//!
//! A bundle maps scope ids to dictionaries:
//!
//! ```json
//! {
//!   "src/components/Header": { "welcome": "Hello {name}" },
//!   "src/components/Cart": { "total": "Total: {sum..currency(EUR)}" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Error as JsonError;

use crate::interpreter::LoadError;
use crate::store::Dictionary;

/// Scope id to dictionary, as read from a bundle file.
pub type Bundle = BTreeMap<String, Dictionary>;

/// Parse a bundle from JSON. `origin` names the source in error messages.
pub fn parse_bundle(origin: &str, json: &str) -> Result<Bundle, LoadError> {
    serde_json::from_str(json).map_err(|e| parse_error(origin, &e))
}

/// Parse a single dictionary (`{ key: template }`) from JSON.
pub fn parse_dictionary(origin: &str, json: &str) -> Result<Dictionary, LoadError> {
    serde_json::from_str(json).map_err(|e| parse_error(origin, &e))
}

/// Read and parse a bundle file.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<Bundle, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_bundle(&path.display().to_string(), &content)
}

/// `(scope, key)` pairs present in `source` but missing from `target`,
/// in sorted order.
pub fn missing_keys(source: &Bundle, target: &Bundle) -> Vec<(String, String)> {
    source
        .iter()
        .flat_map(|(scope, dictionary)| {
            let translated = target.get(scope);
            dictionary
                .keys()
                .filter(move |key| translated.is_none_or(|t| !t.contains_key(*key)))
                .map(move |key| (scope.clone(), key.clone()))
        })
        .collect()
}

/// Total number of `(scope, key)` pairs in a bundle.
pub fn key_count(bundle: &Bundle) -> usize {
    bundle.values().map(BTreeMap::len).sum()
}

fn parse_error(origin: &str, e: &JsonError) -> LoadError {
    // serde_json appends the position to its message; it is reported separately.
    let message = e.to_string();
    let position = format!(" at line {} column {}", e.line(), e.column());
    LoadError::Parse {
        origin: origin.to_string(),
        line: e.line(),
        column: e.column(),
        message: message.strip_suffix(&position).unwrap_or(&message).to_string(),
    }
}

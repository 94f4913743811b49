//! Formatter registry.
//!
//! Formatters are the functions a pipeline stage invokes
//! (`{price..currency(EUR)}`). Entries are either formatters or nested
//! namespaces, so dotted names like `Math.round` resolve one segment at a time.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter as FmtFormatter, Result as FmtResult};
use std::sync::Arc;

use crate::formatters;
use crate::interpreter::FormatError;
use crate::types::Value;

/// Formatter function signature.
///
/// Takes:
/// - `value`: the current pipeline value
/// - `locale`: the locale passed to the resolver (e.g. "en", "fr-CA")
/// - `args`: raw trimmed stage arguments, never coerced
///
/// Returns the new pipeline value, or an error to skip this stage.
pub type FormatterFn = Arc<dyn Fn(&Value, &str, &[String]) -> Result<Value, FormatError> + Send + Sync>;

/// One registry entry.
#[derive(Clone)]
pub enum RegistryEntry {
    /// A callable formatter.
    Formatter(FormatterFn),
    /// A nested namespace of further entries.
    Namespace(FormatterRegistry),
}

impl Debug for RegistryEntry {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        match self {
            RegistryEntry::Formatter(_) => write!(f, "Formatter"),
            RegistryEntry::Namespace(ns) => f.debug_tuple("Namespace").field(ns).finish(),
        }
    }
}

/// A mapping from names to formatters or namespaces.
///
/// The registry is an immutable value from the resolver's point of view;
/// cloning is cheap because formatters are reference-counted.
///
/// # Example
///
/// ```
/// use easy_intl::{FormatterRegistry, Value};
///
/// let mut math = FormatterRegistry::new();
/// math.register("round", |value: &Value, _: &str, _: &[String]| {
///     Ok(value.as_float().map_or_else(|| value.clone(), |f| Value::Float(f.round())))
/// });
///
/// let mut registry = FormatterRegistry::with_defaults();
/// registry.register_namespace("Math", math);
///
/// assert!(registry.formatter("Math.round").is_some());
/// assert!(registry.formatter("currency").is_some());
/// assert!(registry.formatter("Math").is_none());
/// ```
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl FormatterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the default formatters:
    /// `currency`, `date`, `number` and `plural`.
    pub fn with_defaults() -> Self {
        formatters::default_formatters()
    }

    /// Create the defaults with `overrides` merged on top.
    ///
    /// Top-level names in `overrides` replace the default entry entirely.
    pub fn with_overrides(overrides: FormatterRegistry) -> Self {
        let mut registry = Self::with_defaults();
        registry.merge(overrides);
        registry
    }

    /// Register a formatter function under a top-level name.
    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F) -> &mut Self
    where
        F: Fn(&Value, &str, &[String]) -> Result<Value, FormatError> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), RegistryEntry::Formatter(Arc::new(formatter)));
        self
    }

    /// Register a nested namespace under a top-level name.
    pub fn register_namespace(
        &mut self,
        name: impl Into<String>,
        namespace: FormatterRegistry,
    ) -> &mut Self {
        self.entries
            .insert(name.into(), RegistryEntry::Namespace(namespace));
        self
    }

    /// Shallow merge: every top-level entry of `other` replaces the entry of
    /// the same name here. Namespaces are not merged recursively.
    pub fn merge(&mut self, other: FormatterRegistry) {
        self.entries.extend(other.entries);
    }

    /// Get a top-level entry.
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Walk a dotted name through nested namespaces.
    ///
    /// Returns `None` as soon as a segment is missing or a formatter is
    /// reached before the last segment.
    pub fn lookup(&self, dotted: &str) -> Option<&RegistryEntry> {
        let mut segments = dotted.split('.');
        let first = segments.next()?;
        segments.try_fold(self.get(first)?, |entry, segment| match entry {
            RegistryEntry::Namespace(ns) => ns.get(segment),
            RegistryEntry::Formatter(_) => None,
        })
    }

    /// Resolve a dotted name to a callable formatter.
    pub fn formatter(&self, dotted: &str) -> Option<&FormatterFn> {
        match self.lookup(dotted)? {
            RegistryEntry::Formatter(f) => Some(f),
            RegistryEntry::Namespace(_) => None,
        }
    }

    /// Check if a dotted name resolves to a formatter.
    pub fn has_formatter(&self, dotted: &str) -> bool {
        self.formatter(dotted).is_some()
    }

    /// All callable formatter names, flattened to dotted form and sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names("", &mut names);
        names
    }

    fn collect_names(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, entry) in &self.entries {
            let full = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match entry {
                RegistryEntry::Formatter(_) => out.push(full),
                RegistryEntry::Namespace(ns) => ns.collect_names(&full, out),
            }
        }
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Debug for FormatterRegistry {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> FmtResult {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

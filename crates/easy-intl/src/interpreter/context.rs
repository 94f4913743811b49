//! Resolution context carrying the inputs of one `resolve` call.

use std::mem;

use crate::interpreter::FormatterRegistry;
use crate::interpreter::error::ResolveWarning;
use crate::types::Value;

/// Context for resolving one template.
///
/// The context tracks:
/// - The data tree placeholder paths are resolved against
/// - The locale handed to every formatter
/// - The formatter registry used for pipeline stages
/// - Warnings collected while running pipelines
pub struct ResolveContext<'a> {
    data: &'a Value,
    locale: &'a str,
    registry: &'a FormatterRegistry,
    warnings: Vec<ResolveWarning>,
}

impl<'a> ResolveContext<'a> {
    /// Create a new context.
    pub fn new(data: &'a Value, locale: &'a str, registry: &'a FormatterRegistry) -> Self {
        Self {
            data,
            locale,
            registry,
            warnings: Vec::new(),
        }
    }

    /// The data tree.
    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// The locale passed to formatters.
    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// The formatter registry.
    pub fn registry(&self) -> &'a FormatterRegistry {
        self.registry
    }

    /// Add a warning, ignoring exact duplicates.
    pub fn add_warning(&mut self, warning: ResolveWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Get a reference to collected warnings.
    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// Drain all collected warnings from this context.
    pub fn take_warnings(&mut self) -> Vec<ResolveWarning> {
        mem::take(&mut self.warnings)
    }
}

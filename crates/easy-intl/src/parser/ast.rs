//! Public AST types for templates.
//!
//! These types are public so tooling (linters, the CLI) can inspect templates
//! without resolving them.

/// A parsed template string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Iterate over the placeholders in source order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, copied to the output unchanged.
    Literal(String),
    /// A `{path}` or `{path..stage()..stage()}` span.
    Placeholder(Placeholder),
}

/// A placeholder occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// The exact matched text including braces. Emitted verbatim when the
    /// data path does not resolve.
    pub source: String,
    /// Data path segments (`user.name` -> `["user", "name"]`).
    pub path: Vec<String>,
    /// Pipeline stages in application order. Empty for the simple form.
    pub pipeline: Vec<Stage>,
}

impl Placeholder {
    /// Returns true if this placeholder was matched by the piped form.
    pub fn is_piped(&self) -> bool {
        !self.pipeline.is_empty()
    }

    /// The data path joined with dots.
    pub fn path_str(&self) -> String {
        self.path.join(".")
    }
}

/// One step of a pipeline: `..name(arg1,arg2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Dotted formatter name (e.g. `currency`, `Math.round`).
    pub name: String,
    /// Raw trimmed arguments. Never coerced.
    pub args: Vec<String>,
}

impl Stage {
    /// Name segments for namespaced lookup.
    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }
}

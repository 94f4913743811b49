//! Template resolution.
//!
//! Turns a template plus a data tree into the final string. Each placeholder
//! is resolved on its own: a missing path or a failing stage affects only that
//! placeholder, never the rest of the template.

use tracing::{error, warn};

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::{FormatterRegistry, ResolveContext, ResolveWarning};
use crate::parser::ast::{Placeholder, Segment, Stage, Template};
use crate::parser::parse_template;
use crate::types::Value;

/// Resolve a template string against `data`.
///
/// Pure: the same inputs always give the same output. Never fails; see
/// [`resolve_with_warnings`] to also get the skipped-stage diagnostics.
///
/// # Example
///
/// ```
/// use easy_intl::{data, resolve, FormatterRegistry};
///
/// let registry = FormatterRegistry::with_defaults();
/// let data = data! { "name" => "Ana", "total" => 1234.5 };
///
/// assert_eq!(
///     resolve("{name} owes {total..currency()}", &data, "en", &registry),
///     "Ana owes $1,234.50"
/// );
/// assert_eq!(resolve("Hi {missing}", &data, "en", &registry), "Hi {missing}");
/// ```
pub fn resolve(template: &str, data: &Value, locale: &str, registry: &FormatterRegistry) -> String {
    resolve_with_warnings(template, data, locale, registry).0
}

/// Resolve a template string and return the warnings collected on the way.
pub fn resolve_with_warnings(
    template: &str,
    data: &Value,
    locale: &str,
    registry: &FormatterRegistry,
) -> (String, Vec<ResolveWarning>) {
    let parsed = parse_template(template);
    let mut ctx = ResolveContext::new(data, locale, registry);
    let text = eval_template(&parsed, &mut ctx);
    (text, ctx.take_warnings())
}

/// Evaluate a parsed template.
///
/// Literal segments are copied; placeholders are replaced by their resolved
/// value, or by their source text when the data path is absent.
pub fn eval_template(template: &Template, ctx: &mut ResolveContext<'_>) -> String {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(s) => output.push_str(s),
            Segment::Placeholder(placeholder) => {
                output.push_str(&eval_placeholder(placeholder, ctx));
            }
        }
    }
    output
}

/// Resolve one placeholder to its replacement text.
fn eval_placeholder(placeholder: &Placeholder, ctx: &mut ResolveContext<'_>) -> String {
    let Some(value) = ctx.data().get_path(&placeholder.path) else {
        return placeholder.source.clone();
    };

    if placeholder.pipeline.is_empty() {
        return value.to_string();
    }

    run_pipeline(value.clone(), &placeholder.pipeline, ctx).to_string()
}

/// Fold the stages over the value, left to right.
///
/// A stage that cannot run (unknown name, formatter error) leaves the value
/// unchanged and the fold continues.
fn run_pipeline(initial: Value, stages: &[Stage], ctx: &mut ResolveContext<'_>) -> Value {
    stages
        .iter()
        .fold(initial, |current, stage| apply_stage(current, stage, ctx))
}

fn apply_stage(current: Value, stage: &Stage, ctx: &mut ResolveContext<'_>) -> Value {
    let registry = ctx.registry();
    let Some(formatter) = registry.formatter(&stage.name) else {
        let suggestions = compute_suggestions(&stage.name, registry.names().as_slice());
        warn!(formatter = %stage.name, "Training module not found: `{}`", stage.name);
        ctx.add_warning(ResolveWarning::UnknownFormatter {
            name: stage.name.clone(),
            suggestions,
        });
        return current;
    };

    match formatter(&current, ctx.locale(), &stage.args) {
        Ok(next) => next,
        Err(e) => {
            error!(formatter = %stage.name, error = %e, "Error in formatter");
            ctx.add_warning(ResolveWarning::FormatterFailed {
                name: stage.name.clone(),
                message: e.to_string(),
            });
            current
        }
    }
}

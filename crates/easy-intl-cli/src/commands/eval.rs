//! Implementation of the `easy-intl eval` command.

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use easy_intl::{FormatterRegistry, Value, resolve_with_warnings};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing::debug;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Template string to resolve
    #[arg(long, required = true)]
    pub template: String,

    /// Locale passed to formatters (e.g., en, fr-CA, ja)
    #[arg(long, default_value = "en", env = "EASY_INTL_LOCALE")]
    pub locale: String,

    /// JSON file with the data tree
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Data entries in path=value format (repeatable, applied after --data)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
    pub warnings: Vec<String>,
}

/// Parse a path=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (path, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected path=value"))?;
    if path.is_empty() {
        return Err(format!("invalid parameter format '{s}': empty path"));
    }
    Ok((path.to_string(), value.to_string()))
}

/// Interpret a raw parameter value: integers and floats become numbers.
fn param_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::Number(n)
    } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        Value::Float(f)
    } else {
        Value::String(raw)
    }
}

/// Set `value` at a dotted `path`, creating intermediate maps. Anything in
/// the way that is not a map is replaced.
fn insert_path(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !matches!(current, Value::Map(_)) {
            *current = Value::Map(BTreeMap::new());
        }
        let Value::Map(map) = current else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Map(BTreeMap::new()));
    }
}

fn load_data(path: Option<&PathBuf>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::default());
    };
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Cannot read data file {}: {}", path.display(), e))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .into_diagnostic()
        .map_err(|e| miette!("Invalid JSON in data file {}: {}", path.display(), e))?;
    Ok(Value::from(json))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let mut data = load_data(args.data.as_ref())?;
    for (path, raw) in args.params {
        debug!(path = %path, "Setting data entry");
        insert_path(&mut data, &path, param_value(raw));
    }

    let registry = FormatterRegistry::with_defaults();
    let (result, warnings) = resolve_with_warnings(&args.template, &data, &args.locale, &registry);
    let warnings: Vec<String> = warnings.iter().map(ToString::to_string).collect();

    if args.json {
        let output = EvalResult { result, warnings };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{result}");
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_path_builds_nested_maps() {
        let mut data = Value::default();
        insert_path(&mut data, "user.name", Value::from("Ann"));
        insert_path(&mut data, "user.age", Value::from(30));
        assert_eq!(
            data.get_path(["user", "name"]),
            Some(&Value::from("Ann"))
        );
        assert_eq!(data.get_path(["user", "age"]), Some(&Value::from(30)));
    }

    #[test]
    fn insert_path_replaces_scalars_in_the_way() {
        let mut data = Value::default();
        insert_path(&mut data, "a", Value::from(1));
        insert_path(&mut data, "a.b", Value::from(2));
        assert_eq!(data.get_path(["a", "b"]), Some(&Value::from(2)));
    }

    #[test]
    fn param_values_are_typed() {
        assert_eq!(param_value("42".to_string()), Value::Number(42));
        assert_eq!(param_value("1.5".to_string()), Value::Float(1.5));
        assert_eq!(param_value("Ann".to_string()), Value::from("Ann"));
        assert_eq!(param_value("NaN".to_string()), Value::from("NaN"));
    }

    #[test]
    fn parse_key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }
}

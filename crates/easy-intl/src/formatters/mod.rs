//! Default formatters.
//!
//! | name       | args (defaults)                   | result                                  |
//! |------------|-----------------------------------|-----------------------------------------|
//! | `currency` | `code = "USD"`                    | locale-aware monetary amount            |
//! | `date`     | `style = "short"`                 | `short`, `medium` or `long` date        |
//! | `number`   | `decimals = "2"`                  | grouped number with fixed fraction      |
//! | `plural`   | `singular`, `plural = singular`   | `singular` iff the value is exactly 1   |
//!
//! Arguments arrive as raw strings; each formatter parses its own. An empty
//! argument counts as absent. Locale data comes from ICU4X: malformed locales
//! fall back to English, well-formed ones without data to the CLDR root.

mod date;
mod number;

use icu_locale_core::{Locale, locale};

use crate::interpreter::{FormatError, FormatterRegistry};
use crate::types::Value;

pub use date::date;
pub use number::{currency, number};

/// A registry holding the four default formatters.
pub fn default_formatters() -> FormatterRegistry {
    let mut registry = FormatterRegistry::new();
    registry
        .register("currency", currency)
        .register("date", date)
        .register("number", number)
        .register("plural", plural);
    registry
}

/// Pick between a singular and a plural word.
///
/// Returns `singular` when the value is the number 1 and the plural form
/// otherwise. The plural form defaults to `singular` when omitted. Strings are
/// never treated as numbers here, so `"1"` selects the plural form.
pub fn plural(value: &Value, _locale: &str, args: &[String]) -> Result<Value, FormatError> {
    let singular = arg(args, 0).unwrap_or_default();
    let plural_form = arg(args, 1).unwrap_or(singular);
    let is_one = match value {
        Value::Number(n) => *n == 1,
        Value::Float(f) => *f == 1.0,
        Value::Null | Value::Bool(_) | Value::String(_) | Value::List(_) | Value::Map(_) => false,
    };
    let form = if is_one { singular } else { plural_form };
    Ok(Value::String(form.to_string()))
}

/// The argument at `index`, treating an empty string as absent.
pub(crate) fn arg(args: &[String], index: usize) -> Option<&str> {
    args.get(index)
        .map(String::as_str)
        .filter(|a| !a.is_empty())
}

/// Parse a BCP 47 locale. Underscores are accepted as separators.
pub(crate) fn parse_locale(raw: &str) -> Locale {
    let normalized = raw.trim().replace('_', "-");
    match normalized.parse::<Locale>() {
        Ok(parsed) if parsed.id.language.as_str() != "und" => parsed,
        _ => locale!("en"),
    }
}

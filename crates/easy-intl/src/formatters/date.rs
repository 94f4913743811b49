//! `date` formatter.
//!
//! Input values are parsed with `chrono` and converted to UTC. The calendar
//! date is then rendered by `icu_datetime` with a year-month-day field set.
//! Date formatters are cached per thread, keyed by locale and style.

use std::cell::RefCell;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use icu_datetime::DateTimeFormatter;
use icu_datetime::fieldsets::YMD;
use icu_datetime::input::Date;
use icu_locale_core::Locale;

use crate::formatters::{arg, parse_locale};
use crate::interpreter::FormatError;
use crate::types::Value;

thread_local! {
    static DATE_FORMATTERS: RefCell<Vec<(Locale, DateStyle, DateTimeFormatter<YMD>)>> = const { RefCell::new(Vec::new()) };
}

/// Requested level of detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateStyle {
    Short,
    Medium,
    Long,
}

impl DateStyle {
    /// `long` and `short` select those styles; anything else is `medium`.
    fn from_arg(raw: Option<&str>) -> Self {
        match raw {
            None | Some("short") => DateStyle::Short,
            Some("long") => DateStyle::Long,
            Some(_) => DateStyle::Medium,
        }
    }

    fn field_set(self) -> YMD {
        match self {
            DateStyle::Short => YMD::short(),
            DateStyle::Medium => YMD::medium(),
            DateStyle::Long => YMD::long(),
        }
    }
}

/// Format a date in the given style (default `short`).
///
/// Accepts RFC 3339 strings, `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD` and
/// epoch milliseconds. Dates are evaluated in UTC.
///
/// ```
/// use easy_intl::formatters::date;
/// use easy_intl::Value;
///
/// let long = date(&Value::from("2024-01-15"), "en", &["long".to_string()]).unwrap();
/// assert_eq!(long, Value::from("January 15, 2024"));
/// ```
pub fn date(value: &Value, locale: &str, args: &[String]) -> Result<Value, FormatError> {
    let when = to_datetime(value)?;
    let style = DateStyle::from_arg(arg(args, 0));
    let locale = parse_locale(locale);
    Ok(Value::String(render(&when, style, &locale)?))
}

fn to_datetime(value: &Value) -> Result<DateTime<Utc>, FormatError> {
    let parsed = match value {
        Value::Number(ms) => DateTime::from_timestamp_millis(*ms),
        Value::Float(ms) if ms.is_finite() => DateTime::from_timestamp_millis(ms.trunc() as i64),
        Value::String(s) => parse_date_string(s.trim()),
        Value::Float(_) | Value::Null | Value::Bool(_) | Value::List(_) | Value::Map(_) => None,
    };
    parsed.ok_or_else(|| FormatError::invalid_value("a date", value))
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn render(when: &DateTime<Utc>, style: DateStyle, locale: &Locale) -> Result<String, FormatError> {
    let out_of_range = || FormatError::invalid_value("a date in range", when.to_rfc3339());
    let month = u8::try_from(when.month()).map_err(|_| out_of_range())?;
    let day = u8::try_from(when.day()).map_err(|_| out_of_range())?;
    let date = Date::try_new_iso(when.year(), month, day).map_err(|_| out_of_range())?;

    DATE_FORMATTERS.with_borrow_mut(|cache| {
        if let Some((_, _, formatter)) = cache
            .iter()
            .find(|(key, key_style, _)| key == locale && *key_style == style)
        {
            return Ok(formatter.format(&date).to_string());
        }
        let formatter = DateTimeFormatter::try_new(locale.clone().into(), style.field_set())
            .map_err(|e| FormatError::locale_data(locale, e))?;
        let out = formatter.format(&date).to_string();
        cache.push((locale.clone(), style, formatter));
        Ok(out)
    })
}

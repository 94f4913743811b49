//! `number` and `currency` formatters.
//!
//! Digits, separators and grouping come from CLDR through `icu_decimal`.
//! Decimal formatters are cached per thread, keyed by locale.

use std::cell::RefCell;

use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale_core::Locale;

use crate::formatters::{arg, parse_locale};
use crate::interpreter::FormatError;
use crate::types::Value;

/// Upper bound on requested fraction digits.
const MAX_FRACTION_DIGITS: usize = 20;

/// Languages that write the currency symbol after the amount.
const SYMBOL_AFTER_AMOUNT: &[&str] = &[
    "cs", "da", "de", "el", "es", "fi", "fr", "it", "nb", "pl", "ru", "sk", "sv", "uk",
];

thread_local! {
    static DECIMAL_FORMATTERS: RefCell<Vec<(Locale, DecimalFormatter)>> = const { RefCell::new(Vec::new()) };
}

/// Format a number with a fixed count of fraction digits (default 2).
///
/// ```
/// use easy_intl::formatters::number;
/// use easy_intl::Value;
///
/// let out = number(&Value::from(1234.5678), "en", &[]).unwrap();
/// assert_eq!(out, Value::from("1,234.57"));
/// ```
pub fn number(value: &Value, locale: &str, args: &[String]) -> Result<Value, FormatError> {
    let amount = numeric(value)?;
    let decimals = match arg(args, 0) {
        Some(raw) => parse_decimals(raw)?,
        None => 2,
    };
    let locale = parse_locale(locale);
    Ok(Value::String(localized_decimal(amount, decimals, &locale)?))
}

/// Format a monetary amount in the given ISO 4217 currency (default `USD`).
///
/// ```
/// use easy_intl::formatters::currency;
/// use easy_intl::Value;
///
/// let out = currency(&Value::from(1234.56), "en", &[]).unwrap();
/// assert_eq!(out, Value::from("$1,234.56"));
/// ```
pub fn currency(value: &Value, locale: &str, args: &[String]) -> Result<Value, FormatError> {
    let amount = numeric(value)?;
    let code = match arg(args, 0) {
        Some(raw) => parse_currency_code(raw)?,
        None => "USD".to_string(),
    };

    let locale = parse_locale(locale);
    let fraction_digits = currency_digits(&code);
    let digits = localized_decimal(amount.abs(), fraction_digits, &locale)?;
    let sign = if is_negative(amount, fraction_digits) {
        "-"
    } else {
        ""
    };

    let after = symbol_after_amount(&locale);
    let formatted = match currency_symbol(&code, &locale) {
        Some(symbol) if after => format!("{sign}{digits}\u{a0}{symbol}"),
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None if after => format!("{sign}{digits}\u{a0}{code}"),
        None => format!("{sign}{code}\u{a0}{digits}"),
    };
    Ok(Value::String(formatted))
}

/// Interpret a pipeline value as a finite number.
pub(crate) fn numeric(value: &Value) -> Result<f64, FormatError> {
    let n = match value {
        Value::Number(n) => *n as f64,
        Value::Float(f) => *f,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FormatError::invalid_value("a number", value))?,
        Value::Null | Value::Bool(_) | Value::List(_) | Value::Map(_) => {
            return Err(FormatError::invalid_value("a number", value));
        }
    };
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormatError::invalid_value("a finite number", value))
    }
}

fn parse_decimals(raw: &str) -> Result<usize, FormatError> {
    let decimals: usize = raw
        .parse()
        .map_err(|_| FormatError::invalid_argument(raw, "expected a digit count"))?;
    if decimals > MAX_FRACTION_DIGITS {
        return Err(FormatError::invalid_argument(
            raw,
            format!("at most {MAX_FRACTION_DIGITS} fraction digits"),
        ));
    }
    Ok(decimals)
}

fn parse_currency_code(raw: &str) -> Result<String, FormatError> {
    if raw.len() == 3 && raw.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(raw.to_ascii_uppercase())
    } else {
        Err(FormatError::invalid_argument(
            raw,
            "expected a three-letter currency code",
        ))
    }
}

/// Symbol for an ISO 4217 code, if one is commonly used.
fn currency_symbol(code: &str, locale: &Locale) -> Option<&'static str> {
    let language = locale.id.language.as_str();
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" if language == "ja" => "￥",
        "JPY" => "¥",
        "CNY" if language == "zh" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "BRL" => "R$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "MXN" => "MX$",
        _ => return None,
    };
    Some(symbol)
}

/// Minor-unit digits shown for a currency.
fn currency_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" | "PYG" => 0,
        "BHD" | "KWD" | "OMR" | "JOD" | "TND" => 3,
        _ => 2,
    }
}

fn symbol_after_amount(locale: &Locale) -> bool {
    SYMBOL_AFTER_AMOUNT.contains(&locale.id.language.as_str())
}

/// True when `amount` still shows as negative after rounding to `decimals`.
fn is_negative(amount: f64, decimals: usize) -> bool {
    amount < 0.0
        && format!("{:.*}", decimals, amount.abs())
            .bytes()
            .any(|b| matches!(b, b'1'..=b'9'))
}

/// Round to `decimals` fraction digits and format for `locale`.
///
/// Rounding happens before the value reaches ICU, so trailing zeros are kept
/// and a value that rounds to zero never shows a minus sign.
fn localized_decimal(amount: f64, decimals: usize, locale: &Locale) -> Result<String, FormatError> {
    let mut fixed = format!("{:.*}", decimals, amount.abs());
    if is_negative(amount, decimals) {
        fixed.insert(0, '-');
    }
    let decimal: Decimal = fixed
        .parse()
        .map_err(|_| FormatError::invalid_value("a decimal number", &fixed))?;

    DECIMAL_FORMATTERS.with_borrow_mut(|cache| {
        if let Some((_, formatter)) = cache.iter().find(|(key, _)| key == locale) {
            return Ok(formatter.format_to_string(&decimal));
        }
        let formatter =
            DecimalFormatter::try_new(locale.clone().into(), DecimalFormatterOptions::default())
                .map_err(|e| FormatError::locale_data(locale, e))?;
        let out = formatter.format_to_string(&decimal);
        cache.push((locale.clone(), formatter));
        Ok(out)
    })
}

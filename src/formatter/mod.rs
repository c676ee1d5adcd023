//! Locale-aware parsing with round-trip validation
//!
//! A [`LocaleFormatter`] knows how numbers are written in a given locale. The functions
//! here ask it for an integer, then a scientific float, then a plain decimal float, and
//! reject the strict results whose text does not match the value the formatter produced.
//! Formatter errors never escape: each failing step simply yields nothing.

mod table;

pub use table::TableFormatter;

use std::fmt;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::types::{FormatStyle, Number, SeparatorSymbols};

/// Errors reported by a locale formatter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatterError {
    /// No formatter can be built for the language tag
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
    /// The input does not start with a number in the locale's notation
    #[error("no digits at start of input: {0:?}")]
    NoDigits(String),
    /// The value does not fit the requested type
    #[error("value out of range: {0:?}")]
    Overflow(String),
    /// The formatting library cannot handle the request
    #[error("unsupported by formatter: {0}")]
    Unsupported(String),
}

/// A locale-aware number formatting capability
///
/// Implementations parse like a platform number formatter: they may stop at the end of the
/// longest numeric prefix and ignore what follows. The callers in this module detect such
/// partial parses through the symbols reported by [`LocaleFormatter::symbols`].
pub trait LocaleFormatter: fmt::Debug {
    /// Decimal and grouping symbols used by `style` in the locale
    fn symbols(&self, tag: &str, style: FormatStyle) -> Result<SeparatorSymbols, FormatterError>;

    /// Parse with a decimal-style formatter into a 64-bit integer
    fn parse_integer(&self, tag: &str, input: &str) -> Result<i64, FormatterError>;

    /// Parse with a scientific-style formatter into a double
    fn parse_scientific(&self, tag: &str, input: &str) -> Result<f64, FormatterError>;

    /// Parse with a decimal-style formatter into a double
    fn parse_decimal(&self, tag: &str, input: &str) -> Result<f64, FormatterError>;
}

/// Shortest text that reads back as `value`, without exponent or trailing `.0`
pub fn canonical_float_string(value: f64) -> String {
    value.to_string()
}

/// Parse user input with a locale formatter
///
/// # Arguments
/// * `formatter` - The formatting capability to delegate to
/// * `raw_input` - The text as the user entered it
/// * `tag` - Language tag such as `en_US`
///
/// # Returns
/// * `Some(Number::Integer)` when the whole input is an integer in the locale's notation
/// * `Some(Number::Float)` from the scientific or decimal formatter
/// * `None` when every step fails
pub fn parse_via_locale(
    formatter: &dyn LocaleFormatter,
    raw_input: &str,
    tag: &str,
) -> Option<Number> {
    parse_integer_checked(formatter, raw_input, tag)
        .map(Number::Integer)
        .or_else(|| parse_scientific_checked(formatter, raw_input, tag).map(Number::Float))
        .or_else(|| parse_decimal_lenient(formatter, raw_input, tag).map(Number::Float))
}

/// Integer parse, kept only if the normalized input is exactly the integer's text
pub fn parse_integer_checked(
    formatter: &dyn LocaleFormatter,
    raw_input: &str,
    tag: &str,
) -> Option<i64> {
    let parsed = formatter
        .parse_integer(tag, raw_input)
        .map_err(|e| log_failure("integer", tag, &e))
        .ok()?;
    let symbols = formatter
        .symbols(tag, FormatStyle::Decimal)
        .map_err(|e| log_failure("integer", tag, &e))
        .ok()?;

    round_trips(&symbols, raw_input, &parsed.to_string()).then_some(parsed)
}

/// Scientific parse, kept only if the normalized input is exactly the float's text
pub fn parse_scientific_checked(
    formatter: &dyn LocaleFormatter,
    raw_input: &str,
    tag: &str,
) -> Option<f64> {
    let parsed = formatter
        .parse_scientific(tag, raw_input)
        .map_err(|e| log_failure("scientific", tag, &e))
        .ok()?;
    let symbols = formatter
        .symbols(tag, FormatStyle::Scientific)
        .map_err(|e| log_failure("scientific", tag, &e))
        .ok()?;

    round_trips(&symbols, raw_input, &canonical_float_string(parsed)).then_some(parsed)
}

/// Decimal parse without any round-trip check
pub fn parse_decimal_lenient(
    formatter: &dyn LocaleFormatter,
    raw_input: &str,
    tag: &str,
) -> Option<f64> {
    formatter
        .parse_decimal(tag, raw_input)
        .map_err(|e| log_failure("decimal", tag, &e))
        .ok()
}

fn round_trips(symbols: &SeparatorSymbols, raw_input: &str, rendered: &str) -> bool {
    let normalized = symbols.normalize(raw_input);
    let matches = normalized == rendered;
    #[cfg(feature = "tracing")]
    if !matches {
        trace!(%normalized, %rendered, "round-trip mismatch");
    }
    matches
}

fn log_failure(_step: &str, _tag: &str, _error: &FormatterError) {
    #[cfg(feature = "tracing")]
    {
        debug!(step = _step, tag = _tag, error = %_error, "locale formatter step failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Formatter returning canned answers per input
    #[derive(Debug, Default)]
    struct ScriptedFormatter {
        symbols: Option<SeparatorSymbols>,
        integers: HashMap<&'static str, i64>,
        scientific: HashMap<&'static str, f64>,
        decimal: HashMap<&'static str, f64>,
    }

    impl LocaleFormatter for ScriptedFormatter {
        fn symbols(&self, tag: &str, _: FormatStyle) -> Result<SeparatorSymbols, FormatterError> {
            self.symbols
                .clone()
                .ok_or_else(|| FormatterError::UnknownLocale(tag.to_string()))
        }

        fn parse_integer(&self, _: &str, input: &str) -> Result<i64, FormatterError> {
            self.integers
                .get(input)
                .copied()
                .ok_or_else(|| FormatterError::NoDigits(input.to_string()))
        }

        fn parse_scientific(&self, _: &str, input: &str) -> Result<f64, FormatterError> {
            self.scientific
                .get(input)
                .copied()
                .ok_or_else(|| FormatterError::NoDigits(input.to_string()))
        }

        fn parse_decimal(&self, _: &str, input: &str) -> Result<f64, FormatterError> {
            self.decimal
                .get(input)
                .copied()
                .ok_or_else(|| FormatterError::Unsupported(input.to_string()))
        }
    }

    fn german() -> ScriptedFormatter {
        ScriptedFormatter {
            symbols: Some(SeparatorSymbols::new(",", ".")),
            ..Default::default()
        }
    }

    #[test]
    fn test_integer_round_trip() {
        let mut formatter = german();
        formatter.integers.insert("1.234", 1234);
        assert_eq!(
            parse_via_locale(&formatter, "1.234", "de_DE"),
            Some(Number::Integer(1234))
        );
    }

    #[test]
    fn test_truncated_integer_is_rejected() {
        let mut formatter = german();
        formatter.integers.insert("1.234,5", 1234);
        formatter.scientific.insert("1.234,5", 1234.5);
        assert_eq!(parse_integer_checked(&formatter, "1.234,5", "de_DE"), None);
        assert_eq!(
            parse_via_locale(&formatter, "1.234,5", "de_DE"),
            Some(Number::Float(1234.5))
        );
    }

    #[test]
    fn test_scientific_mismatch_falls_to_decimal() {
        let mut formatter = german();
        formatter.scientific.insert("12abc", 12.0);
        formatter.decimal.insert("12abc", 12.0);
        assert_eq!(parse_scientific_checked(&formatter, "12abc", "de_DE"), None);
        assert_eq!(
            parse_via_locale(&formatter, "12abc", "de_DE"),
            Some(Number::Float(12.0))
        );
    }

    #[test]
    fn test_missing_symbols_skip_checked_steps() {
        let mut formatter = ScriptedFormatter::default();
        formatter.integers.insert("5", 5);
        formatter.scientific.insert("5", 5.0);
        formatter.decimal.insert("5", 5.0);
        assert_eq!(
            parse_via_locale(&formatter, "5", "en_US"),
            Some(Number::Float(5.0))
        );
    }

    #[test]
    fn test_all_steps_fail() {
        assert_eq!(parse_via_locale(&german(), "abc", "de_DE"), None);
    }

    #[test]
    fn test_unsupported_request_yields_nothing() {
        let error = FormatterError::Unsupported("de_DE".to_string());
        assert_eq!(error.to_string(), "unsupported by formatter: de_DE");

        let mut formatter = german();
        formatter.integers.insert("7", 7);
        assert_eq!(parse_decimal_lenient(&formatter, "7", "de_DE"), None);
        assert_eq!(
            parse_via_locale(&formatter, "7", "de_DE"),
            Some(Number::Integer(7))
        );
    }

    #[test]
    fn test_canonical_float_string() {
        assert_eq!(canonical_float_string(1500.0), "1500");
        assert_eq!(canonical_float_string(1234.56), "1234.56");
        assert_eq!(canonical_float_string(-0.25), "-0.25");
    }
}

//! Type definitions for the number parser
//!
//! This module defines the values flowing through a parse: the raw scalar handed in by the
//! caller, the canonical numeric result, the parser configuration, and the separator data
//! reported by locale formatters.

use std::borrow::Cow;
use std::fmt;

/// Default language used to build the locale tag
pub const DEFAULT_LANGUAGE: &str = "en";
/// Default region used to build the locale tag
pub const DEFAULT_REGION: &str = "US";

/// The numeric value determined by a parse
///
/// Integer inputs and integer-looking text stay integers; anything that went through
/// separator normalization or a float formatter is a `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A whole number that fits in 64 bits
    Integer(i64),
    /// A floating point number
    Float(f64),
}

impl Number {
    /// Returns the value as `f64`, widening integers
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Returns the value as `i64` when it is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Integer(i) => Some(i),
            Number::Float(_) => None,
        }
    }

    /// Checks if the value is the integer variant
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

/// Renders the number dot-decimal without grouping.
///
/// Finite floats always carry a `.` so that feeding the text back into the parser yields a
/// `Float` again. Non-finite floats render as `inf`, `-inf` or `NaN`, which do not parse back.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Float(v) => {
                let rendered = v.to_string();
                if v.is_finite() && !rendered.contains('.') {
                    write!(f, "{rendered}.0")
                } else {
                    f.write_str(&rendered)
                }
            }
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// A scalar value as received from a form field or a loosely typed source
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput<'a> {
    /// Already an integer
    Integer(i64),
    /// Already a float
    Float(f64),
    /// User-entered text
    Text(Cow<'a, str>),
    /// Booleans are never numbers
    Bool(bool),
    /// Missing value
    Null,
}

impl From<i64> for RawInput<'_> {
    fn from(value: i64) -> Self {
        RawInput::Integer(value)
    }
}

impl From<i32> for RawInput<'_> {
    fn from(value: i32) -> Self {
        RawInput::Integer(i64::from(value))
    }
}

impl From<u32> for RawInput<'_> {
    fn from(value: u32) -> Self {
        RawInput::Integer(i64::from(value))
    }
}

impl From<f64> for RawInput<'_> {
    fn from(value: f64) -> Self {
        RawInput::Float(value)
    }
}

impl From<f32> for RawInput<'_> {
    fn from(value: f32) -> Self {
        RawInput::Float(f64::from(value))
    }
}

impl From<bool> for RawInput<'_> {
    fn from(value: bool) -> Self {
        RawInput::Bool(value)
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(value: &'a str) -> Self {
        RawInput::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(value: &'a String) -> Self {
        RawInput::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for RawInput<'_> {
    fn from(value: String) -> Self {
        RawInput::Text(Cow::Owned(value))
    }
}

impl From<Number> for RawInput<'_> {
    fn from(value: Number) -> Self {
        match value {
            Number::Integer(i) => RawInput::Integer(i),
            Number::Float(f) => RawInput::Float(f),
        }
    }
}

impl<'a, T: Into<RawInput<'a>>> From<Option<T>> for RawInput<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawInput::Null, Into::into)
    }
}

/// Configuration owned by a single parser
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Language code, lower case, e.g. "en" or "de"
    pub language: Option<String>,
    /// Region code, upper case, e.g. "US" or "DE"
    pub region: Option<String>,
    /// Run the locale formatter before the heuristic when one is available
    pub prefer_locale_formatting: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            language: Some(DEFAULT_LANGUAGE.to_string()),
            region: Some(DEFAULT_REGION.to_string()),
            prefer_locale_formatting: false,
        }
    }
}

impl ParserConfig {
    /// Set the language code
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the region code
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set whether the locale formatter runs first
    pub fn with_prefer_locale_formatting(mut self, prefer: bool) -> Self {
        self.prefer_locale_formatting = prefer;
        self
    }

    /// Builds the `lang_REGION` tag handed to locale formatters.
    ///
    /// Falls back to `en_US` unless both parts are present and non-empty.
    pub fn language_tag(&self) -> String {
        match (self.language.as_deref(), self.region.as_deref()) {
            (Some(lang), Some(region)) if !lang.is_empty() && !region.is_empty() => {
                format!("{lang}_{region}")
            }
            _ => format!("{DEFAULT_LANGUAGE}_{DEFAULT_REGION}"),
        }
    }
}

/// Normalizes `de-DE` style tags to the `de_DE` form
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('-', "_")
}

/// Formatting mode of a locale formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatStyle {
    /// Plain decimal notation, e.g. 1,234.5
    Decimal,
    /// Scientific notation, e.g. 1.2345E3
    Scientific,
}

/// Separator symbols a formatter uses for one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSymbols {
    /// Decimal separator symbol
    pub decimal: String,
    /// Grouping separator symbol
    pub grouping: String,
}

impl SeparatorSymbols {
    pub fn new(decimal: impl Into<String>, grouping: impl Into<String>) -> Self {
        Self {
            decimal: decimal.into(),
            grouping: grouping.into(),
        }
    }

    /// Rewrites locale-formatted text into dot-decimal text without grouping
    pub fn normalize(&self, input: &str) -> String {
        let ungrouped = if self.grouping.is_empty() {
            input.to_string()
        } else {
            input.replace(&self.grouping, "")
        };
        if self.decimal.is_empty() || self.decimal == "." {
            ungrouped
        } else {
            ungrouped.replace(&self.decimal, ".")
        }
    }
}

/// Number symbols for a locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    /// Decimal point character
    pub decimal_point: char,
    /// Thousands separator character
    pub thousands_separator: char,
    /// Exponent marker used in scientific notation
    pub exponent_symbol: String,
    /// Minus sign
    pub minus_sign: char,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            decimal_point: '.',
            thousands_separator: ',',
            exponent_symbol: "E".to_string(),
            minus_sign: '-',
        }
    }
}

impl LocaleSettings {
    /// Set the decimal point character
    pub fn with_decimal_point(mut self, c: char) -> Self {
        self.decimal_point = c;
        self
    }

    /// Set the thousands separator character
    pub fn with_thousands_separator(mut self, c: char) -> Self {
        self.thousands_separator = c;
        self
    }

    /// Set the exponent marker
    pub fn with_exponent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.exponent_symbol = symbol.into();
        self
    }

    /// Separator symbols as reported to the cross-validation step
    pub fn symbols(&self) -> SeparatorSymbols {
        SeparatorSymbols::new(
            self.decimal_point.to_string(),
            self.thousands_separator.to_string(),
        )
    }
}

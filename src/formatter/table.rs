use std::collections::HashMap;

use winnow::ascii::{Caseless, digit0, digit1};
use winnow::combinator::{opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode, ParserError};
use winnow::token::{literal, one_of};
use winnow::{ModalResult, Parser};

use super::{FormatterError, LocaleFormatter};
use crate::types::{FormatStyle, LocaleSettings, SeparatorSymbols, normalize_tag};

/// Locale formatter driven by a table of number symbols
///
/// Parsing reads the longest number at the start of the input written with the locale's
/// symbols: an optional sign, digits with grouping separators between them, an optional
/// decimal part and an optional exponent. Anything after that number is ignored.
#[derive(Debug, Clone)]
pub struct TableFormatter {
    locales: HashMap<String, LocaleSettings>,
    #[cfg(feature = "locale-data")]
    use_embedded: bool,
}

impl TableFormatter {
    /// Formatter backed by the embedded locale table
    #[cfg(feature = "locale-data")]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter that only knows the given locales
    pub fn from_locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = (S, LocaleSettings)>,
        S: Into<String>,
    {
        Self {
            locales: locales
                .into_iter()
                .map(|(tag, settings)| {
                    let tag: String = tag.into();
                    (normalize_tag(&tag), settings)
                })
                .collect(),
            #[cfg(feature = "locale-data")]
            use_embedded: false,
        }
    }

    /// Adds or replaces a locale, taking precedence over the embedded table
    pub fn with_locale(mut self, tag: &str, settings: LocaleSettings) -> Self {
        self.locales.insert(normalize_tag(tag), settings);
        self
    }

    /// Resolves a tag, building the "formatter" for it
    ///
    /// The exact tag is tried before its language alone; at each step the custom
    /// locales take precedence over the embedded table.
    pub fn settings(&self, tag: &str) -> Result<LocaleSettings, FormatterError> {
        let normalized = normalize_tag(tag);
        let language = normalized.split('_').next().unwrap_or_default();

        [normalized.as_str(), language]
            .into_iter()
            .find_map(|candidate| {
                self.locales
                    .get(candidate)
                    .cloned()
                    .or_else(|| self.embedded(candidate))
            })
            .ok_or_else(|| FormatterError::UnknownLocale(tag.to_string()))
    }

    #[cfg(feature = "locale-data")]
    fn embedded(&self, tag: &str) -> Option<LocaleSettings> {
        if !self.use_embedded {
            return None;
        }
        crate::locale::get_exact_locale_settings(tag)
    }

    #[cfg(not(feature = "locale-data"))]
    fn embedded(&self, _tag: &str) -> Option<LocaleSettings> {
        None
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self {
            locales: HashMap::new(),
            #[cfg(feature = "locale-data")]
            use_embedded: true,
        }
    }
}

/// A number scanned from locale text, rewritten with ASCII symbols
#[derive(Debug, Clone, PartialEq)]
struct ScannedNumber {
    negative: bool,
    integer: String,
    fraction: Option<String>,
    exponent: Option<String>,
}

impl ScannedNumber {
    fn to_f64(&self) -> f64 {
        let sign = if self.negative { "-" } else { "" };
        let integer = if self.integer.is_empty() { "0" } else { &self.integer };
        let fraction = match self.fraction.as_deref() {
            Some(f) if !f.is_empty() => f,
            _ => "0",
        };
        let exponent = self
            .exponent
            .as_deref()
            .map(|e| format!("e{e}"))
            .unwrap_or_default();
        format!("{sign}{integer}.{fraction}{exponent}")
            .parse::<f64>()
            .unwrap_or(0.0)
    }

    fn to_i64(&self, input: &str) -> Result<i64, FormatterError> {
        let overflow = || FormatterError::Overflow(input.to_string());
        if self.exponent.is_some() {
            let value = self.to_f64().trunc();
            if !value.is_finite() || value < -(2f64.powi(63)) || value >= 2f64.powi(63) {
                return Err(overflow());
            }
            return Ok(value as i64);
        }
        if self.integer.is_empty() {
            return Ok(0);
        }
        let sign = if self.negative { "-" } else { "" };
        format!("{sign}{}", self.integer)
            .parse::<i64>()
            .map_err(|_| overflow())
    }
}

type ScannedParts = (Option<char>, Option<String>, Option<String>, Option<String>);

fn number_parts(settings: &LocaleSettings, input: &mut &str) -> ModalResult<ScannedParts> {
    let grouping = settings.thousands_separator;
    let minus = settings.minus_sign;
    let is_grouping =
        move |c: char| c == grouping || (grouping.is_whitespace() && c.is_whitespace());

    let grouped_digits = (
        digit1,
        repeat(0.., preceded(one_of(is_grouping), digit1)).fold(
            String::new,
            |mut acc: String, digits: &str| {
                acc.push_str(digits);
                acc
            },
        ),
    )
        .map(|(first, rest): (&str, String)| format!("{first}{rest}"));

    let exponent = preceded(
        literal(Caseless(settings.exponent_symbol.as_str())),
        (opt(one_of(['+', '-'])), digit1),
    )
    .map(|(sign, digits): (Option<char>, &str)| match sign {
        Some('-') => format!("-{digits}"),
        _ => digits.to_string(),
    });

    (
        opt(one_of(move |c: char| c == minus || c == '-' || c == '+')),
        opt(grouped_digits),
        opt(preceded(one_of(settings.decimal_point), digit0.map(str::to_string))),
        opt(exponent),
    )
        .parse_next(input)
}

fn scan_number(settings: &LocaleSettings, input: &mut &str) -> ModalResult<ScannedNumber> {
    let original_input_state = *input;
    let (sign, integer, fraction, exponent) = number_parts(settings, input)?;

    let integer = integer.unwrap_or_default();
    if integer.is_empty() && fraction.as_deref().is_none_or(str::is_empty) {
        *input = original_input_state;
        return Err(ErrMode::Backtrack(ContextError::from_input(
            &original_input_state,
        )));
    }

    Ok(ScannedNumber {
        negative: matches!(sign, Some(c) if c != '+'),
        integer,
        fraction,
        exponent,
    })
}

impl TableFormatter {
    fn scan(&self, tag: &str, input: &str) -> Result<ScannedNumber, FormatterError> {
        let settings = self.settings(tag)?;
        let mut remaining = input;
        scan_number(&settings, &mut remaining)
            .map_err(|_| FormatterError::NoDigits(input.to_string()))
    }
}

impl LocaleFormatter for TableFormatter {
    fn symbols(&self, tag: &str, _style: FormatStyle) -> Result<SeparatorSymbols, FormatterError> {
        Ok(self.settings(tag)?.symbols())
    }

    fn parse_integer(&self, tag: &str, input: &str) -> Result<i64, FormatterError> {
        self.scan(tag, input)?.to_i64(input)
    }

    fn parse_scientific(&self, tag: &str, input: &str) -> Result<f64, FormatterError> {
        Ok(self.scan(tag, input)?.to_f64())
    }

    fn parse_decimal(&self, tag: &str, input: &str) -> Result<f64, FormatterError> {
        Ok(self.scan(tag, input)?.to_f64())
    }
}

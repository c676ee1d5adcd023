use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::formatter::{LocaleFormatter, parse_via_locale};
use crate::parser::heuristic::parse_heuristic;
use crate::types::{Number, ParserConfig, RawInput};

/// A locale formatter shared between parser clones
pub type SharedFormatter = Arc<dyn LocaleFormatter + Send + Sync>;

/// Parses user-entered numbers, combining separator heuristics with a locale formatter
///
/// Without a formatter the parser runs in pure heuristic mode. With one, the
/// `prefer_locale_formatting` flag decides which strategy runs first; the other strategy
/// is the fallback.
#[derive(Debug, Clone)]
pub struct NumberParser {
    config: ParserConfig,
    formatter: Option<SharedFormatter>,
}

impl Default for NumberParser {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

impl NumberParser {
    /// Create a parser for the given language and region
    ///
    /// # Examples
    /// ```
    /// use number_parse::{LocaleSettings, Number, NumberParser, TableFormatter};
    ///
    /// let german = LocaleSettings::default()
    ///     .with_decimal_point(',')
    ///     .with_thousands_separator('.');
    /// let parser = NumberParser::new("de", "DE", true)
    ///     .with_formatter(TableFormatter::from_locales([("de", german)]));
    ///
    /// assert_eq!(parser.parse("1.234"), Some(Number::Integer(1234)));
    /// assert_eq!(parser.parse("1.234,5"), Some(Number::Float(1234.5)));
    /// ```
    pub fn new(
        language: impl Into<String>,
        region: impl Into<String>,
        prefer_locale_formatting: bool,
    ) -> Self {
        Self::with_config(
            ParserConfig::default()
                .with_language(language)
                .with_region(region)
                .with_prefer_locale_formatting(prefer_locale_formatting),
        )
    }

    /// Create a parser from a config
    ///
    /// The parser gets the embedded locale table as its formatter when the `locale-data`
    /// feature is enabled, and no formatter otherwise.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            formatter: default_formatter(),
        }
    }

    /// Replace the locale formatter
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: LocaleFormatter + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Replace the locale formatter with one that is already shared
    pub fn with_shared_formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Drop the locale formatter, leaving only the heuristic
    pub fn without_formatter(mut self) -> Self {
        self.formatter = None;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn language(&self) -> Option<&str> {
        self.config.language.as_deref()
    }

    pub fn set_language(&mut self, language: Option<&str>) -> &mut Self {
        self.config.language = language.map(str::to_string);
        self
    }

    pub fn region(&self) -> Option<&str> {
        self.config.region.as_deref()
    }

    pub fn set_region(&mut self, region: Option<&str>) -> &mut Self {
        self.config.region = region.map(str::to_string);
        self
    }

    pub fn prefer_locale_formatting(&self) -> bool {
        self.config.prefer_locale_formatting
    }

    pub fn set_prefer_locale_formatting(&mut self, prefer: bool) -> &mut Self {
        self.config.prefer_locale_formatting = prefer;
        self
    }

    /// Checks if a locale formatter is available
    pub fn has_locale_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Tag handed to the locale formatter, `en_US` unless language and region are both set
    pub fn language_tag(&self) -> String {
        self.config.language_tag()
    }

    /// Parse a raw value into a number
    ///
    /// Integers and floats come back unchanged. Text goes through the heuristic and the
    /// locale formatter in the configured order. Booleans, nulls and text that yields no
    /// number give `None`.
    pub fn parse<'a>(&self, raw_input: impl Into<RawInput<'a>>) -> Option<Number> {
        match raw_input.into() {
            RawInput::Integer(i) => Some(Number::Integer(i)),
            RawInput::Float(f) => Some(Number::Float(f)),
            RawInput::Text(text) => self.parse_text(&text),
            RawInput::Bool(_) | RawInput::Null => None,
        }
    }

    /// Parse text with the configured strategy order
    pub fn parse_text(&self, text: &str) -> Option<Number> {
        let Some(formatter) = self.formatter.as_deref() else {
            return parse_heuristic(text);
        };
        let tag = self.language_tag();

        if self.config.prefer_locale_formatting {
            parse_via_locale(formatter, text, &tag).or_else(|| {
                #[cfg(feature = "tracing")]
                debug!(%tag, "locale formatter gave no value, trying heuristic");
                parse_heuristic(text)
            })
        } else {
            parse_heuristic(text).or_else(|| {
                #[cfg(feature = "tracing")]
                debug!(%tag, "heuristic gave no value, trying locale formatter");
                parse_via_locale(formatter, text, &tag)
            })
        }
    }

    /// Parse text with the locale formatter only
    ///
    /// Returns `None` when no formatter is available.
    pub fn parse_via_locale(&self, text: &str) -> Option<Number> {
        let formatter = self.formatter.as_deref()?;
        parse_via_locale(formatter, text, &self.language_tag())
    }
}

#[cfg(feature = "locale-data")]
fn default_formatter() -> Option<SharedFormatter> {
    Some(Arc::new(crate::formatter::TableFormatter::new()))
}

#[cfg(not(feature = "locale-data"))]
fn default_formatter() -> Option<SharedFormatter> {
    None
}

/// Parse a raw value with the default parser (`en_US`, heuristic first)
///
/// # Examples
/// ```
/// use number_parse::{Number, parse_number};
///
/// assert_eq!(parse_number("1,234.56"), Some(Number::Float(1234.56)));
/// assert_eq!(parse_number(true), None);
/// ```
pub fn parse_number<'a>(raw_input: impl Into<RawInput<'a>>) -> Option<Number> {
    NumberParser::default().parse(raw_input)
}

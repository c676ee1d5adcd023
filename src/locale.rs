//! Locale support for number parsing
//!
//! This module loads the embedded table of per-locale number symbols and resolves
//! language tags such as `de_DE` or `fr-CA` against it.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::types::{LocaleSettings, normalize_tag};

/// Error type for locale operations
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleError {
    /// The specified locale was not found
    NotFound(String),
    /// An error occurred while parsing locale data
    ParseError(String),
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::NotFound(locale) => write!(f, "Locale not found: {}", locale),
            LocaleError::ParseError(msg) => write!(f, "Error parsing locale data: {}", msg),
        }
    }
}

impl std::error::Error for LocaleError {}

type Result<T> = std::result::Result<T, LocaleError>;

/// Holds the number symbols of every embedded locale
pub struct LocaleManager {
    locale_settings: HashMap<String, LocaleSettings>,
}

// Global singleton for locale settings
static LOCALE_MANAGER: OnceLock<LocaleManager> = OnceLock::new();

impl LocaleManager {
    fn new() -> Self {
        let mut manager = Self {
            locale_settings: HashMap::new(),
        };

        if let Err(_e) = manager.load_embedded_data() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "failed to load embedded locale data");
        }

        manager
    }

    fn load_embedded_data(&mut self) -> Result<()> {
        let locale_settings_toml = include_str!("locale/locale_settings.toml");
        self.locale_settings = parse_locale_settings(locale_settings_toml)?;
        Ok(())
    }

    /// Get the global locale manager instance
    fn get() -> &'static Self {
        LOCALE_MANAGER.get_or_init(Self::new)
    }
}

/// Parse a locale settings table
///
/// The `base` entry, if present, supplies defaults that every other entry overrides.
pub fn parse_locale_settings(toml_str: &str) -> Result<HashMap<String, LocaleSettings>> {
    let parsed_toml: toml::Value =
        toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;

    let table = parsed_toml
        .as_table()
        .ok_or_else(|| LocaleError::ParseError("Root is not a table".to_string()))?;

    let base_settings = match table.get("base") {
        Some(base) => apply_locale_setting(LocaleSettings::default(), "base", base)?,
        None => LocaleSettings::default(),
    };

    let mut settings = HashMap::with_capacity(table.len());
    for (locale_id, value) in table {
        if locale_id == "base" {
            continue;
        }
        let locale_settings = apply_locale_setting(base_settings.clone(), locale_id, value)?;
        settings.insert(locale_id.to_string(), locale_settings);
    }

    Ok(settings)
}

fn single_char(table: &toml::Table, key: &str, locale_id: &str) -> Result<Option<char>> {
    let Some(value) = table.get(key) else {
        return Ok(None);
    };
    let text = value.as_str().ok_or_else(|| {
        LocaleError::ParseError(format!("{key} in {locale_id} is not a string"))
    })?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(LocaleError::ParseError(format!(
            "{key} in {locale_id} must be a single character"
        ))),
    }
}

/// Apply one locale's entries over the given settings
fn apply_locale_setting(
    mut settings: LocaleSettings,
    locale_id: &str,
    value: &toml::Value,
) -> Result<LocaleSettings> {
    let table = value.as_table().ok_or_else(|| {
        LocaleError::ParseError(format!("{locale_id} is not a table"))
    })?;

    if let Some(c) = single_char(table, "decimal", locale_id)? {
        settings.decimal_point = c;
    }
    if let Some(c) = single_char(table, "group", locale_id)? {
        settings.thousands_separator = c;
    }
    if let Some(c) = single_char(table, "minus", locale_id)? {
        settings.minus_sign = c;
    }
    if let Some(exponent) = table.get("exponent").and_then(|v| v.as_str()) {
        if exponent.is_empty() {
            return Err(LocaleError::ParseError(format!(
                "exponent in {locale_id} is empty"
            )));
        }
        settings.exponent_symbol = exponent.to_string();
    }

    if settings.decimal_point == settings.thousands_separator {
        return Err(LocaleError::ParseError(format!(
            "{locale_id} uses the same symbol for decimal and grouping"
        )));
    }

    Ok(settings)
}

/// Looks up a tag in a settings table, trying the exact tag before its language alone
pub fn resolve_in<'a>(
    table: &'a HashMap<String, LocaleSettings>,
    tag: &str,
) -> Option<&'a LocaleSettings> {
    let tag = normalize_tag(tag);
    table.get(&tag).or_else(|| {
        let language = tag.split('_').next()?;
        table.get(language)
    })
}

/// Get locale settings by identifier (e.g., "en_US", "de"), falling back to the language
pub fn get_locale_settings(locale_id: &str) -> Option<LocaleSettings> {
    resolve_in(&LocaleManager::get().locale_settings, locale_id).cloned()
}

/// Get locale settings for exactly this identifier, without language fallback
pub fn get_exact_locale_settings(locale_id: &str) -> Option<LocaleSettings> {
    LocaleManager::get()
        .locale_settings
        .get(&normalize_tag(locale_id))
        .cloned()
}

/// Like [`get_locale_settings`], but reports a missing locale as an error
pub fn require_locale_settings(locale_id: &str) -> Result<LocaleSettings> {
    get_locale_settings(locale_id).ok_or_else(|| LocaleError::NotFound(locale_id.to_string()))
}

/// List all available locale identifiers
pub fn list_available_locales() -> Vec<String> {
    let mut locales: Vec<String> = LocaleManager::get()
        .locale_settings
        .keys()
        .cloned()
        .collect();
    locales.sort();
    locales
}

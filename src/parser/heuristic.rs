//! Separator disambiguation by position and count
//!
//! Decides whether `.` or `,` is the decimal point of a user-entered number without any
//! locale knowledge, then converts the normalized text.

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::parser::lenient::{lenient_f64, lenient_number};
use crate::types::Number;

/// How the separators of a cleaned input are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorLayout {
    /// No separator at all
    Plain,
    /// A single `.` acting as decimal point
    DotDecimal,
    /// Several `.` acting as grouping marks
    DotGrouping,
    /// A single `,` acting as decimal point
    CommaDecimal,
    /// Several `,` acting as grouping marks
    CommaGrouping,
    /// Both present, `.` is the decimal point and `,` groups
    DotDecimalCommaGrouping,
    /// Both present, `,` is the decimal point and `.` groups
    CommaDecimalDotGrouping,
    /// Both present but no separator is uniquely the last one
    Ambiguous,
}

/// Checks if a character survives input cleaning
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'E' | 'e' | ',' | '.' | '-')
}

/// Trims the input and keeps only digits, exponent markers, separators and minus signs
pub fn clean_input(raw: &str) -> String {
    raw.trim().chars().filter(|&c| is_allowed_char(c)).collect()
}

/// Classifies the separators of an already cleaned input
pub fn classify_separators(cleaned: &str) -> SeparatorLayout {
    let dot_count = cleaned.matches('.').count();
    let comma_count = cleaned.matches(',').count();

    match (dot_count, comma_count) {
        (0, 0) => SeparatorLayout::Plain,
        (1, 0) => SeparatorLayout::DotDecimal,
        (_, 0) => SeparatorLayout::DotGrouping,
        (0, 1) => SeparatorLayout::CommaDecimal,
        (0, _) => SeparatorLayout::CommaGrouping,
        _ => {
            // Both counts are non-zero here, so both positions exist.
            let last_dot = cleaned.rfind('.');
            let last_comma = cleaned.rfind(',');
            if last_dot > last_comma && dot_count == 1 {
                SeparatorLayout::DotDecimalCommaGrouping
            } else if last_comma > last_dot && comma_count == 1 {
                SeparatorLayout::CommaDecimalDotGrouping
            } else {
                SeparatorLayout::Ambiguous
            }
        }
    }
}

/// Parse user input by inferring the decimal separator from the text itself
///
/// # Returns
/// * `None` if nothing numeric is left after cleaning, or if both separators appear and
///   neither is unambiguously the decimal point
///
/// # Examples
/// ```
/// use number_parse::parser::parse_heuristic;
/// use number_parse::Number;
///
/// assert_eq!(parse_heuristic("1.234,56"), Some(Number::Float(1234.56)));
/// assert_eq!(parse_heuristic("1,234.567,89"), None);
/// ```
pub fn parse_heuristic(raw: &str) -> Option<Number> {
    let cleaned = clean_input(raw);
    if cleaned.is_empty() {
        return None;
    }

    let layout = classify_separators(&cleaned);
    #[cfg(feature = "tracing")]
    trace!(input = %cleaned, ?layout, "classified separators");

    let normalized = match layout {
        SeparatorLayout::Plain => return Some(lenient_number(&cleaned)),
        SeparatorLayout::DotDecimal => cleaned,
        SeparatorLayout::DotGrouping => cleaned.replace('.', ""),
        SeparatorLayout::CommaDecimal => cleaned.replace(',', "."),
        SeparatorLayout::CommaGrouping => cleaned.replace(',', ""),
        SeparatorLayout::DotDecimalCommaGrouping => cleaned.replace(',', ""),
        SeparatorLayout::CommaDecimalDotGrouping => cleaned.replace('.', "").replace(',', "."),
        SeparatorLayout::Ambiguous => return None,
    };

    Some(Number::Float(lenient_f64(&normalized)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("  $ 1 234,50 USD "), "1234,50");
        assert_eq!(clean_input("abc"), "");
        assert_eq!(clean_input("-1.5e3"), "-1.5e3");
        assert_eq!(clean_input("+12"), "12");
    }

    #[test]
    fn test_classify_single_kind() {
        assert_eq!(classify_separators("1234"), SeparatorLayout::Plain);
        assert_eq!(classify_separators("12.5"), SeparatorLayout::DotDecimal);
        assert_eq!(classify_separators("1.234.567"), SeparatorLayout::DotGrouping);
        assert_eq!(classify_separators("12,5"), SeparatorLayout::CommaDecimal);
        assert_eq!(classify_separators("1,234,567"), SeparatorLayout::CommaGrouping);
    }

    #[test]
    fn test_classify_mixed() {
        assert_eq!(
            classify_separators("1,234.56"),
            SeparatorLayout::DotDecimalCommaGrouping
        );
        assert_eq!(
            classify_separators("1,234,567.8"),
            SeparatorLayout::DotDecimalCommaGrouping
        );
        assert_eq!(
            classify_separators("1.234,56"),
            SeparatorLayout::CommaDecimalDotGrouping
        );
        assert_eq!(classify_separators("1,234.567,89"), SeparatorLayout::Ambiguous);
        assert_eq!(classify_separators("1.234.567,8.9"), SeparatorLayout::Ambiguous);
        assert_eq!(classify_separators("1.2,3.4,5"), SeparatorLayout::Ambiguous);
    }

    #[test]
    fn test_single_separator() {
        assert_eq!(parse_heuristic("12.5"), Some(Number::Float(12.5)));
        assert_eq!(parse_heuristic("12,5"), Some(Number::Float(12.5)));
        assert_eq!(parse_heuristic("1.234.567"), Some(Number::Float(1234567.0)));
        assert_eq!(parse_heuristic("1,234,567"), Some(Number::Float(1234567.0)));
    }

    #[test]
    fn test_single_comma_is_decimal() {
        // One comma is always read as the decimal point, even in "1,234".
        assert_eq!(parse_heuristic("1,234"), Some(Number::Float(1.234)));
    }

    #[test]
    fn test_both_separators() {
        assert_eq!(parse_heuristic("1,234.56"), Some(Number::Float(1234.56)));
        assert_eq!(parse_heuristic("1.234,56"), Some(Number::Float(1234.56)));
        assert_eq!(parse_heuristic("-1.234.567,5"), Some(Number::Float(-1234567.5)));
        assert_eq!(parse_heuristic("1,234.567,89"), None);
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_heuristic("1234"), Some(Number::Integer(1234)));
        assert_eq!(parse_heuristic(" -42 "), Some(Number::Integer(-42)));
        assert_eq!(parse_heuristic("2E3"), Some(Number::Integer(2000)));
    }

    #[test]
    fn test_empty_after_cleaning() {
        assert_eq!(parse_heuristic(""), None);
        assert_eq!(parse_heuristic("   "), None);
        assert_eq!(parse_heuristic("abc"), None);
    }

    #[test]
    fn test_leftover_text_converts_leniently() {
        assert_eq!(parse_heuristic("-"), Some(Number::Integer(0)));
        assert_eq!(parse_heuristic("12-5"), Some(Number::Integer(12)));
        assert_eq!(parse_heuristic("1.5e"), Some(Number::Float(1.5)));
    }
}

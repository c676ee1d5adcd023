use std::collections::HashMap;
use std::fs;
use std::path::Path;

use number_parse::{LocaleSettings, Number, NumberParser, TableFormatter};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LocaleEntry {
    decimal: char,
    group: char,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    input: String,
    expected: Option<f64>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    prefer_locale: bool,
}

#[derive(Debug, Deserialize)]
struct TestCases {
    locales: HashMap<String, LocaleEntry>,
    cases: Vec<TestCase>,
}

fn load_cases() -> Result<TestCases, String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/parse_cases.json");
    let content =
        fs::read_to_string(&path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse fixtures: {e}"))
}

fn build_parser(case: &TestCase, fixtures: &TestCases) -> NumberParser {
    let Some(locale) = &case.locale else {
        return NumberParser::default().without_formatter();
    };
    let (language, region) = locale.split_once('_').unwrap_or((locale.as_str(), ""));
    let formatter = TableFormatter::from_locales(fixtures.locales.iter().map(|(tag, entry)| {
        (
            tag.clone(),
            LocaleSettings::default()
                .with_decimal_point(entry.decimal)
                .with_thousands_separator(entry.group),
        )
    }));
    NumberParser::new(language, region, case.prefer_locale).with_formatter(formatter)
}

fn run_test_case(case: &TestCase, fixtures: &TestCases) -> Result<(), String> {
    let result = build_parser(case, fixtures).parse(case.input.as_str());

    let matches = match (result, case.expected, case.kind.as_deref()) {
        (None, None, _) => true,
        (Some(Number::Integer(i)), Some(expected), Some("integer")) => i as f64 == expected,
        (Some(Number::Float(f)), Some(expected), Some("float")) => f == expected,
        _ => false,
    };

    if !matches {
        return Err(format!(
            "\n✗ Mismatch for input: {:?} (locale {:?}, prefer {})\nExpected:   {:?} {:?}\nActual:     {:?}",
            case.input, case.locale, case.prefer_locale, case.expected, case.kind, result
        ));
    }
    Ok(())
}

#[test]
fn test_parse_fixtures() {
    let fixtures = load_cases().unwrap();
    assert!(!fixtures.cases.is_empty());

    let failures: Vec<String> = fixtures
        .cases
        .iter()
        .filter_map(|case| run_test_case(case, &fixtures).err())
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:{}",
        failures.len(),
        fixtures.cases.len(),
        failures.join("")
    );
}

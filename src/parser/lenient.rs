//! Lenient string-to-number conversion
//!
//! Reads the longest leading numeric prefix of a string and ignores whatever follows it.
//! Text without a numeric prefix converts to zero. This conversion never fails; deciding
//! whether an input is a number at all happens before it is called.

use winnow::ascii::{digit0, digit1};
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode, ParserError};
use winnow::token::one_of;
use winnow::{ModalResult, Parser};

use crate::types::Number;

/// The pieces of a numeric prefix, borrowed from the input
#[derive(Debug, Clone, PartialEq)]
pub struct NumericPrefix<'s> {
    pub negative: bool,
    pub integer: &'s str,
    pub fraction: Option<&'s str>,
    /// Exponent including its marker and sign, e.g. `e-3`
    pub exponent: Option<&'s str>,
}

impl NumericPrefix<'_> {
    /// Converts the prefix to `f64`
    pub fn to_f64(&self) -> f64 {
        let sign = if self.negative { "-" } else { "" };
        let integer = if self.integer.is_empty() { "0" } else { self.integer };
        let fraction = match self.fraction {
            Some(f) if !f.is_empty() => f,
            _ => "0",
        };
        let exponent = self.exponent.unwrap_or("");
        format!("{sign}{integer}.{fraction}{exponent}")
            .parse::<f64>()
            .unwrap_or(0.0)
    }

    /// Converts the prefix to an integer when it denotes one, otherwise to a float
    pub fn to_number(&self) -> Number {
        if self.fraction.is_none() && self.exponent.is_none() {
            let sign = if self.negative { "-" } else { "" };
            if let Ok(i) = format!("{sign}{}", self.integer).parse::<i64>() {
                return Number::Integer(i);
            }
            return Number::Float(self.to_f64());
        }

        let value = self.to_f64();
        if self.fraction.is_none() && is_exact_i64(value) {
            Number::Integer(value as i64)
        } else {
            Number::Float(value)
        }
    }
}

// i64::MAX is not representable as f64, so the upper bound is exclusive.
fn is_exact_i64(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value >= -(2f64.powi(63)) && value < 2f64.powi(63)
}

type PrefixParts<'s> = (Option<char>, &'s str, Option<&'s str>, Option<&'s str>);

fn prefix_parts<'s>(input: &mut &'s str) -> ModalResult<PrefixParts<'s>> {
    (
        opt(one_of(['+', '-'])),
        digit0,
        opt(preceded('.', digit0)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1).take()),
    )
        .parse_next(input)
}

/// Parse a numeric prefix: `[+-]? digits* ('.' digits*)? ([eE] [+-]? digits+)?`
///
/// At least one mantissa digit is required. A dangling exponent marker such as the `e`
/// in `12e` is left unconsumed.
pub fn numeric_prefix<'s>(input: &mut &'s str) -> ModalResult<NumericPrefix<'s>> {
    let original_input_state = *input;
    let (sign, integer, fraction, exponent) = prefix_parts(input)?;

    if integer.is_empty() && fraction.is_none_or(str::is_empty) {
        *input = original_input_state;
        return Err(ErrMode::Backtrack(ContextError::from_input(&original_input_state)));
    }

    Ok(NumericPrefix {
        negative: sign == Some('-'),
        integer,
        fraction,
        exponent,
    })
}

fn leading_prefix(text: &str) -> Option<NumericPrefix<'_>> {
    let mut input = text.trim_start();
    numeric_prefix(&mut input).ok()
}

/// Converts the leading numeric prefix of `text` to `f64`, or `0.0` when there is none
pub fn lenient_f64(text: &str) -> f64 {
    leading_prefix(text).map_or(0.0, |prefix| prefix.to_f64())
}

/// Converts the leading numeric prefix of `text`, keeping integers as integers.
/// Returns `Integer(0)` when there is no prefix.
pub fn lenient_number(text: &str) -> Number {
    leading_prefix(text).map_or(Number::Integer(0), |prefix| prefix.to_number())
}

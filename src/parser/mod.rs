//! User input parsing module
//!
//! This module turns free-form numeric text into numbers. The separator heuristic lives in
//! `heuristic`, the prefix-based string conversion in `lenient`, and `NumberParser` decides
//! how the heuristic and a locale formatter are combined.
//! The main entry points are `NumberParser::parse` and `parse_number`.

mod heuristic;
pub mod lenient;
mod number_parser;

pub use heuristic::{
    SeparatorLayout, classify_separators, clean_input, is_allowed_char, parse_heuristic,
};
pub use number_parser::{NumberParser, SharedFormatter, parse_number};

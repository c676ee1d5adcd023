pub mod formatter;
#[cfg(feature = "locale-data")]
pub mod locale;
pub mod parser;
pub mod types;

// Main API
pub use formatter::{FormatterError, LocaleFormatter, TableFormatter, parse_via_locale};
pub use parser::{NumberParser, parse_heuristic, parse_number};
pub use types::*;

pub mod io;
pub mod models;
pub mod parsing;
pub mod search;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use models::*;
pub use parsing::{
    IndentWidth, ParseError, ParseOptions, ParseReport, parse_taxonomy, parse_taxonomy_report,
    parse_taxonomy_with,
};
pub use search::{SearchHits, SearchOutcome, search};

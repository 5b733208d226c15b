//! Text adapters for criteria given as delimited strings.

mod criteria_parser;

pub use criteria_parser::CriteriaTextParser;

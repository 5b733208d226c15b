//! Criteria Text Parser - Weights and impacts from comma-separated text.
//!
//! Command-line and form inputs arrive as `"1,1,1,2"` and `"+,+,-,+"`. This
//! adapter turns them into a `CriteriaSpec`, reporting problems in the same
//! order as the rest of input validation.

use crate::domain::foundation::Impact;
use crate::domain::topsis::{CriteriaSpec, SchemaError, Validator};

/// Parses weight and impact lists.
pub struct CriteriaTextParser;

impl CriteriaTextParser {
    /// Parses both lists for a table with `criteria_count` criterion columns.
    ///
    /// Checks, in order:
    /// 1. weight count, then impact count, equals `criteria_count`
    /// 2. every weight token is a finite number
    /// 3. every impact token is exactly `+` or `-`
    /// 4. no weight is negative
    pub fn parse(
        weights: &str,
        impacts: &str,
        criteria_count: usize,
    ) -> Result<CriteriaSpec, SchemaError> {
        let weight_tokens = Self::tokens(weights);
        let impact_tokens = Self::tokens(impacts);

        Validator::validate_counts(weight_tokens.len(), impact_tokens.len(), criteria_count)?;

        let weights = Self::parse_weights(&weight_tokens)?;
        let impacts = Self::parse_impacts(&impact_tokens)?;

        CriteriaSpec::new(weights, impacts)
    }

    /// Splits on commas and trims every token. Empty input yields no tokens.
    pub fn tokens(text: &str) -> Vec<&str> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        text.split(',').map(str::trim).collect()
    }

    pub fn parse_weights(tokens: &[&str]) -> Result<Vec<f64>, SchemaError> {
        tokens
            .iter()
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|w| w.is_finite())
                    .ok_or_else(|| SchemaError::non_numeric_weight(position, token))
            })
            .collect()
    }

    pub fn parse_impacts(tokens: &[&str]) -> Result<Vec<Impact>, SchemaError> {
        tokens
            .iter()
            .enumerate()
            .map(|(position, token)| {
                Impact::from_marker(token)
                    .ok_or_else(|| SchemaError::invalid_impact(position, token))
            })
            .collect()
    }
}

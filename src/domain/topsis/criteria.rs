//! Criteria specification: per-criterion weights and impact directions.

use serde::{Deserialize, Serialize};

use super::{SchemaError, Validator};
use crate::domain::foundation::Impact;

/// Weights and impacts, aligned 1:1 with the decision matrix columns.
///
/// Weights are raw multiplicative factors and need not sum to one. Scaling
/// every weight by the same positive constant changes scores but not ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCriteria")]
pub struct CriteriaSpec {
    weights: Vec<f64>,
    impacts: Vec<Impact>,
}

impl CriteriaSpec {
    /// Creates a criteria spec.
    ///
    /// # Errors
    /// - `CountMismatch` if there are not as many impacts as weights
    /// - `InvalidWeight` if any weight is negative or not finite
    pub fn new(weights: Vec<f64>, impacts: Vec<Impact>) -> Result<Self, SchemaError> {
        if impacts.len() != weights.len() {
            return Err(SchemaError::count_mismatch(
                "impacts",
                impacts.len(),
                weights.len(),
            ));
        }
        Validator::validate_weights(&weights)?;
        Ok(Self { weights, impacts })
    }

    /// Equal weight of 1.0 on every criterion.
    pub fn uniform(impacts: Vec<Impact>) -> Self {
        Self {
            weights: vec![1.0; impacts.len()],
            impacts,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    /// Number of criteria this spec describes.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns a copy with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self, SchemaError> {
        Self::new(
            self.weights.iter().map(|w| w * factor).collect(),
            self.impacts.clone(),
        )
    }
}

/// Unchecked wire form; deserialization goes through `CriteriaSpec::new`.
#[derive(Deserialize)]
struct RawCriteria {
    weights: Vec<f64>,
    impacts: Vec<Impact>,
}

impl TryFrom<RawCriteria> for CriteriaSpec {
    type Error = SchemaError;

    fn try_from(raw: RawCriteria) -> Result<Self, Self::Error> {
        Self::new(raw.weights, raw.impacts)
    }
}

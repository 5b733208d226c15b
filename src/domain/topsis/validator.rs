//! Input validation that needs both the table and the criteria.
//!
//! Table-shape checks live on `DecisionTable` construction; weight and impact
//! token checks live in the text adapter. This module covers what remains:
//! aligning criteria with the table and rejecting degenerate columns.

use ndarray::ArrayView1;

use super::{CriteriaSpec, DecisionTable, SchemaError};
use crate::domain::foundation::Impact;

/// Cross-input validation for a ranking request.
pub struct Validator;

impl Validator {
    /// Runs every check a typed ranking request must pass, in order.
    ///
    /// 1. weight count, then impact count, equals the criterion count
    /// 2. every weight is finite and non-negative
    /// 3. no criterion column is all zeros
    pub fn validate_request(
        table: &DecisionTable,
        weights: &[f64],
        impacts: &[Impact],
    ) -> Result<CriteriaSpec, SchemaError> {
        Self::validate_counts(weights.len(), impacts.len(), table.criteria_count())?;
        let criteria = CriteriaSpec::new(weights.to_vec(), impacts.to_vec())?;
        Self::validate_columns(table)?;
        Ok(criteria)
    }

    /// Checks that a criteria spec lines up with the table, carries only
    /// finite non-negative weights, and the table has no degenerate columns.
    pub fn validate(table: &DecisionTable, criteria: &CriteriaSpec) -> Result<(), SchemaError> {
        Self::validate_counts(criteria.len(), criteria.impacts().len(), table.criteria_count())?;
        Self::validate_weights(criteria.weights())?;
        Self::validate_columns(table)
    }

    /// Every weight must be finite and non-negative.
    pub fn validate_weights(weights: &[f64]) -> Result<(), SchemaError> {
        match weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            Some((position, &weight)) => Err(SchemaError::invalid_weight(position, weight)),
            None => Ok(()),
        }
    }

    /// Weight count is checked before impact count.
    pub fn validate_counts(
        weights: usize,
        impacts: usize,
        criteria: usize,
    ) -> Result<(), SchemaError> {
        if weights != criteria {
            return Err(SchemaError::count_mismatch("weights", weights, criteria));
        }
        if impacts != criteria {
            return Err(SchemaError::count_mismatch("impacts", impacts, criteria));
        }
        Ok(())
    }

    /// Rejects any column in which every value is exactly zero.
    pub fn validate_columns(table: &DecisionTable) -> Result<(), SchemaError> {
        let degenerate = (0..table.criteria_count())
            .position(|column| table.column(column).iter().all(|&v| v == 0.0));
        match degenerate {
            Some(column) => {
                tracing::debug!(
                    column = %table.criteria_names()[column],
                    "Rejecting all-zero criterion column"
                );
                Err(SchemaError::degenerate_column(&table.criteria_names()[column]))
            }
            None => Ok(()),
        }
    }
}

/// Largest absolute value in `values`, or 0 when empty.
pub fn max_magnitude(values: ArrayView1<f64>) -> f64 {
    values.fold(0.0, |acc: f64, &v| acc.max(v.abs()))
}

/// Euclidean norm computed as `m * sqrt(Σ (x/m)^2)` with `m = max|x|`.
///
/// Squaring the raw values overflows above ~1e154 and underflows below
/// ~1e-154; scaling by the largest magnitude keeps every square in `[0, 1]`.
pub fn euclidean_norm(values: ArrayView1<f64>) -> f64 {
    let scale = max_magnitude(values);
    if scale == 0.0 {
        return 0.0;
    }
    scale * scaled_norm(values, scale)
}

/// `sqrt(Σ (x/scale)^2)` for a non-zero `scale`.
pub(crate) fn scaled_norm(values: ArrayView1<f64>, scale: f64) -> f64 {
    values
        .fold(0.0, |acc: f64, &v| {
            let r = v / scale;
            acc + r * r
        })
        .sqrt()
}

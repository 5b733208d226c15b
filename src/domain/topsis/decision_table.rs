//! Decision Table - Alternatives × criteria matrix of real values.

use ndarray::{Array2, ArrayView1};

use super::{SchemaError, SchemaErrorKind, TabularData};

/// Minimum number of criterion columns the engine can rank on.
pub const MIN_CRITERIA: usize = 2;

/// A validated decision matrix.
///
/// Rows are alternatives, columns are criteria. The first input column is kept
/// as an opaque identifier per row and never used numerically. Every value is
/// a finite `f64`; there are at least one alternative and two criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTable {
    identifier_header: String,
    criteria_names: Vec<String>,
    identifiers: Vec<String>,
    matrix: Array2<f64>,
}

impl DecisionTable {
    /// Creates a builder for constructing a decision table from typed values.
    pub fn builder() -> DecisionTableBuilder {
        DecisionTableBuilder::new()
    }

    /// Builds a decision table from untyped tabular input.
    ///
    /// Checks, in order:
    /// 1. at least 3 columns (identifier + 2 criteria)
    /// 2. every criterion cell parses as a finite real number
    ///
    /// Rows shorter than the header are treated as having missing (non-numeric)
    /// cells; rows wider than the header are rejected.
    pub fn from_tabular(data: &TabularData) -> Result<Self, SchemaError> {
        let columns = data.column_count();
        if columns < MIN_CRITERIA + 1 {
            return Err(SchemaError::insufficient_columns(columns));
        }

        let criteria_names: Vec<String> = data.headers[1..].to_vec();
        let criteria_count = criteria_names.len();
        let mut identifiers = Vec::with_capacity(data.row_count());
        let mut values = Vec::with_capacity(data.row_count() * criteria_count);

        for (index, row) in data.rows.iter().enumerate() {
            let row_number = index + 1;
            if row.len() > columns {
                return Err(SchemaError::ragged_row(row_number, row.len(), columns));
            }

            identifiers.push(row.first().cloned().unwrap_or_default());

            for (offset, name) in criteria_names.iter().enumerate() {
                let raw = row
                    .get(offset + 1)
                    .ok_or_else(|| SchemaError::missing_value(row_number, name))?;
                values.push(parse_cell(raw).ok_or_else(|| {
                    SchemaError::non_numeric_value(row_number, name, raw)
                })?);
            }
        }

        if identifiers.is_empty() {
            return Err(SchemaError::no_alternatives());
        }

        let matrix = Array2::from_shape_vec((identifiers.len(), criteria_count), values)
            .map_err(|e| SchemaError::new(SchemaErrorKind::NonNumericValue, e.to_string()))?;

        Ok(Self {
            identifier_header: data.headers[0].clone(),
            criteria_names,
            identifiers,
            matrix,
        })
    }

    /// Header of the identifier column.
    pub fn identifier_header(&self) -> &str {
        &self.identifier_header
    }

    /// Criterion column names, in matrix column order.
    pub fn criteria_names(&self) -> &[String] {
        &self.criteria_names
    }

    /// Alternative identifiers, in row order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// The `n × m` decision matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Number of alternatives (`n`).
    pub fn alternative_count(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of criteria (`m`).
    pub fn criteria_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Values of one criterion across all alternatives.
    pub fn column(&self, criterion: usize) -> ArrayView1<'_, f64> {
        self.matrix.column(criterion)
    }

}

/// Parses a criterion cell; integers and floats are accepted, surrounding
/// whitespace ignored. Empty, non-numeric, and non-finite cells are rejected.
fn parse_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Builder for constructing DecisionTable instances from typed values.
#[derive(Debug, Default)]
pub struct DecisionTableBuilder {
    identifier_header: Option<String>,
    criteria_names: Vec<String>,
    rows: Vec<(String, Vec<f64>)>,
}

impl DecisionTableBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier column header (defaults to "Alternative").
    pub fn identifier_header(mut self, header: impl Into<String>) -> Self {
        self.identifier_header = Some(header.into());
        self
    }

    /// Sets the criterion column names.
    pub fn criteria(mut self, names: Vec<impl Into<String>>) -> Self {
        self.criteria_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an alternative with one value per criterion.
    pub fn alternative(mut self, identifier: impl Into<String>, values: Vec<f64>) -> Self {
        self.rows.push((identifier.into(), values));
        self
    }

    /// Builds the decision table, applying the same checks as `from_tabular`.
    pub fn build(self) -> Result<DecisionTable, SchemaError> {
        let columns = self.criteria_names.len() + 1;
        if self.criteria_names.len() < MIN_CRITERIA {
            return Err(SchemaError::insufficient_columns(columns));
        }

        let criteria_count = self.criteria_names.len();
        let mut identifiers = Vec::with_capacity(self.rows.len());
        let mut values = Vec::with_capacity(self.rows.len() * criteria_count);

        for (index, (identifier, row)) in self.rows.into_iter().enumerate() {
            let row_number = index + 1;
            if row.len() > criteria_count {
                return Err(SchemaError::ragged_row(row_number, row.len() + 1, columns));
            }
            if row.len() < criteria_count {
                return Err(SchemaError::missing_value(
                    row_number,
                    &self.criteria_names[row.len()],
                ));
            }
            if let Some((offset, value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(SchemaError::non_numeric_value(
                    row_number,
                    &self.criteria_names[offset],
                    &value.to_string(),
                ));
            }
            identifiers.push(identifier);
            values.extend(row);
        }

        if identifiers.is_empty() {
            return Err(SchemaError::no_alternatives());
        }

        let matrix = Array2::from_shape_vec((identifiers.len(), criteria_count), values)
            .map_err(|e| SchemaError::new(SchemaErrorKind::NonNumericValue, e.to_string()))?;

        Ok(DecisionTable {
            identifier_header: self
                .identifier_header
                .unwrap_or_else(|| "Alternative".to_string()),
            criteria_names: self.criteria_names,
            identifiers,
            matrix,
        })
    }
}

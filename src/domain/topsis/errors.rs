//! Schema errors: caller-fixable problems with the ranking inputs.

use std::fmt;
use thiserror::Error;

/// Which precondition a ranking input violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    /// Fewer than one identifier column plus two criterion columns.
    InsufficientColumns,
    /// The table has a header but no alternatives.
    NoAlternatives,
    /// A criterion cell is empty, missing, or not a finite real number.
    NonNumericValue,
    /// A row has more cells than the header has columns.
    RaggedRow,
    /// Weight or impact count differs from the criterion column count.
    CountMismatch,
    /// A weight token is not a finite real number.
    NonNumericWeight,
    /// A weight is negative.
    InvalidWeight,
    /// An impact token is neither `+` nor `-`.
    InvalidImpact,
    /// Every value in a criterion column is zero.
    DegenerateColumn,
}

impl SchemaErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorKind::InsufficientColumns => "INSUFFICIENT_COLUMNS",
            SchemaErrorKind::NoAlternatives => "NO_ALTERNATIVES",
            SchemaErrorKind::NonNumericValue => "NON_NUMERIC_VALUE",
            SchemaErrorKind::RaggedRow => "RAGGED_ROW",
            SchemaErrorKind::CountMismatch => "COUNT_MISMATCH",
            SchemaErrorKind::NonNumericWeight => "NON_NUMERIC_WEIGHT",
            SchemaErrorKind::InvalidWeight => "INVALID_WEIGHT",
            SchemaErrorKind::InvalidImpact => "INVALID_IMPACT",
            SchemaErrorKind::DegenerateColumn => "DEGENERATE_COLUMN",
        }
    }

    /// Short human-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            SchemaErrorKind::InsufficientColumns => "insufficient columns",
            SchemaErrorKind::NoAlternatives => "no alternatives to rank",
            SchemaErrorKind::NonNumericValue => "non-numeric criterion value",
            SchemaErrorKind::RaggedRow => "row wider than header",
            SchemaErrorKind::CountMismatch => {
                "weight/impact count mismatch with criteria columns"
            }
            SchemaErrorKind::NonNumericWeight => "non-numeric weight",
            SchemaErrorKind::InvalidWeight => "invalid weight",
            SchemaErrorKind::InvalidImpact => "invalid impact marker",
            SchemaErrorKind::DegenerateColumn => "degenerate criterion column (all zeros)",
        }
    }
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A ranking input was rejected before (or instead of) computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {detail}", .kind.reason())]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub detail: String,
}

impl SchemaError {
    /// Creates a new schema error.
    pub fn new(kind: SchemaErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn insufficient_columns(found: usize) -> Self {
        Self::new(
            SchemaErrorKind::InsufficientColumns,
            format!(
                "input must contain at least 3 columns (identifier + 2 criteria), found {}",
                found
            ),
        )
    }

    pub fn no_alternatives() -> Self {
        Self::new(
            SchemaErrorKind::NoAlternatives,
            "input contains a header but no data rows",
        )
    }

    pub fn non_numeric_value(row: usize, column: &str, value: &str) -> Self {
        Self::new(
            SchemaErrorKind::NonNumericValue,
            format!("row {}, column '{}': '{}' is not a number", row, column, value),
        )
    }

    pub fn missing_value(row: usize, column: &str) -> Self {
        Self::new(
            SchemaErrorKind::NonNumericValue,
            format!("row {}, column '{}': value is missing", row, column),
        )
    }

    pub fn ragged_row(row: usize, cells: usize, columns: usize) -> Self {
        Self::new(
            SchemaErrorKind::RaggedRow,
            format!(
                "row {} has {} cells but the header has {} columns",
                row, cells, columns
            ),
        )
    }

    pub fn count_mismatch(what: &str, found: usize, expected: usize) -> Self {
        Self::new(
            SchemaErrorKind::CountMismatch,
            format!("{} {} given for {} criteria columns", found, what, expected),
        )
    }

    pub fn non_numeric_weight(position: usize, token: &str) -> Self {
        Self::new(
            SchemaErrorKind::NonNumericWeight,
            format!("weight {} ('{}') is not a number", position + 1, token),
        )
    }

    pub fn invalid_weight(position: usize, value: f64) -> Self {
        Self::new(
            SchemaErrorKind::InvalidWeight,
            format!(
                "weight {} is {}; weights must be finite and non-negative",
                position + 1,
                value
            ),
        )
    }

    pub fn invalid_impact(position: usize, token: &str) -> Self {
        Self::new(
            SchemaErrorKind::InvalidImpact,
            format!("impact {} ('{}') must be either + or -", position + 1, token),
        )
    }

    pub fn degenerate_column(column: &str) -> Self {
        Self::new(
            SchemaErrorKind::DegenerateColumn,
            format!("every value in column '{}' is zero", column),
        )
    }
}

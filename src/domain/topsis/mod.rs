//! TOPSIS Module - Ranking alternatives by closeness to the ideal solution.
//!
//! # Components
//!
//! - `TabularData` - Untyped header + rows input, as read from a table source
//! - `DecisionTable` - Validated alternatives × criteria matrix
//! - `CriteriaSpec` - Per-criterion weights and impact directions
//! - `Validator` - Cross-input checks (counts, weights, degenerate columns)
//! - `TopsisEngine` - Normalize, weight, ideal points, distances, closeness
//! - `RankedResult` - Scores and ranks in input row order
//!
//! Everything here is pure and synchronous. Reading and writing tables lives
//! behind the ports in `crate::ports`.

mod criteria;
mod decision_table;
mod engine;
mod errors;
mod ranking;
mod result;
mod tabular;
mod validator;

pub use criteria::CriteriaSpec;
pub use decision_table::{DecisionTable, DecisionTableBuilder, MIN_CRITERIA};
pub use engine::{rank, Distances, IdealPoints, TopsisEngine, AMBIGUOUS_SCORE};
pub use errors::{SchemaError, SchemaErrorKind};
pub use ranking::{assign_ranks, TiePolicy};
pub use result::{
    RankedAlternative, RankedResult, ResultColumns, DEFAULT_RANK_COLUMN, DEFAULT_SCORE_COLUMN,
};
pub use tabular::TabularData;
pub use validator::{euclidean_norm, max_magnitude, Validator};

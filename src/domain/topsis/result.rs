//! Ranked result: per-alternative closeness scores and ranks.

use serde::{Deserialize, Serialize};

use super::{TabularData, TiePolicy};

/// Default header of the appended score column.
pub const DEFAULT_SCORE_COLUMN: &str = "Topsis Score";
/// Default header of the appended rank column.
pub const DEFAULT_RANK_COLUMN: &str = "Rank";

/// One alternative's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub identifier: String,
    /// Closeness to the ideal-best point, in `[0, 1]`.
    pub score: f64,
    /// 1 is best. Fractional only under `TiePolicy::Average` with ties.
    pub rank: f64,
}

/// Names of the columns appended to the augmented table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultColumns {
    pub score: String,
    pub rank: String,
}

impl Default for ResultColumns {
    fn default() -> Self {
        Self {
            score: DEFAULT_SCORE_COLUMN.to_string(),
            rank: DEFAULT_RANK_COLUMN.to_string(),
        }
    }
}

/// Outcome of one ranking computation. Alternatives keep input row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    alternatives: Vec<RankedAlternative>,
    ideal_best: Vec<f64>,
    ideal_worst: Vec<f64>,
    tie_policy: TiePolicy,
}

impl RankedResult {
    pub(crate) fn new(
        alternatives: Vec<RankedAlternative>,
        ideal_best: Vec<f64>,
        ideal_worst: Vec<f64>,
        tie_policy: TiePolicy,
    ) -> Self {
        Self {
            alternatives,
            ideal_best,
            ideal_worst,
            tie_policy,
        }
    }

    /// Alternatives in input row order.
    pub fn alternatives(&self) -> &[RankedAlternative] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.alternatives.iter().map(|a| a.score).collect()
    }

    pub fn ranks(&self) -> Vec<f64> {
        self.alternatives.iter().map(|a| a.rank).collect()
    }

    /// The weighted ideal-best point, one value per criterion.
    pub fn ideal_best(&self) -> &[f64] {
        &self.ideal_best
    }

    /// The weighted ideal-worst point, one value per criterion.
    pub fn ideal_worst(&self) -> &[f64] {
        &self.ideal_worst
    }

    pub fn tie_policy(&self) -> TiePolicy {
        self.tie_policy
    }

    /// The top-ranked alternative; the earliest row wins a shared first place.
    pub fn best(&self) -> Option<&RankedAlternative> {
        self.alternatives
            .iter()
            .reduce(|best, candidate| if candidate.rank < best.rank { candidate } else { best })
    }

    /// Appends score and rank columns to the table this result was computed
    /// from. Original cells are kept verbatim.
    pub fn augment(&self, source: &TabularData, columns: &ResultColumns) -> TabularData {
        let mut headers = source.headers.clone();
        headers.push(columns.score.clone());
        headers.push(columns.rank.clone());

        let rows = source
            .rows
            .iter()
            .zip(&self.alternatives)
            .map(|(row, alternative)| {
                let mut out = row.clone();
                out.push(alternative.score.to_string());
                out.push(alternative.rank.to_string());
                out
            })
            .collect();

        TabularData { headers, rows }
    }
}

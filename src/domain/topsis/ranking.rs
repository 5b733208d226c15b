//! Rank assignment from closeness scores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// How alternatives with exactly equal scores are ranked.
///
/// Scores are compared with exact `f64` equality; there is no epsilon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Tied alternatives share the mean of the positions they occupy
    /// (two alternatives tied for first both get 1.5).
    #[default]
    Average,
    /// Tied alternatives share the best position they occupy, and the
    /// following positions are skipped ("1224" ranking).
    Competition,
    /// Ties are broken by original row order; ranks are always `1..=n`.
    RowOrder,
}

impl TiePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TiePolicy::Average => "average",
            TiePolicy::Competition => "competition",
            TiePolicy::RowOrder => "row_order",
        }
    }
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TiePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" => Ok(TiePolicy::Average),
            "competition" => Ok(TiePolicy::Competition),
            "row_order" => Ok(TiePolicy::RowOrder),
            other => Err(ValidationError::invalid_format(
                "tie_policy",
                format!("unknown policy '{}'", other),
            )),
        }
    }
}

/// Ranks scores in descending order; rank 1 is the highest score.
///
/// Returned ranks are aligned with the input order.
pub fn assign_ranks(scores: &[f64], policy: TiePolicy) -> Vec<f64> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && scores[order[end]] == scores[order[start]] {
            end += 1;
        }

        // positions start+1 ..= end are tied
        for (offset, &index) in order[start..end].iter().enumerate() {
            ranks[index] = match policy {
                TiePolicy::Average => (start + 1 + end) as f64 / 2.0,
                TiePolicy::Competition => (start + 1) as f64,
                TiePolicy::RowOrder => (start + offset + 1) as f64,
            };
        }
        start = end;
    }

    ranks
}

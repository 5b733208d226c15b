//! Result output configuration

use serde::Deserialize;

use super::error::ConfigValidationError;
use crate::domain::topsis::{ResultColumns, TiePolicy, DEFAULT_RANK_COLUMN, DEFAULT_SCORE_COLUMN};

/// How the augmented result table is laid out and ranked
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Header of the appended score column
    #[serde(default = "default_score_column")]
    pub score_column: String,

    /// Header of the appended rank column
    #[serde(default = "default_rank_column")]
    pub rank_column: String,

    /// How exactly-equal scores are ranked
    #[serde(default)]
    pub tie_policy: TiePolicy,
}

impl OutputConfig {
    /// Column names for `RankedResult::augment`
    pub fn columns(&self) -> ResultColumns {
        ResultColumns {
            score: self.score_column.clone(),
            rank: self.rank_column.clone(),
        }
    }

    /// Validate output configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.score_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("score_column"));
        }
        if self.rank_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("rank_column"));
        }
        if self.score_column == self.rank_column {
            return Err(ConfigValidationError::DuplicateColumnNames);
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            score_column: default_score_column(),
            rank_column: default_rank_column(),
            tie_policy: TiePolicy::default(),
        }
    }
}

fn default_score_column() -> String {
    DEFAULT_SCORE_COLUMN.to_string()
}

fn default_rank_column() -> String {
    DEFAULT_RANK_COLUMN.to_string()
}

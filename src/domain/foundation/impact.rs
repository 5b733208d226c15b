//! Impact marker: the direction of preference for a criterion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Whether higher or lower values of a criterion are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    /// "+": higher is better.
    Benefit,
    /// "-": lower is better.
    Cost,
}

impl Impact {
    /// Parses one of the two recognized markers, `+` or `-`.
    ///
    /// The token must match exactly; callers trim surrounding whitespace.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "+" => Some(Impact::Benefit),
            "-" => Some(Impact::Cost),
            _ => None,
        }
    }

    /// Returns the textual marker.
    pub fn marker(&self) -> &'static str {
        match self {
            Impact::Benefit => "+",
            Impact::Cost => "-",
        }
    }

    /// Returns the opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            Impact::Benefit => Impact::Cost,
            Impact::Cost => Impact::Benefit,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

impl FromStr for Impact {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Impact::from_marker(s).ok_or_else(|| {
            ValidationError::invalid_format("impact", format!("expected '+' or '-', got '{}'", s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_marker_accepts_plus_and_minus() {
        assert_eq!(Impact::from_marker("+"), Some(Impact::Benefit));
        assert_eq!(Impact::from_marker("-"), Some(Impact::Cost));
    }

    #[test]
    fn from_marker_rejects_anything_else() {
        assert_eq!(Impact::from_marker(""), None);
        assert_eq!(Impact::from_marker("++"), None);
        assert_eq!(Impact::from_marker(" +"), None);
        assert_eq!(Impact::from_marker("benefit"), None);
        assert_eq!(Impact::from_marker("−"), None); // unicode minus
    }

    #[test]
    fn marker_round_trips_through_display() {
        assert_eq!(Impact::Benefit.to_string(), "+");
        assert_eq!(Impact::Cost.to_string(), "-");
        assert_eq!("+".parse::<Impact>().unwrap(), Impact::Benefit);
    }

    #[test]
    fn from_str_reports_offending_token() {
        let err = "x".parse::<Impact>().unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn flipped_swaps_direction() {
        assert_eq!(Impact::Benefit.flipped(), Impact::Cost);
        assert_eq!(Impact::Cost.flipped(), Impact::Benefit);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&Impact::Cost).unwrap();
        assert_eq!(json, "\"Cost\"");
    }
}

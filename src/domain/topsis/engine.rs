//! TOPSIS Engine - Closeness-to-ideal scoring and ranking.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::validator::{euclidean_norm, max_magnitude, scaled_norm};
use super::{
    assign_ranks, CriteriaSpec, DecisionTable, RankedAlternative, RankedResult, SchemaError,
    TiePolicy, Validator,
};
use crate::domain::foundation::Impact;

/// Score given to an alternative that coincides with both ideal points.
pub const AMBIGUOUS_SCORE: f64 = 0.5;

/// The synthetic best and worst alternatives in weighted space.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealPoints {
    pub best: Array1<f64>,
    pub worst: Array1<f64>,
}

/// Euclidean distance of every alternative to each ideal point.
#[derive(Debug, Clone, PartialEq)]
pub struct Distances {
    pub to_best: Array1<f64>,
    pub to_worst: Array1<f64>,
}

/// Ranks alternatives by their relative closeness to the ideal solution.
///
/// The engine is stateless apart from its tie policy; every call is an
/// independent pure computation and the engine can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopsisEngine {
    tie_policy: TiePolicy,
}

impl TopsisEngine {
    pub fn new(tie_policy: TiePolicy) -> Self {
        Self { tie_policy }
    }

    pub fn tie_policy(&self) -> TiePolicy {
        self.tie_policy
    }

    /// Validates inputs and runs the full pipeline.
    ///
    /// # Algorithm
    /// 1. vector-normalize each criterion column
    /// 2. scale each column by its weight
    /// 3. take the per-column best/worst according to the impact direction
    /// 4. measure Euclidean distance of every row to both ideal points
    /// 5. score = d_worst / (d_best + d_worst), then rank descending
    ///
    /// # Errors
    /// Returns a `SchemaError` without computing anything if the criteria do
    /// not line up with the table or a column is all zeros.
    pub fn rank(
        &self,
        table: &DecisionTable,
        criteria: &CriteriaSpec,
    ) -> Result<RankedResult, SchemaError> {
        Validator::validate(table, criteria)?;

        tracing::debug!(
            alternatives = table.alternative_count(),
            criteria = table.criteria_count(),
            tie_policy = %self.tie_policy,
            "Ranking decision table"
        );

        let normalized = Self::normalize(table.matrix());
        let weighted = Self::apply_weights(&normalized, criteria.weights());
        let ideals = Self::ideal_points(&weighted, criteria.impacts());
        let distances = Self::distances(&weighted, &ideals);
        let scores = Self::closeness(&distances).to_vec();
        let ranks = assign_ranks(&scores, self.tie_policy);

        let alternatives = table
            .identifiers()
            .iter()
            .zip(scores.iter())
            .zip(ranks)
            .map(|((identifier, &score), rank)| RankedAlternative {
                identifier: identifier.clone(),
                score,
                rank,
            })
            .collect();

        Ok(RankedResult::new(
            alternatives,
            ideals.best.to_vec(),
            ideals.worst.to_vec(),
            self.tie_policy,
        ))
    }

    /// Divides every column by its Euclidean norm.
    ///
    /// Each value is computed as `(x/m) / sqrt(Σ (x/m)^2)` with `m` the
    /// column's largest magnitude, so columns of any finite scale normalize
    /// without overflow or underflow. Columns must hold a non-zero value;
    /// `Validator::validate_columns` guarantees this before `rank` gets here.
    pub fn normalize(matrix: &Array2<f64>) -> Array2<f64> {
        let mut normalized = matrix.clone();
        for mut column in normalized.axis_iter_mut(Axis(1)) {
            let scale = max_magnitude(column.view());
            if scale == 0.0 {
                continue;
            }
            let norm = scaled_norm(column.view(), scale);
            column.mapv_inplace(|x| (x / scale) / norm);
        }
        normalized
    }

    /// Multiplies column `j` by `weights[j]`.
    pub fn apply_weights(normalized: &Array2<f64>, weights: &[f64]) -> Array2<f64> {
        normalized * &ArrayView1::from(weights)
    }

    /// Per-column best and worst values of the weighted matrix.
    ///
    /// For a benefit criterion the best is the column maximum, for a cost
    /// criterion the column minimum; the worst is the opposite extreme.
    pub fn ideal_points(weighted: &Array2<f64>, impacts: &[Impact]) -> IdealPoints {
        let (best, worst): (Vec<f64>, Vec<f64>) = weighted
            .axis_iter(Axis(1))
            .zip(impacts)
            .map(|(column, impact)| {
                let max = column.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
                let min = column.fold(f64::INFINITY, |acc, &v| acc.min(v));
                match impact {
                    Impact::Benefit => (max, min),
                    Impact::Cost => (min, max),
                }
            })
            .unzip();

        IdealPoints {
            best: Array1::from(best),
            worst: Array1::from(worst),
        }
    }

    /// Euclidean distance of each row to the ideal-best and ideal-worst points.
    pub fn distances(weighted: &Array2<f64>, ideals: &IdealPoints) -> Distances {
        let distance_to = |point: &Array1<f64>| -> Array1<f64> {
            (weighted - point)
                .axis_iter(Axis(0))
                .map(euclidean_norm)
                .collect()
        };

        Distances {
            to_best: distance_to(&ideals.best),
            to_worst: distance_to(&ideals.worst),
        }
    }

    /// Relative closeness `d_worst / (d_best + d_worst)`.
    ///
    /// An alternative at zero distance from both points (single alternative,
    /// or every alternative identical) gets `AMBIGUOUS_SCORE`.
    pub fn closeness(distances: &Distances) -> Array1<f64> {
        distances
            .to_best
            .iter()
            .zip(distances.to_worst.iter())
            .map(|(&best, &worst)| {
                let total = best + worst;
                if total == 0.0 {
                    AMBIGUOUS_SCORE
                } else {
                    worst / total
                }
            })
            .collect()
    }
}

/// Ranks a decision table with the default (average) tie policy.
///
/// This is the typed entry point: weights and impacts are checked against the
/// table (counts, then weight values, then degenerate columns) before any
/// arithmetic.
pub fn rank(
    table: &DecisionTable,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<RankedResult, SchemaError> {
    let criteria = Validator::validate_request(table, weights, impacts)?;
    TopsisEngine::default().rank(table, &criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::topsis::SchemaErrorKind;

    const EPS: f64 = 1e-12;

    fn phones() -> DecisionTable {
        DecisionTable::builder()
            .identifier_header("Model")
            .criteria(vec!["Price", "Storage", "Camera", "Looks"])
            .alternative("A", vec![250.0, 16.0, 12.0, 5.0])
            .alternative("B", vec![200.0, 16.0, 8.0, 3.0])
            .alternative("C", vec![300.0, 32.0, 16.0, 4.0])
            .build()
            .unwrap()
    }

    fn phone_impacts() -> Vec<Impact> {
        vec![Impact::Benefit, Impact::Benefit, Impact::Cost, Impact::Benefit]
    }

    fn two_by_two(rows: [[f64; 2]; 2]) -> DecisionTable {
        DecisionTable::builder()
            .criteria(vec!["X", "Y"])
            .alternative("P", rows[0].to_vec())
            .alternative("Q", rows[1].to_vec())
            .build()
            .unwrap()
    }

    // Step tests

    #[test]
    fn normalize_gives_unit_columns() {
        let normalized = TopsisEngine::normalize(phones().matrix());
        for column in normalized.axis_iter(Axis(1)) {
            let norm = column.mapv(|x| x * x).sum().sqrt();
            assert!((norm - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn normalize_matches_hand_computation() {
        let table = two_by_two([[3.0, 1.0], [4.0, 0.0]]);
        let normalized = TopsisEngine::normalize(table.matrix());
        assert!((normalized[[0, 0]] - 0.6).abs() < EPS);
        assert!((normalized[[1, 0]] - 0.8).abs() < EPS);
        assert!((normalized[[0, 1]] - 1.0).abs() < EPS);
        assert_eq!(normalized[[1, 1]], 0.0);
    }

    #[test]
    fn normalize_handles_huge_values() {
        let table = two_by_two([[3e200, 1.0], [4e200, 1.0]]);
        let normalized = TopsisEngine::normalize(table.matrix());
        assert!((normalized[[0, 0]] - 0.6).abs() < EPS);
        assert!((normalized[[1, 0]] - 0.8).abs() < EPS);
    }

    #[test]
    fn normalize_handles_tiny_values() {
        let table = two_by_two([[3e-200, 1.0], [4e-200, 1.0]]);
        let normalized = TopsisEngine::normalize(table.matrix());
        assert!((normalized[[0, 0]] - 0.6).abs() < EPS);
        assert!((normalized[[1, 0]] - 0.8).abs() < EPS);
    }

    #[test]
    fn apply_weights_scales_columns_independently() {
        let normalized = Array2::from_shape_vec((2, 2), vec![1.0, 1.0, 0.5, 0.5]).unwrap();
        let weighted = TopsisEngine::apply_weights(&normalized, &[2.0, 0.25]);
        assert_eq!(weighted.row(0).to_vec(), vec![2.0, 0.25]);
        assert_eq!(weighted.row(1).to_vec(), vec![1.0, 0.125]);
    }

    #[test]
    fn ideal_points_follow_impact_direction() {
        let weighted = Array2::from_shape_vec((3, 2), vec![1.0, 5.0, 3.0, 2.0, 2.0, 9.0]).unwrap();
        let ideals = TopsisEngine::ideal_points(&weighted, &[Impact::Benefit, Impact::Cost]);
        assert_eq!(ideals.best.to_vec(), vec![3.0, 2.0]);
        assert_eq!(ideals.worst.to_vec(), vec![1.0, 9.0]);
    }

    #[test]
    fn distances_are_euclidean() {
        let weighted = Array2::from_shape_vec((1, 2), vec![0.0, 0.0]).unwrap();
        let ideals = IdealPoints {
            best: Array1::from(vec![3.0, 4.0]),
            worst: Array1::from(vec![0.0, 1.0]),
        };
        let distances = TopsisEngine::distances(&weighted, &ideals);
        assert!((distances.to_best[0] - 5.0).abs() < EPS);
        assert!((distances.to_worst[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn closeness_is_worst_fraction_of_total() {
        let distances = Distances {
            to_best: Array1::from(vec![1.0, 3.0, 0.0]),
            to_worst: Array1::from(vec![3.0, 1.0, 0.0]),
        };
        let scores = TopsisEngine::closeness(&distances);
        assert_eq!(scores.to_vec(), vec![0.75, 0.25, AMBIGUOUS_SCORE]);
    }

    // Pipeline tests

    #[test]
    fn phone_scenario_has_strictly_ordered_scores() {
        let result = rank(&phones(), &[0.25; 4], &phone_impacts()).unwrap();
        let scores = result.scores();

        assert_eq!(scores.len(), 3);
        assert_ne!(scores[0], scores[1]);
        assert_ne!(scores[1], scores[2]);
        assert_ne!(scores[0], scores[2]);

        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let best = result.best().unwrap();
        assert_eq!(best.rank, 1.0);
        assert_eq!(best.score, max);

        let mut ranks = result.ranks();
        ranks.sort_by(f64::total_cmp);
        assert_eq!(ranks, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn phone_scenario_matches_reference_values() {
        let result = rank(&phones(), &[0.25; 4], &phone_impacts()).unwrap();
        let scores = result.scores();

        assert!((scores[0] - 0.435_519).abs() < 1e-5, "A = {}", scores[0]);
        assert!((scores[1] - 0.404_632).abs() < 1e-5, "B = {}", scores[1]);
        assert!((scores[2] - 0.551_404).abs() < 1e-5, "C = {}", scores[2]);
        assert_eq!(result.ranks(), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn single_alternative_is_ambiguous() {
        let table = DecisionTable::builder()
            .criteria(vec!["X", "Y"])
            .alternative("Only", vec![4.0, 7.0])
            .build()
            .unwrap();

        let result = rank(&table, &[1.0, 1.0], &[Impact::Benefit, Impact::Cost]).unwrap();
        assert_eq!(result.scores(), vec![0.5]);
        assert_eq!(result.ranks(), vec![1.0]);
    }

    #[test]
    fn identical_alternatives_tie_at_half() {
        let table = two_by_two([[2.0, 3.0], [2.0, 3.0]]);
        let result = rank(&table, &[1.0, 1.0], &[Impact::Benefit; 2]).unwrap();
        assert_eq!(result.scores(), vec![0.5, 0.5]);
        assert_eq!(result.ranks(), vec![1.5, 1.5]);
    }

    #[test]
    fn dominant_alternative_scores_one() {
        let table = two_by_two([[10.0, 1.0], [1.0, 10.0]]);
        let result = rank(&table, &[1.0, 1.0], &[Impact::Benefit, Impact::Cost]).unwrap();
        assert!((result.scores()[0] - 1.0).abs() < EPS);
        assert!(result.scores()[1].abs() < EPS);
    }

    #[test]
    fn flipping_impact_reverses_preference() {
        let table = two_by_two([[10.0, 5.0], [20.0, 5.0]]);

        let benefit = rank(&table, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit]).unwrap();
        let cost = rank(&table, &[1.0, 1.0], &[Impact::Cost, Impact::Benefit]).unwrap();

        assert!(benefit.scores()[1] > benefit.scores()[0]);
        assert!(cost.scores()[0] > cost.scores()[1]);
    }

    #[test]
    fn uniform_weight_scaling_keeps_ranks() {
        let table = phones();
        let base = CriteriaSpec::new(vec![0.1, 0.4, 0.3, 0.2], phone_impacts()).unwrap();
        let engine = TopsisEngine::default();

        let original = engine.rank(&table, &base).unwrap();
        let scaled = engine.rank(&table, &base.scaled(7.5).unwrap()).unwrap();

        assert_eq!(original.ranks(), scaled.ranks());
    }

    #[test]
    fn zero_weight_criterion_is_ignored() {
        let table = two_by_two([[10.0, 1.0], [1.0, 10.0]]);
        let result = rank(&table, &[1.0, 0.0], &[Impact::Benefit; 2]).unwrap();
        assert_eq!(result.ranks(), vec![1.0, 2.0]);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let first = rank(&phones(), &[0.25; 4], &phone_impacts()).unwrap();
        let second = rank(&phones(), &[0.25; 4], &phone_impacts()).unwrap();
        let bits = |r: &RankedResult| r.scores().iter().map(|s| s.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn tie_policy_is_applied() {
        let table = two_by_two([[2.0, 3.0], [2.0, 3.0]]);
        let criteria = CriteriaSpec::uniform(vec![Impact::Benefit; 2]);
        let result = TopsisEngine::new(TiePolicy::RowOrder).rank(&table, &criteria).unwrap();
        assert_eq!(result.ranks(), vec![1.0, 2.0]);
        assert_eq!(result.tie_policy(), TiePolicy::RowOrder);
    }

    #[test]
    fn huge_values_still_discriminate() {
        let table = DecisionTable::builder()
            .criteria(vec!["Huge", "Flat"])
            .alternative("A", vec![2e200, 1.0])
            .alternative("B", vec![1e200, 1.0])
            .build()
            .unwrap();

        let result = rank(&table, &[1.0, 1.0], &[Impact::Benefit; 2]).unwrap();
        assert!((result.scores()[0] - 1.0).abs() < EPS);
        assert!(result.scores()[1].abs() < EPS);
        assert_eq!(result.ranks(), vec![1.0, 2.0]);
    }

    #[test]
    fn tiny_values_are_ranked_not_rejected() {
        let table = DecisionTable::builder()
            .criteria(vec!["Tiny", "Flat"])
            .alternative("A", vec![1e-200, 1.0])
            .alternative("B", vec![2e-200, 1.0])
            .build()
            .unwrap();

        let result = rank(&table, &[1.0, 1.0], &[Impact::Benefit; 2]).unwrap();
        assert_eq!(result.ranks(), vec![2.0, 1.0]);
    }

    #[test]
    fn magnitude_of_a_column_does_not_change_scores() {
        let base = two_by_two([[3.0, 7.0], [5.0, 2.0]]);
        let huge = two_by_two([[3e250, 7.0], [5e250, 2.0]]);
        let impacts = [Impact::Benefit, Impact::Cost];

        let expected = rank(&base, &[1.0, 1.0], &impacts).unwrap();
        let actual = rank(&huge, &[1.0, 1.0], &impacts).unwrap();
        for (a, b) in expected.scores().iter().zip(actual.scores()) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
        assert_eq!(expected.ranks(), actual.ranks());
    }

    #[test]
    fn exposes_ideal_points() {
        let table = two_by_two([[3.0, 1.0], [4.0, 2.0]]);
        let result = rank(&table, &[1.0, 1.0], &[Impact::Benefit, Impact::Cost]).unwrap();
        assert!((result.ideal_best()[0] - 0.8).abs() < EPS);
        assert!((result.ideal_worst()[0] - 0.6).abs() < EPS);
        assert!(result.ideal_best()[1] < result.ideal_worst()[1]);
    }

    // Validation tests

    #[test]
    fn rejects_count_mismatch_before_computation() {
        let err = rank(&phones(), &[0.25; 3], &phone_impacts()).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::CountMismatch);
    }

    #[test]
    fn rejects_degenerate_column() {
        let table = two_by_two([[0.0, 1.0], [0.0, 2.0]]);
        let err = rank(&table, &[1.0, 1.0], &[Impact::Benefit; 2]).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::DegenerateColumn);
    }

    #[test]
    fn deserialized_negative_weight_never_reaches_engine() {
        let parsed: Result<CriteriaSpec, _> =
            serde_json::from_str(r#"{"weights":[-1.0,1.0],"impacts":["Benefit","Benefit"]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn engine_rank_validates_criteria_alignment() {
        let criteria = CriteriaSpec::uniform(vec![Impact::Benefit; 3]);
        let err = TopsisEngine::default().rank(&phones(), &criteria).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::CountMismatch);
    }
}

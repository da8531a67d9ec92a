//! Gini coefficient
//!
//! The Gini coefficient is twice the signed area between the Lorenz curve
//! and the line of equality. Records are ordered by a rank column, outcome
//! and weight are rescaled to shares, and the area is accumulated from the
//! running totals:
//!
//! ```text
//! area = Σ (cumulative_weight_i - cumulative_outcome_i) * weight_share_i
//! gini = 2 * area     (ascending rank)
//! gini = -2 * area    (descending rank)
//! ```
//!
//! In economics the outcome is typically income ranked by itself; for risk
//! models the outcome is the observed loss, ranked by the predicted loss and
//! weighted by exposure.

use lorenz_io::TabularData;
use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{ColumnRole, GiniError, StatsResult};
use crate::lorenz::{LorenzCurve, LorenzPoint};

/// Column selection and ordering for a Gini computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiniOptions {
    /// Column holding the outcome being measured
    pub outcome: String,

    /// Column used to order records; defaults to the outcome column
    #[serde(default)]
    pub rank: Option<String>,

    /// Optional per-record weight column; defaults to uniform weight
    #[serde(default)]
    pub weight: Option<String>,

    /// Sort direction; `true` places the curve under the diagonal
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl GiniOptions {
    /// Options for a self-ranked, unweighted, ascending computation
    pub fn new(outcome: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            rank: None,
            weight: None,
            ascending: true,
        }
    }

    /// Rank records by a different column
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    /// Weight records by a column
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Set the sort direction
    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// Sort by descending rank
    pub fn descending(self) -> Self {
        self.with_ascending(false)
    }

    /// Rank column actually used: the outcome column when unset or empty
    pub fn effective_rank(&self) -> &str {
        match self.rank.as_deref() {
            Some(rank) if !rank.is_empty() => rank,
            _ => &self.outcome,
        }
    }

    /// Weight column actually used, `None` for uniform weight
    pub fn effective_weight(&self) -> Option<&str> {
        self.weight.as_deref().filter(|w| !w.is_empty())
    }
}

/// Result of a Gini computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniResult {
    /// Gini coefficient, nominally in [-1, 1]
    pub coefficient: f64,

    /// Signed area term before scaling and orientation
    pub area_term: f64,

    /// Lorenz curve, one point per sorted record
    pub curve: LorenzCurve,
}

impl GiniResult {
    /// Lorenz curve points with the origin prepended
    pub fn curve_with_origin(&self) -> Vec<LorenzPoint> {
        self.curve.with_origin()
    }
}

/// Computes Gini coefficients for a fixed column selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiniCalculator {
    options: GiniOptions,
}

impl GiniCalculator {
    pub fn new(options: GiniOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GiniOptions {
        &self.options
    }

    /// Compute the coefficient and curve for a table
    ///
    /// Only the selected columns are copied out of `data`; the table itself
    /// is left untouched.
    pub fn compute<T: TabularData + ?Sized>(&self, data: &T) -> StatsResult<GiniResult> {
        let outcome_name = self.options.outcome.as_str();
        let rank_name = self.options.effective_rank();
        let weight_name = self.options.effective_weight();

        tracing::debug!(
            "Computing Gini on {} ({} rows): outcome={}, rank={}, weight={:?}, ascending={}",
            data.backend_name(),
            data.num_rows(),
            outcome_name,
            rank_name,
            weight_name,
            self.options.ascending
        );

        for name in [Some(outcome_name), Some(rank_name), weight_name]
            .into_iter()
            .flatten()
        {
            if !data.has_column(name) {
                return Err(GiniError::UnknownColumn(name.to_string()));
            }
        }

        let outcome = data.column_f64(outcome_name)?;
        let rank = if rank_name == outcome_name {
            None
        } else {
            Some(data.column_f64(rank_name)?)
        };
        let weight = match weight_name {
            Some(name) => Some(data.column_f64(name)?),
            None => None,
        };

        let result = compute_from_columns(
            Columns {
                outcome: (outcome.as_slice(), outcome_name),
                rank: rank.as_deref().map(|r| (r, rank_name)),
                weight: weight.as_deref().zip(weight_name),
            },
            self.options.ascending,
        )?;

        tracing::debug!("Gini coefficient: {}", result.coefficient);
        Ok(result)
    }
}

/// Compute a Gini coefficient from a table
///
/// `rank` defaults to `outcome` when `None` or empty; `weight` defaults to
/// uniform weight.
pub fn gini<T: TabularData + ?Sized>(
    data: &T,
    outcome: &str,
    rank: Option<&str>,
    weight: Option<&str>,
    ascending: bool,
) -> StatsResult<GiniResult> {
    let mut options = GiniOptions::new(outcome).with_ascending(ascending);
    options.rank = rank.map(str::to_string);
    options.weight = weight.map(str::to_string);
    GiniCalculator::new(options).compute(data)
}

/// Compute a Gini coefficient from plain slices
pub fn gini_from_slices(
    outcome: &[f64],
    rank: Option<&[f64]>,
    weight: Option<&[f64]>,
    ascending: bool,
) -> StatsResult<GiniResult> {
    compute_from_columns(
        Columns {
            outcome: (outcome, "outcome"),
            rank: rank.map(|r| (r, "rank")),
            weight: weight.map(|w| (w, "weight")),
        },
        ascending,
    )
}

/// Selected columns with their names, for error reporting
struct Columns<'a> {
    outcome: (&'a [f64], &'a str),
    rank: Option<(&'a [f64], &'a str)>,
    weight: Option<(&'a [f64], &'a str)>,
}

fn compute_from_columns(selected: Columns<'_>, ascending: bool) -> StatsResult<GiniResult> {
    let (outcome, outcome_name) = selected.outcome;
    let n = outcome.len();

    for (values, name) in [Some(selected.outcome), selected.rank, selected.weight]
        .into_iter()
        .flatten()
    {
        if values.len() != n {
            return Err(GiniError::InvalidInputType(format!(
                "column '{}' has {} rows, expected {}",
                name,
                values.len(),
                n
            )));
        }
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(GiniError::InvalidInputType(format!(
                "column '{}' has a non-finite value at row {}",
                name, row
            )));
        }
    }

    if n == 0 {
        return Err(GiniError::EmptyDataset);
    }

    let rank = selected.rank.map_or(outcome, |(values, _)| values);
    let order = columns::stable_order(rank, ascending);

    let sorted_outcome = columns::take(outcome, &order);
    let (sorted_weight, weight_name) = match selected.weight {
        Some((values, name)) => (columns::take(values, &order), name),
        None => (vec![1.0; n], "weight"),
    };

    let outcome_share = normalize(&sorted_outcome, outcome_name, ColumnRole::Outcome)?;
    let weight_share = normalize(&sorted_weight, weight_name, ColumnRole::Weight)?;

    let cumulative_outcome = columns::cumulative_sum(&outcome_share);
    let cumulative_weight = columns::cumulative_sum(&weight_share);

    let area_term: f64 = cumulative_weight
        .iter()
        .zip(&cumulative_outcome)
        .zip(&weight_share)
        .map(|((cw, co), w)| (cw - co) * w)
        .sum();

    let coefficient = if ascending {
        2.0 * area_term
    } else {
        -2.0 * area_term
    };

    Ok(GiniResult {
        coefficient,
        area_term,
        curve: LorenzCurve::from_cumulative(&cumulative_weight, &cumulative_outcome),
    })
}

fn normalize(values: &[f64], column: &str, role: ColumnRole) -> StatsResult<Vec<f64>> {
    tracing::trace!("{} column '{}' total: {}", role, column, columns::total(values));

    columns::normalize(values).ok_or_else(|| GiniError::DegenerateTotal {
        column: column.to_string(),
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorenz_io::DataFrame;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_stepwise_distribution() {
        let result = gini_from_slices(&[10.0, 20.0, 30.0, 40.0], None, None, true).unwrap();

        assert_close(result.area_term, 0.125);
        assert_close(result.coefficient, 0.25);

        let outcomes = result.curve.cumulative_outcomes();
        for (actual, expected) in outcomes.iter().zip([0.1, 0.3, 0.6, 1.0]) {
            assert_close(*actual, expected);
        }
        assert_eq!(
            result.curve.cumulative_weights(),
            vec![0.25, 0.5, 0.75, 1.0]
        );
    }

    #[test]
    fn test_equal_outcomes_give_zero() {
        let rank = [4.0, 1.0, 3.0, 2.0];
        for ascending in [true, false] {
            let result = gini_from_slices(&[5.0; 4], Some(&rank), None, ascending).unwrap();
            assert_eq!(result.coefficient, 0.0);
        }
    }

    #[test]
    fn test_single_row() {
        let result = gini_from_slices(&[42.0], None, None, true).unwrap();
        assert_eq!(result.coefficient, 0.0);
        assert_eq!(result.curve.len(), 1);
        assert_eq!(
            result.curve.points()[0],
            LorenzPoint::new(1.0, 1.0)
        );
    }

    #[test]
    fn test_full_concentration() {
        for n in [2_usize, 10, 100] {
            let mut outcome = vec![0.0; n];
            outcome[n / 2] = 1.0;
            let result = gini_from_slices(&outcome, None, None, true).unwrap();
            assert_close(result.coefficient, (n as f64 - 1.0) / n as f64);
        }
    }

    #[test]
    fn test_descending_mirrors_area() {
        let outcome = [3.0, 9.0, 1.0, 4.0, 7.0];
        let asc = gini_from_slices(&outcome, None, None, true).unwrap();
        let desc = gini_from_slices(&outcome, None, None, false).unwrap();

        assert_close(desc.area_term, -asc.area_term);
        assert_close(desc.coefficient, asc.coefficient);
        assert!(asc.coefficient > 0.0);
    }

    #[test]
    fn test_tie_order_is_preserved() {
        let rank = [5.0, 5.0];

        let low_first = gini_from_slices(&[1.0, 3.0], Some(&rank), Some(&[3.0, 1.0]), true).unwrap();
        assert_close(low_first.coefficient, 0.75);

        let high_first = gini_from_slices(&[3.0, 1.0], Some(&rank), Some(&[1.0, 3.0]), true).unwrap();
        assert_close(high_first.coefficient, -0.25);

        let descending =
            gini_from_slices(&[1.0, 3.0], Some(&rank), Some(&[3.0, 1.0]), false).unwrap();
        assert_close(descending.coefficient, -0.75);
    }

    #[test]
    fn test_degenerate_totals() {
        let err = gini_from_slices(&[1.0, 2.0], None, Some(&[0.0, 0.0]), true).unwrap_err();
        assert_eq!(
            err,
            GiniError::DegenerateTotal {
                column: "weight".to_string(),
                role: ColumnRole::Weight,
            }
        );

        let err = gini_from_slices(&[0.0, 0.0], None, None, true).unwrap_err();
        assert!(matches!(
            err,
            GiniError::DegenerateTotal {
                role: ColumnRole::Outcome,
                ..
            }
        ));
    }

    #[test]
    fn test_cancelling_totals_are_degenerate() {
        let err = gini_from_slices(&[0.1, 0.2, -0.3], Some(&[1.0, 2.0, 3.0]), None, true)
            .unwrap_err();
        assert!(matches!(
            err,
            GiniError::DegenerateTotal {
                role: ColumnRole::Outcome,
                ..
            }
        ));

        let err = gini_from_slices(&[1.0, 2.0, 3.0], None, Some(&[0.1, 0.2, -0.3]), true)
            .unwrap_err();
        assert_eq!(
            err,
            GiniError::DegenerateTotal {
                column: "weight".to_string(),
                role: ColumnRole::Weight,
            }
        );
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let result = gini_from_slices(&[1.0e308, 1.0e308], None, None, true).unwrap();
        assert_eq!(result.coefficient, 0.0);
        assert_eq!(result.curve.cumulative_outcomes(), vec![0.5, 1.0]);

        let result =
            gini_from_slices(&[0.0, f64::MAX], None, Some(&[f64::MAX, f64::MAX]), true).unwrap();
        assert_close(result.coefficient, 0.5);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            gini_from_slices(&[], None, None, true).unwrap_err(),
            GiniError::EmptyDataset
        );
    }

    #[test]
    fn test_rejects_non_finite_and_ragged_columns() {
        let err = gini_from_slices(&[1.0, f64::NAN], None, None, true).unwrap_err();
        assert!(matches!(err, GiniError::InvalidInputType(msg) if msg.contains("row 1")));

        let err = gini_from_slices(&[1.0, 2.0], Some(&[1.0]), None, true).unwrap_err();
        assert!(matches!(err, GiniError::InvalidInputType(msg) if msg.contains("rank")));
    }

    #[test]
    fn test_options_defaults() {
        let options = GiniOptions::new("loss");
        assert_eq!(options.effective_rank(), "loss");
        assert_eq!(options.effective_weight(), None);
        assert!(options.ascending);

        let options = GiniOptions::new("loss")
            .with_rank("")
            .with_weight("")
            .descending();
        assert_eq!(options.effective_rank(), "loss");
        assert_eq!(options.effective_weight(), None);
        assert!(!options.ascending);
    }

    #[test]
    fn test_calculator_on_frame() {
        let frame = DataFrame::new()
            .with_column("loss", vec![0.0, 100.0, 50.0, 0.0])
            .unwrap()
            .with_column("predicted", vec![0.1, 0.9, 0.5, 0.2])
            .unwrap()
            .with_column("exposure", vec![1.0, 0.5, 1.0, 0.5])
            .unwrap();

        let calculator = GiniCalculator::new(
            GiniOptions::new("loss")
                .with_rank("predicted")
                .with_weight("exposure"),
        );
        let result = calculator.compute(&frame).unwrap();

        let expected = gini_from_slices(
            &[0.0, 100.0, 50.0, 0.0],
            Some(&[0.1, 0.9, 0.5, 0.2]),
            Some(&[1.0, 0.5, 1.0, 0.5]),
            true,
        )
        .unwrap();
        assert_eq!(result, expected);
        assert_close(result.curve.last().unwrap().cumulative_weight, 1.0);
    }

    #[test]
    fn test_calculator_unknown_column() {
        let frame = DataFrame::from_f64_columns([("loss", vec![1.0, 2.0])]).unwrap();
        let err = gini(&frame, "loss", Some("predicted"), None, true).unwrap_err();
        assert_eq!(err, GiniError::UnknownColumn("predicted".to_string()));
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: GiniOptions = serde_json::from_str(r#"{"outcome": "income"}"#).unwrap();
        assert_eq!(options, GiniOptions::new("income"));
    }
}

//! Lorenz curve
//!
//! The Lorenz curve plots the cumulative share of the outcome against the
//! cumulative share of weight, with records ordered by rank. One point is
//! stored per record; the curve implicitly starts at the origin.

use serde::{Deserialize, Serialize};

/// Default number of points handed to a renderer
pub const DEFAULT_MAX_DISPLAY_POINTS: usize = 1000;

/// A single point on the Lorenz curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzPoint {
    /// Cumulative weight share (x axis)
    pub cumulative_weight: f64,
    /// Cumulative outcome share (y axis)
    pub cumulative_outcome: f64,
}

impl LorenzPoint {
    pub const ORIGIN: LorenzPoint = LorenzPoint {
        cumulative_weight: 0.0,
        cumulative_outcome: 0.0,
    };

    pub fn new(cumulative_weight: f64, cumulative_outcome: f64) -> Self {
        Self {
            cumulative_weight,
            cumulative_outcome,
        }
    }

    /// Vertical distance to the line of equality
    pub fn gap(&self) -> f64 {
        self.cumulative_weight - self.cumulative_outcome
    }
}

/// Ordered Lorenz curve points, one per sorted record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LorenzCurve {
    points: Vec<LorenzPoint>,
}

impl LorenzCurve {
    /// Build a curve from parallel cumulative sequences
    ///
    /// Extra values in the longer sequence are ignored.
    pub fn from_cumulative(cumulative_weight: &[f64], cumulative_outcome: &[f64]) -> Self {
        let points = cumulative_weight
            .iter()
            .zip(cumulative_outcome)
            .map(|(&w, &o)| LorenzPoint::new(w, o))
            .collect();
        Self { points }
    }

    /// Get the points
    pub fn points(&self) -> &[LorenzPoint] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the curve has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last point, which is (1, 1) for any valid computation
    pub fn last(&self) -> Option<&LorenzPoint> {
        self.points.last()
    }

    /// X coordinates for plotting
    pub fn cumulative_weights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_weight).collect()
    }

    /// Y coordinates for plotting
    pub fn cumulative_outcomes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_outcome).collect()
    }

    /// Points with the origin prepended
    pub fn with_origin(&self) -> Vec<LorenzPoint> {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.push(LorenzPoint::ORIGIN);
        points.extend_from_slice(&self.points);
        points
    }

    /// Stride used to thin the curve down for display
    ///
    /// `floor(n / max_points)` when the curve is longer than `max_points`,
    /// otherwise 1. A `max_points` of zero disables thinning.
    pub fn display_stride(&self, max_points: usize) -> usize {
        let n = self.points.len();
        if max_points == 0 || n <= max_points {
            1
        } else {
            n / max_points
        }
    }

    /// Every `display_stride`-th point, starting with the first
    pub fn subsample(&self, max_points: usize) -> LorenzCurve {
        let stride = self.display_stride(max_points);
        Self {
            points: self.points.iter().copied().step_by(stride).collect(),
        }
    }
}

//! The full reachable experiment domain.

use serde::{Deserialize, Serialize};

use crate::errors::{PpError, PpResult};
use crate::matrix::Matrix;

/// Per-dimension lower and upper bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Bounds {
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Width of each dimension (`upper - lower`).
    pub fn span(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| hi - lo)
            .collect()
    }
}

/// Every feature vector the campaign could ever propose, not just the ones
/// measured so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSpace {
    points: Matrix,
}

impl ExperimentSpace {
    pub fn new(points: Matrix) -> Self {
        Self { points }
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> PpResult<Self> {
        Ok(Self::new(Matrix::from_rows(rows)?))
    }

    pub fn dim(&self) -> usize {
        self.points.cols()
    }

    pub fn len(&self) -> usize {
        self.points.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &Matrix {
        &self.points
    }

    /// Column-wise min/max over the whole space.
    pub fn bounds(&self) -> PpResult<Bounds> {
        if self.points.is_empty() {
            return Err(PpError::Validation(
                "cannot compute bounds of an empty experiment space".to_string(),
            ));
        }
        // f64::min/max skip NaN, so the points are checked rather than the bounds
        if let Some(i) = self.points.as_slice().iter().position(|v| !v.is_finite()) {
            let cols = self.points.cols().max(1);
            return Err(PpError::Validation(format!(
                "experiment space point {} has a non-finite value in dimension {}",
                i / cols,
                i % cols
            )));
        }
        Ok(Bounds {
            lower: self.points.column_min(),
            upper: self.points.column_max(),
        })
    }
}

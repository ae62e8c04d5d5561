//! Fitted affine parameters and the six transforms derived from them.

use pp_types::{Bounds, Matrix, PpError, PpResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters fixed by one `fit_transform` call.
///
/// Inputs map to the unit cube via `lower`/`upper`; targets are standardized
/// with `mean`/`std`. A zero-width input dimension or a zero target deviation
/// uses a divisor of 1.0, so that dimension is shifted but not stretched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl ScalingParameters {
    /// Derive parameters from space bounds and training targets.
    pub fn fit(bounds: Bounds, targets: &Matrix) -> PpResult<Self> {
        if targets.is_empty() {
            return Err(PpError::Validation(
                "cannot standardize an empty set of targets".to_string(),
            ));
        }
        if targets.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(PpError::Validation(
                "training targets contain non-finite values".to_string(),
            ));
        }

        let params = Self {
            lower: bounds.lower,
            upper: bounds.upper,
            mean: targets.column_mean(),
            std: targets.column_std(),
        };

        for (j, span) in params.span().iter().enumerate() {
            if *span == 0.0 {
                debug!("Input dimension {} has zero range; leaving it unstretched", j);
            }
        }
        for (j, std) in params.std.iter().enumerate() {
            if *std == 0.0 {
                debug!("Target column {} is constant; leaving it unstretched", j);
            }
        }

        Ok(params)
    }

    pub fn input_dim(&self) -> usize {
        self.lower.len()
    }

    pub fn target_dim(&self) -> usize {
        self.mean.len()
    }

    fn span(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| hi - lo)
            .collect()
    }

    fn input_divisor(&self) -> Vec<f64> {
        self.span().into_iter().map(nonzero_or_one).collect()
    }

    fn target_divisor(&self) -> Vec<f64> {
        self.std.iter().copied().map(nonzero_or_one).collect()
    }

    /// `(x - lower) / (upper - lower)` per dimension.
    pub fn scale_x(&self, x: &Matrix) -> PpResult<Matrix> {
        self.validate()?;
        check_cols("inputs", x, self.input_dim())?;
        let div = self.input_divisor();
        Ok(x.map_columns(|j, v| (v - self.lower[j]) / div[j]))
    }

    /// `x * (upper - lower) + lower` per dimension.
    pub fn unscale_x(&self, x: &Matrix) -> PpResult<Matrix> {
        self.validate()?;
        check_cols("inputs", x, self.input_dim())?;
        let div = self.input_divisor();
        Ok(x.map_columns(|j, v| v * div[j] + self.lower[j]))
    }

    /// `(y - mean) / std` per target column.
    pub fn scale_y(&self, y: &Matrix) -> PpResult<Matrix> {
        self.validate()?;
        check_cols("targets", y, self.target_dim())?;
        let div = self.target_divisor();
        Ok(y.map_columns(|j, v| (v - self.mean[j]) / div[j]))
    }

    /// `y * std + mean` per target column.
    pub fn unscale_y(&self, y: &Matrix) -> PpResult<Matrix> {
        self.validate()?;
        check_cols("targets", y, self.target_dim())?;
        let div = self.target_divisor();
        Ok(y.map_columns(|j, v| v * div[j] + self.mean[j]))
    }

    /// Predictive mean back to target units; same affine map as `unscale_y`.
    pub fn unscale_mean(&self, mean: &Matrix) -> PpResult<Matrix> {
        self.unscale_y(mean)
    }

    /// Predictive variance back to target units: `variance * std^2`.
    ///
    /// Variance ignores the shift and scales with the square of the factor.
    pub fn unscale_variance(&self, variance: &Matrix) -> PpResult<Matrix> {
        self.validate()?;
        check_cols("variances", variance, self.target_dim())?;
        let div = self.target_divisor();
        Ok(variance.map_columns(|j, v| v * div[j] * div[j]))
    }

    pub fn to_json(&self) -> PpResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> PpResult<Self> {
        let params: Self = serde_json::from_str(raw)?;
        params.validate()?;
        Ok(params)
    }

    /// Bounds and target statistics must pair up and be finite.
    pub fn validate(&self) -> PpResult<()> {
        if self.upper.len() != self.lower.len() {
            return Err(PpError::Validation(format!(
                "scaling parameters have {} lower but {} upper bounds",
                self.lower.len(),
                self.upper.len()
            )));
        }
        if self.std.len() != self.mean.len() {
            return Err(PpError::Validation(format!(
                "scaling parameters have {} means but {} deviations",
                self.mean.len(),
                self.std.len()
            )));
        }
        if self
            .lower
            .iter()
            .chain(&self.upper)
            .chain(&self.mean)
            .chain(&self.std)
            .any(|v| !v.is_finite())
        {
            return Err(PpError::Validation(
                "scaling parameters contain non-finite values".to_string(),
            ));
        }
        Ok(())
    }
}

fn nonzero_or_one(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}

fn check_cols(what: &str, m: &Matrix, expected: usize) -> PpResult<()> {
    if m.cols() != expected {
        return Err(PpError::Validation(format!(
            "{what} have {} columns, scaler was fitted for {expected}",
            m.cols()
        )));
    }
    Ok(())
}

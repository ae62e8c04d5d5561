//! The normalization contract shared by every scaler strategy.

use pp_types::{ExperimentSpace, Matrix, PpError, PpResult};

use crate::params::ScalingParameters;

/// Common trait for all scalers.
///
/// A scaler is built from the full experiment space, fitted once per
/// training set, and then reused read-only. Fitting takes `&mut self`, so a
/// shared scaler cannot be re-fitted while transforms are running.
pub trait Scaler: Send + Sync {
    /// Registry name of the strategy.
    fn name(&self) -> &str;

    /// The experiment space the input bounds are taken from.
    fn space(&self) -> &ExperimentSpace;

    /// Parameters from the most recent fit, if any.
    fn parameters(&self) -> Option<&ScalingParameters>;

    /// Fit on training data and return it scaled. Re-fitting replaces the
    /// previous parameters.
    fn fit_transform(&mut self, inputs: &Matrix, targets: &Matrix) -> PpResult<(Matrix, Matrix)>;

    fn is_fitted(&self) -> bool {
        self.parameters().is_some()
    }

    /// Scale model inputs with the fitted parameters.
    fn transform(&self, inputs: &Matrix) -> PpResult<Matrix> {
        fitted_parameters(self, "transform")?.scale_x(inputs)
    }

    /// Map a predictive mean and variance back to target units.
    fn untransform(&self, mean: &Matrix, variance: &Matrix) -> PpResult<(Matrix, Matrix)> {
        let params = fitted_parameters(self, "untransform")?;
        if mean.rows() != variance.rows() || mean.cols() != variance.cols() {
            return Err(PpError::Validation(format!(
                "mean is {}x{} but variance is {}x{}",
                mean.rows(),
                mean.cols(),
                variance.rows(),
                variance.cols()
            )));
        }
        Ok((params.unscale_mean(mean)?, params.unscale_variance(variance)?))
    }
}

fn fitted_parameters<'a, S: Scaler + ?Sized>(
    scaler: &'a S,
    operation: &str,
) -> PpResult<&'a ScalingParameters> {
    scaler
        .parameters()
        .ok_or_else(|| PpError::not_fitted(scaler.name(), operation))
}

/// A concrete scaler that can be registered under a fixed name.
pub trait ScalerStrategy: Scaler + Sized + 'static {
    /// Unique registry name.
    const NAME: &'static str;

    fn build(space: ExperimentSpace) -> PpResult<Self>;
}

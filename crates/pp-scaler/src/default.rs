//! Unit-cube inputs and standardized targets.

use pp_types::{ExperimentSpace, Matrix, PpError, PpResult};
use tracing::debug;

use crate::params::ScalingParameters;
use crate::scaler::{Scaler, ScalerStrategy};

/// Min-max scales each input dimension to `[0, 1]` using the bounds of the
/// whole experiment space, and standardizes targets to zero mean and unit
/// (population) variance.
///
/// Because the bounds come from the space rather than the observed subset,
/// input scaling stays put across re-fits.
#[derive(Debug, Clone)]
pub struct DefaultScaler {
    space: ExperimentSpace,
    params: Option<ScalingParameters>,
}

impl DefaultScaler {
    pub fn new(space: ExperimentSpace) -> Self {
        Self {
            space,
            params: None,
        }
    }

    /// Restore a fitted scaler from saved parameters.
    pub fn from_parameters(space: ExperimentSpace, params: ScalingParameters) -> PpResult<Self> {
        params.validate()?;
        if params.input_dim() != space.dim() {
            return Err(PpError::Validation(format!(
                "parameters cover {} input dimensions, space has {}",
                params.input_dim(),
                space.dim()
            )));
        }
        Ok(Self {
            space,
            params: Some(params),
        })
    }
}

impl Scaler for DefaultScaler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn space(&self) -> &ExperimentSpace {
        &self.space
    }

    fn parameters(&self) -> Option<&ScalingParameters> {
        self.params.as_ref()
    }

    fn fit_transform(&mut self, inputs: &Matrix, targets: &Matrix) -> PpResult<(Matrix, Matrix)> {
        if inputs.cols() != self.space.dim() {
            return Err(PpError::Validation(format!(
                "inputs have {} columns, experiment space has {}",
                inputs.cols(),
                self.space.dim()
            )));
        }
        if inputs.rows() != targets.rows() {
            return Err(PpError::Validation(format!(
                "{} input rows but {} target rows",
                inputs.rows(),
                targets.rows()
            )));
        }

        let bounds = self.space.bounds()?;
        let params = ScalingParameters::fit(bounds, targets)?;
        let scaled = (params.scale_x(inputs)?, params.scale_y(targets)?);

        debug!(
            "Fitted {} scaler on {} observations (lower={:?}, upper={:?}, mean={:?}, std={:?})",
            Self::NAME,
            inputs.rows(),
            params.lower,
            params.upper,
            params.mean,
            params.std
        );
        self.params = Some(params);
        Ok(scaled)
    }
}

impl ScalerStrategy for DefaultScaler {
    const NAME: &'static str = "DEFAULT";

    fn build(space: ExperimentSpace) -> PpResult<Self> {
        Ok(Self::new(space))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn one_dim_space() -> ExperimentSpace {
        ExperimentSpace::from_rows(&[[0.0], [2.5], [5.0], [7.5], [10.0]]).unwrap()
    }

    #[test]
    fn unfitted_transforms_fail() {
        let scaler = DefaultScaler::new(one_dim_space());
        assert!(!scaler.is_fitted());

        let x = Matrix::column(&[5.0]);
        match scaler.transform(&x) {
            Err(PpError::NotFitted { scaler, operation }) => {
                assert_eq!(scaler, "DEFAULT");
                assert_eq!(operation, "transform");
            }
            other => panic!("expected NotFitted, got {other:?}"),
        }
        assert!(matches!(
            scaler.untransform(&x, &x),
            Err(PpError::NotFitted { .. })
        ));
    }

    #[test]
    fn fit_uses_space_bounds_not_training_inputs() {
        let mut scaler = DefaultScaler::new(one_dim_space());
        let inputs = Matrix::column(&[2.5, 5.0, 7.5]);
        let targets = Matrix::column(&[2.0, 4.0, 6.0]);

        let (x, y) = scaler.fit_transform(&inputs, &targets).unwrap();
        assert_eq!(x.as_slice(), &[0.25, 0.5, 0.75]);
        assert!(y.as_slice()[1].abs() < EPS);
        assert!((y.as_slice()[0] + y.as_slice()[2]).abs() < EPS);

        let t = scaler.transform(&Matrix::column(&[5.0])).unwrap();
        assert!((t.as_slice()[0] - 0.5).abs() < EPS);

        let (mean, var) = scaler
            .untransform(&Matrix::column(&[0.0]), &Matrix::column(&[1.0]))
            .unwrap();
        assert!((mean.as_slice()[0] - 4.0).abs() < EPS);
        assert!((var.as_slice()[0] - 8.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn refit_replaces_target_statistics() {
        let mut scaler = DefaultScaler::new(one_dim_space());
        scaler
            .fit_transform(&Matrix::column(&[0.0, 10.0]), &Matrix::column(&[1.0, 3.0]))
            .unwrap();
        assert_eq!(scaler.parameters().unwrap().mean, vec![2.0]);

        scaler
            .fit_transform(&Matrix::column(&[5.0, 7.5]), &Matrix::column(&[10.0, 30.0]))
            .unwrap();
        let params = scaler.parameters().unwrap();
        assert_eq!(params.mean, vec![20.0]);
        assert_eq!(params.lower, vec![0.0]);
        assert_eq!(params.upper, vec![10.0]);
    }

    #[test]
    fn failed_fit_keeps_previous_parameters() {
        let mut scaler = DefaultScaler::new(one_dim_space());
        scaler
            .fit_transform(&Matrix::column(&[0.0, 10.0]), &Matrix::column(&[1.0, 3.0]))
            .unwrap();

        let err = scaler
            .fit_transform(&Matrix::column(&[0.0]), &Matrix::column(&[f64::NAN]))
            .unwrap_err();
        assert!(matches!(err, PpError::Validation(_)));
        assert_eq!(scaler.parameters().unwrap().mean, vec![2.0]);
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let mut scaler = DefaultScaler::new(one_dim_space());
        let wide = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        assert!(scaler.fit_transform(&wide, &Matrix::column(&[1.0])).is_err());
        assert!(scaler
            .fit_transform(&Matrix::column(&[1.0, 2.0]), &Matrix::column(&[1.0]))
            .is_err());

        scaler
            .fit_transform(&Matrix::column(&[1.0, 2.0]), &Matrix::column(&[1.0, 2.0]))
            .unwrap();
        let mean = Matrix::column(&[0.0, 1.0]);
        let variance = Matrix::column(&[1.0]);
        assert!(matches!(
            scaler.untransform(&mean, &variance),
            Err(PpError::Validation(_))
        ));
    }

    #[test]
    fn restore_from_saved_parameters() {
        let mut scaler = DefaultScaler::new(one_dim_space());
        scaler
            .fit_transform(&Matrix::column(&[0.0, 10.0]), &Matrix::column(&[1.0, 3.0]))
            .unwrap();
        let saved = scaler.parameters().unwrap().to_json().unwrap();

        let params = ScalingParameters::from_json(&saved).unwrap();
        let restored = DefaultScaler::from_parameters(one_dim_space(), params).unwrap();
        let x = Matrix::column(&[2.5]);
        assert_eq!(restored.transform(&x).unwrap(), scaler.transform(&x).unwrap());

        let two_dim = ExperimentSpace::from_rows(&[[0.0, 0.0]]).unwrap();
        let params = ScalingParameters::from_json(&saved).unwrap();
        assert!(DefaultScaler::from_parameters(two_dim, params).is_err());
    }

    #[test]
    fn restore_rejects_mismatched_bounds() {
        let two_dim = ExperimentSpace::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
        let params = ScalingParameters {
            lower: vec![0.0, 0.0],
            upper: vec![1.0],
            mean: vec![0.0],
            std: vec![1.0],
        };
        assert!(matches!(
            DefaultScaler::from_parameters(two_dim.clone(), params),
            Err(PpError::Validation(_))
        ));

        let params = ScalingParameters {
            lower: vec![0.0, 0.0],
            upper: vec![1.0, 1.0],
            mean: vec![0.0, 1.0],
            std: vec![1.0],
        };
        assert!(matches!(
            DefaultScaler::from_parameters(two_dim, params),
            Err(PpError::Validation(_))
        ));
    }
}

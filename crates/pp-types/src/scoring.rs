//! The seam between selection strategies and whatever model estimates the
//! value of running a candidate.

use crate::errors::PpResult;
use crate::matrix::CandidateBatch;

/// Scores batches of candidate groups. Higher is better.
///
/// Implementations receive a `(batch, group, dim)` array and must return one
/// score per batch element. Fitting the model behind the scores is the
/// caller's business.
pub trait ScoringFunction: Send + Sync {
    fn score(&self, batch: &CandidateBatch) -> PpResult<Vec<f64>>;
}

impl<F> ScoringFunction for F
where
    F: Fn(&CandidateBatch) -> Vec<f64> + Send + Sync,
{
    fn score(&self, batch: &CandidateBatch) -> PpResult<Vec<f64>> {
        Ok(self(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use std::sync::Arc;

    #[test]
    fn closures_are_scoring_functions() {
        let sum_of_features = |batch: &CandidateBatch| -> Vec<f64> {
            (0..batch.batch_size())
                .map(|i| batch.element(i).map(|e| e.iter().sum()).unwrap_or(0.0))
                .collect()
        };
        let scoring: Arc<dyn ScoringFunction> = Arc::new(sum_of_features);

        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let scores = scoring.score(&CandidateBatch::singleton_groups(&m)).unwrap();
        assert_eq!(scores, vec![3.0, 7.0]);
    }
}

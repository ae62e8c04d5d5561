//! The selection contract shared by every recommender strategy.

use pp_types::{CandidateTable, PpError, PpResult, ScoringFunction, Selection};
use std::sync::Arc;

/// Common trait for all recommenders.
///
/// A recommender picks which untested candidates should be run next. It holds
/// no per-call state, so one instance can serve concurrent `recommend` calls
/// as long as its scoring function is reentrant.
pub trait Recommender: Send + Sync {
    /// Registry name of the strategy.
    fn name(&self) -> &str;

    /// Select `batch_quantity` candidates to run in parallel.
    ///
    /// The returned ids are unique and drawn from `candidates`. The table is
    /// never modified.
    fn recommend(&self, candidates: &CandidateTable, batch_quantity: usize) -> PpResult<Selection>;
}

/// Construction arguments handed to a strategy by the registry.
#[derive(Clone, Default)]
pub struct RecommenderArgs {
    /// Scores candidates; strategies that ignore the model accept `None`.
    pub scoring: Option<Arc<dyn ScoringFunction>>,
    /// Seed for sampling strategies.
    pub seed: Option<u64>,
}

impl RecommenderArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scoring(mut self, scoring: Arc<dyn ScoringFunction>) -> Self {
        self.scoring = Some(scoring);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl std::fmt::Debug for RecommenderArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommenderArgs")
            .field("scoring", &self.scoring.as_ref().map(|_| "<scoring function>"))
            .field("seed", &self.seed)
            .finish()
    }
}

/// A concrete recommender that can be registered under a fixed name.
pub trait RecommenderStrategy: Recommender + Sized + 'static {
    /// Unique registry name.
    const NAME: &'static str;

    /// Build the strategy from registry arguments. Missing optional
    /// arguments surface when the strategy is used, not here.
    fn build(args: RecommenderArgs) -> PpResult<Self>;
}

/// Reject batch sizes below one.
pub(crate) fn check_batch_quantity(batch_quantity: usize) -> PpResult<()> {
    if batch_quantity == 0 {
        return Err(PpError::Validation(
            "batch_quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

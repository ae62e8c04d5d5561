//! Marginal ranking: score every candidate on its own and keep the best.

use pp_types::{CandidateTable, PpError, PpResult, ScoringFunction, Selection};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::recommender::{check_batch_quantity, Recommender, RecommenderArgs, RecommenderStrategy};

/// Ranks candidates by their individual (marginal) score and returns the top
/// `batch_quantity`.
///
/// Each candidate is scored as a parallel group of one, so interactions
/// inside the selected batch are ignored. Ties keep table order, which makes
/// the selection reproducible for identical scores and input order.
#[derive(Clone)]
pub struct MarginalRankingRecommender {
    scoring: Option<Arc<dyn ScoringFunction>>,
}

impl MarginalRankingRecommender {
    pub fn new(scoring: Arc<dyn ScoringFunction>) -> Self {
        Self {
            scoring: Some(scoring),
        }
    }

    /// Instance without a scoring function; `recommend` fails until one is
    /// attached.
    pub fn unattached() -> Self {
        Self { scoring: None }
    }

    pub fn with_scoring(mut self, scoring: Arc<dyn ScoringFunction>) -> Self {
        self.scoring = Some(scoring);
        self
    }

    /// Table positions sorted by score, best first.
    pub fn rank(&self, candidates: &CandidateTable) -> PpResult<Vec<usize>> {
        let scoring = self.scoring.as_ref().ok_or_else(|| {
            PpError::Instantiation(format!("{} recommender has no scoring function", Self::NAME))
        })?;

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let batch = candidates.to_batch();
        let scores = scoring.score(&batch)?;
        if scores.len() != candidates.len() {
            return Err(PpError::Scoring(format!(
                "expected {} scores, got {}",
                candidates.len(),
                scores.len()
            )));
        }

        let nan_count = scores.iter().filter(|s| s.is_nan()).count();
        if nan_count > 0 {
            warn!("{nan_count} candidates scored NaN; ranking them last");
        }

        let mut positions: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable, so equal scores keep table order
        positions.sort_by(|&a, &b| descending(scores[a], scores[b]));
        Ok(positions)
    }
}

/// Higher scores first; NaN after every number.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

impl std::fmt::Debug for MarginalRankingRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarginalRankingRecommender")
            .field("has_scoring", &self.scoring.is_some())
            .finish()
    }
}

impl Recommender for MarginalRankingRecommender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn recommend(&self, candidates: &CandidateTable, batch_quantity: usize) -> PpResult<Selection> {
        check_batch_quantity(batch_quantity)?;

        let mut ranked = self.rank(candidates)?;
        if batch_quantity > ranked.len() {
            warn!(
                "batch_quantity {} exceeds pool of {} candidates; returning the whole pool",
                batch_quantity,
                ranked.len()
            );
        }
        ranked.truncate(batch_quantity);

        let ids = candidates.ids_at(&ranked)?;
        debug!("{} selected {} of {} candidates", Self::NAME, ids.len(), candidates.len());
        Ok(Selection::new(ids))
    }
}

impl RecommenderStrategy for MarginalRankingRecommender {
    const NAME: &'static str = "UNRESTRICTED_RANKING";

    fn build(args: RecommenderArgs) -> PpResult<Self> {
        Ok(Self {
            scoring: args.scoring,
        })
    }
}

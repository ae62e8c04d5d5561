//! Uniform random selection, the model-free baseline.

use pp_types::{CandidateTable, PpResult, Selection};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::recommender::{check_batch_quantity, Recommender, RecommenderArgs, RecommenderStrategy};

/// Draws `batch_quantity` distinct candidates uniformly at random.
///
/// Asking for more candidates than the pool holds is a
/// [`PpError::Sampling`](pp_types::PpError::Sampling) error. Without a seed
/// every call draws from the thread RNG; with one, each call replays the same
/// ChaCha stream.
#[derive(Debug, Clone, Default)]
pub struct RandomRecommender {
    seed: Option<u64>,
}

impl RandomRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Same as [`Recommender::recommend`] but drawing from a caller-owned RNG.
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        candidates: &CandidateTable,
        batch_quantity: usize,
        rng: &mut R,
    ) -> PpResult<Selection> {
        check_batch_quantity(batch_quantity)?;
        let ids = candidates.sample(batch_quantity, rng)?;
        debug!("{} drew {} of {} candidates", Self::NAME, ids.len(), candidates.len());
        Ok(Selection::new(ids))
    }
}

impl Recommender for RandomRecommender {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn recommend(&self, candidates: &CandidateTable, batch_quantity: usize) -> PpResult<Selection> {
        match self.seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                self.recommend_with_rng(candidates, batch_quantity, &mut rng)
            }
            None => self.recommend_with_rng(candidates, batch_quantity, &mut rand::rng()),
        }
    }
}

impl RecommenderStrategy for RandomRecommender {
    const NAME: &'static str = "RANDOM";

    fn build(args: RecommenderArgs) -> PpResult<Self> {
        // the scoring function, if any, is ignored
        Ok(Self { seed: args.seed })
    }
}

//! # pp-recommender
//!
//! Selection strategies that decide which candidate experiments to run next.
//!
//! Provides the [`Recommender`] contract, marginal ranking and random
//! strategies, and a [`RecommenderRegistry`] for name-based construction from
//! configuration.

mod random;
mod ranking;
mod recommender;
mod registry;

pub use random::RandomRecommender;
pub use ranking::MarginalRankingRecommender;
pub use recommender::{Recommender, RecommenderArgs, RecommenderStrategy};
pub use registry::{RecommenderFactory, RecommenderRegistry};

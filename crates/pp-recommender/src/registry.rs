//! Name-based construction of recommenders.

use pp_types::{PpError, PpResult, SelectionConfig};
use std::collections::HashMap;
use tracing::info;

use crate::random::RandomRecommender;
use crate::ranking::MarginalRankingRecommender;
use crate::recommender::{Recommender, RecommenderArgs, RecommenderStrategy};

/// Builds a boxed recommender from construction arguments.
pub type RecommenderFactory =
    Box<dyn Fn(RecommenderArgs) -> PpResult<Box<dyn Recommender>> + Send + Sync>;

/// Append-only map from strategy name to constructor.
///
/// The orchestration layer owns the registry; strategies are added by explicit
/// `register` calls, usually once through [`RecommenderRegistry::with_defaults`].
#[derive(Default)]
pub struct RecommenderRegistry {
    factories: HashMap<String, RecommenderFactory>,
}

impl RecommenderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in strategies.
    pub fn with_defaults() -> PpResult<Self> {
        let mut registry = Self::new();
        registry.register::<MarginalRankingRecommender>()?;
        registry.register::<RandomRecommender>()?;
        Ok(registry)
    }

    /// Register a strategy under its `NAME`.
    pub fn register<T: RecommenderStrategy>(&mut self) -> PpResult<()> {
        self.register_factory(
            T::NAME,
            Box::new(|args: RecommenderArgs| -> PpResult<Box<dyn Recommender>> {
                Ok(Box::new(T::build(args)?) as Box<dyn Recommender>)
            }),
        )
    }

    /// Register an arbitrary constructor. Names must be unique.
    pub fn register_factory(&mut self, name: &str, factory: RecommenderFactory) -> PpResult<()> {
        if self.factories.contains_key(name) {
            return Err(PpError::Configuration(format!(
                "recommender strategy {name} is already registered"
            )));
        }
        self.factories.insert(name.to_string(), factory);
        info!("Registered recommender strategy {}", name);
        Ok(())
    }

    /// Instantiate the strategy registered under `name`.
    pub fn create(&self, name: &str, args: RecommenderArgs) -> PpResult<Box<dyn Recommender>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            PpError::Configuration(format!(
                "unknown recommender strategy {name}; known: {}",
                self.names().join(", ")
            ))
        })?;
        factory(args)
    }

    /// Instantiate the recommender named in `config`, threading its seed.
    pub fn from_config(
        &self,
        config: &SelectionConfig,
        args: RecommenderArgs,
    ) -> PpResult<Box<dyn Recommender>> {
        config.validate()?;
        let args = match config.seed {
            Some(seed) => args.with_seed(seed),
            None => args,
        };
        self.create(&config.recommender, args)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for RecommenderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommenderRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

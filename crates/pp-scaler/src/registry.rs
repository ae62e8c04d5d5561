//! Name-based construction of scalers.

use pp_types::{ExperimentSpace, PpError, PpResult, SelectionConfig};
use std::collections::HashMap;
use tracing::info;

use crate::default::DefaultScaler;
use crate::scaler::{Scaler, ScalerStrategy};

/// Builds a boxed scaler for an experiment space.
pub type ScalerFactory = Box<dyn Fn(ExperimentSpace) -> PpResult<Box<dyn Scaler>> + Send + Sync>;

/// Append-only map from scaler name to constructor, owned by the caller.
#[derive(Default)]
pub struct ScalerRegistry {
    factories: HashMap<String, ScalerFactory>,
}

impl ScalerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in scalers.
    pub fn with_defaults() -> PpResult<Self> {
        let mut registry = Self::new();
        registry.register::<DefaultScaler>()?;
        Ok(registry)
    }

    pub fn register<T: ScalerStrategy>(&mut self) -> PpResult<()> {
        self.register_factory(
            T::NAME,
            Box::new(|space: ExperimentSpace| -> PpResult<Box<dyn Scaler>> {
                Ok(Box::new(T::build(space)?) as Box<dyn Scaler>)
            }),
        )
    }

    pub fn register_factory(&mut self, name: &str, factory: ScalerFactory) -> PpResult<()> {
        if self.factories.contains_key(name) {
            return Err(PpError::Configuration(format!(
                "scaler strategy {name} is already registered"
            )));
        }
        self.factories.insert(name.to_string(), factory);
        info!("Registered scaler strategy {}", name);
        Ok(())
    }

    pub fn create(&self, name: &str, space: ExperimentSpace) -> PpResult<Box<dyn Scaler>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            PpError::Configuration(format!(
                "unknown scaler strategy {name}; known: {}",
                self.names().join(", ")
            ))
        })?;
        factory(space)
    }

    pub fn from_config(
        &self,
        config: &SelectionConfig,
        space: ExperimentSpace,
    ) -> PpResult<Box<dyn Scaler>> {
        config.validate()?;
        self.create(&config.scaler, space)
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

impl std::fmt::Debug for ScalerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalerRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

//! Configuration naming the strategies an optimization round should use.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PpError, PpResult};

/// Registry name of the marginal ranking recommender.
pub const DEFAULT_RECOMMENDER: &str = "UNRESTRICTED_RANKING";

/// Registry name of the min-max / standardizing scaler.
pub const DEFAULT_SCALER: &str = "DEFAULT";

/// Which recommender and scaler to build, and how many candidates to pick per
/// round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Recommender strategy name, e.g. "UNRESTRICTED_RANKING" or "RANDOM".
    pub recommender: String,

    /// Scaler strategy name, e.g. "DEFAULT".
    pub scaler: String,

    /// Number of experiments to run in parallel per round.
    pub batch_quantity: usize,

    /// Seed for strategies that sample. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            recommender: DEFAULT_RECOMMENDER.to_string(),
            scaler: DEFAULT_SCALER.to_string(),
            batch_quantity: 1,
            seed: None,
        }
    }
}

impl SelectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recommender(mut self, name: &str) -> Self {
        self.recommender = name.to_string();
        self
    }

    pub fn with_scaler(mut self, name: &str) -> Self {
        self.scaler = name.to_string();
        self
    }

    pub fn with_batch_quantity(mut self, n: usize) -> Self {
        self.batch_quantity = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> PpResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        debug!(
            "Loaded selection config: recommender={}, scaler={}, batch_quantity={}",
            config.recommender, config.scaler, config.batch_quantity
        );
        Ok(config)
    }

    pub fn validate(&self) -> PpResult<()> {
        if self.recommender.trim().is_empty() {
            return Err(PpError::Configuration(
                "recommender name must not be empty".to_string(),
            ));
        }
        if self.scaler.trim().is_empty() {
            return Err(PpError::Configuration(
                "scaler name must not be empty".to_string(),
            ));
        }
        if self.batch_quantity == 0 {
            return Err(PpError::Configuration(
                "batch_quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

//! # pp-scaler
//!
//! Numerical conditioning for the surrogate model behind a scoring function:
//! inputs are normalized against the full experiment space, targets are
//! standardized, and predictive means and variances are mapped back to
//! physical units.

mod default;
mod params;
mod registry;
mod scaler;

pub use default::DefaultScaler;
pub use params::ScalingParameters;
pub use registry::{ScalerFactory, ScalerRegistry};
pub use scaler::{Scaler, ScalerStrategy};

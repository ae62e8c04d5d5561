//! # pp-types
//!
//! Shared data model for Pipette: dense matrices, candidate tables, the
//! experiment space, the scoring-function seam, errors and configuration.

pub mod candidates;
pub mod config;
pub mod errors;
pub mod logging;
pub mod matrix;
pub mod scoring;
pub mod space;

pub use candidates::*;
pub use config::*;
pub use errors::*;
pub use logging::init_logging;
pub use matrix::*;
pub use scoring::*;
pub use space::*;

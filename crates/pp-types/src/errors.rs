use thiserror::Error;

/// Main error type for Pipette
#[derive(Error, Debug)]
pub enum PpError {
    #[error("Instantiation error: {0}")]
    Instantiation(String),

    #[error("Scaler {scaler} must be fitted before {operation}")]
    NotFitted { scaler: String, operation: String },

    #[error("Sampling error: requested {requested} candidates without replacement, but only {available} available")]
    Sampling { requested: usize, available: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scoring function error: {0}")]
    Scoring(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PpError {
    pub fn not_fitted(scaler: &str, operation: &str) -> Self {
        PpError::NotFitted {
            scaler: scaler.to_string(),
            operation: operation.to_string(),
        }
    }
}

/// Result type alias for Pipette operations
pub type PpResult<T> = Result<T, PpError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::PpError::Validation(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::PpError::Configuration(format!($($arg)*))
    };
}

//! Tracing subscriber setup for binaries and test harnesses embedding Pipette.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `pp_recommender=debug`.
pub const LOG_ENV_VAR: &str = "PIPETTE_LOG";

/// Install a fmt subscriber filtered by `PIPETTE_LOG`, falling back to
/// `default_directive`. Returns `false` if a global subscriber already exists.
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let _ = init_logging("info");
        assert!(!init_logging("debug"));
        tracing::info!("logging initialised");
    }
}

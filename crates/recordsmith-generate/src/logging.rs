use tracing_subscriber::EnvFilter;

use crate::errors::{Result, TemplateError};

/// Install a global fmt subscriber filtered by `directives`
/// (e.g. `"recordsmith_generate=debug"`).
pub fn init_logging(directives: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(directives).map_err(|err| TemplateError::Config(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| TemplateError::Config(err.to_string()))
}

/// Logging for tests: honors `RUST_LOG`, writes through the test harness
/// capture, and tolerates being called more than once.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

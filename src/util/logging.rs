// StaleSweep - util/logging.rs
//
// Diagnostic logging setup. This is the developer-facing tracing channel on
// stderr, entirely separate from the run log (`core::report`), which is the
// user-facing artifact that gets emailed.
//
// Activation: RUST_LOG=debug (or trace). Never logs credentials at any level.

use tracing_subscriber::EnvFilter;

/// Initialise the diagnostic logging subsystem.
///
/// Priority: RUST_LOG env var > default "info".
pub fn init() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}

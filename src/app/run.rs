// StaleSweep - app/run.rs
//
// Run orchestration: load config -> sweep -> notify, strictly in order.
//
// The failure path is explicit and two-armed: a fatal error is appended to
// the run log as `FATAL: <error>`, then a best-effort notification is
// attempted with whatever configuration was successfully loaded. When the
// config itself never loaded there is nothing to send with, so the
// notification step degrades to a no-op instead of dereferencing a config
// that does not exist.

use crate::app::notify;
use crate::core::model::CleanupConfig;
use crate::core::report::RunLog;
use crate::core::scanner;
use crate::platform::config;
use crate::util::constants;
use crate::util::error::StaleSweepError;
use std::path::Path;

/// Execute one full cleanup run. Returns the process exit code:
/// `0` on full success, `1` on any fatal error.
pub fn run(config_path: &Path, log_path: &Path) -> i32 {
    let run_log = RunLog::new(log_path);

    match execute(config_path, &run_log) {
        Ok(()) => 0,
        Err((error, loaded)) => {
            tracing::error!(error = %error, "Run failed");
            if let Err(log_err) = run_log.append(&format!("FATAL: {error}")) {
                tracing::warn!(error = %log_err, "Could not record fatal error in run log");
            }
            // Best-effort failure report; no-op when config never loaded,
            // and the notifier itself can never raise.
            if let Some(config) = loaded {
                notify::notify(&config, &run_log);
            }
            1
        }
    }
}

/// The happy path. Failures carry the loaded configuration (when there is
/// one) back to `run` so the fatal branch can still attempt notification.
fn execute(
    config_path: &Path,
    run_log: &RunLog,
) -> Result<(), (StaleSweepError, Option<CleanupConfig>)> {
    let config = config::load_config(config_path).map_err(|e| (e.into(), None))?;

    // First observable run-log action after a successful config load.
    run_log
        .append(constants::RUN_START_MARKER)
        .map_err(|e| (StaleSweepError::Report(e), Some(config.clone())))?;

    let outcome = scanner::sweep(&config.target_path, config.days_threshold, run_log)
        .map_err(|e| (e.into(), Some(config.clone())))?;

    tracing::info!(
        examined = outcome.files_examined,
        deleted = outcome.deleted.len(),
        kept = outcome.files_kept(),
        failed = outcome.failures.len(),
        "Cleanup finished"
    );

    notify::notify(&config, run_log);
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

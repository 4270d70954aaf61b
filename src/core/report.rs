// StaleSweep - core/report.rs
//
// The append-only run log: the user-facing record of what a run deleted,
// and the file the notifier attaches to the report email.
//
// Each append is a fully independent open/append/close cycle, so every line
// is durable on its own and the file never sits open across components. The
// file grows monotonically; rotation is out of scope.

use crate::util::constants;
use crate::util::error::ReportError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Handle to the run log file. Holds the path only; no open file descriptor
/// is retained between appends.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file, for attachment at send time.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one `[<local timestamp>] <message>` line.
    ///
    /// Creates the file on first use. A failed open or write propagates to
    /// the caller; there is no retry.
    pub fn append(&self, message: &str) -> Result<(), ReportError> {
        let timestamp = chrono::Local::now().format(constants::RUN_LOG_TIMESTAMP_FORMAT);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| ReportError {
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "[{timestamp}] {message}").map_err(|source| ReportError {
            path: self.path.clone(),
            source,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

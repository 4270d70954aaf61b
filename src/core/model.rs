// StaleSweep - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

// =============================================================================
// Configuration
// =============================================================================

/// Validated run configuration, loaded once per run and never mutated.
///
/// Built by `platform::config::load_config` from `config.toml` and passed by
/// reference into each component; there are no process-wide singletons.
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Root of the directory tree to sweep. Separator-normalized and verified
    /// to be an existing directory at load time.
    pub target_path: PathBuf,

    /// Age threshold in days. Files with a last-modified time strictly older
    /// than `now - days_threshold * 86 400 s` are deleted.
    pub days_threshold: u32,

    /// Optional email report settings. `None` means the `[email]` table was
    /// absent from the configuration.
    pub email: Option<EmailConfig>,
}

/// SMTP report delivery settings from the `[email]` config table.
///
/// Credentials are plain text by design; secure credential storage is out of
/// scope.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// When false the notifier is a complete no-op: no log line, no
    /// connection attempt.
    pub enabled: bool,

    /// Sender address, also used as the SMTP authentication user.
    pub sender_email: String,

    /// Recipient address.
    pub recipient_email: String,

    /// SMTP server host name.
    pub smtp_host: String,

    /// SMTP server port.
    pub smtp_port: u16,

    /// Upgrade the connection via STARTTLS before authenticating.
    pub use_tls: bool,

    /// SMTP authentication password.
    pub sender_password: String,
}

// =============================================================================
// Sweep outcome
// =============================================================================

/// Explicit result of a completed sweep.
///
/// Per-file failures are values here, not exceptions: the walk completing is
/// what "success" means, independent of how many individual deletions failed.
#[derive(Debug)]
pub struct SweepOutcome {
    /// Files removed this run, in walk order.
    pub deleted: Vec<PathBuf>,

    /// Files that could not be evaluated or removed, plus traversal errors.
    pub failures: Vec<DeletionFailure>,

    /// Regular files whose modification time was compared against the cutoff.
    pub files_examined: usize,

    /// The timestamp boundary used for this sweep. Files strictly older were
    /// eligible for deletion.
    pub cutoff: DateTime<Utc>,
}

impl SweepOutcome {
    /// Files examined but retained (not older than the cutoff and not failed).
    pub fn files_kept(&self) -> usize {
        self.files_examined - self.deleted.len()
            - self
                .failures
                .iter()
                .filter(|f| f.kind == FailureKind::File)
                .count()
    }
}

/// A single non-fatal sweep failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    /// Path of the affected file or directory entry.
    pub path: PathBuf,

    /// Human-readable cause, as written to the run log for file failures.
    pub message: String,

    /// What kind of entry failed.
    pub kind: FailureKind,
}

/// Classifies a `DeletionFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A regular file was reached but could not be evaluated or removed.
    /// Recorded in the run log as `Error deleting <path>: <error>`.
    File,

    /// The walker could not access a directory entry at all. Diagnostic-only;
    /// no run-log line is written, matching the behaviour of a default
    /// recursive walk that skips unreadable subtrees.
    Traversal,
}

// StaleSweep - util/constants.rs
//
// Single source of truth for all named constants and fixed strings.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "StaleSweep";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Fixed file paths
// =============================================================================

/// Configuration file name, resolved relative to the working directory.
/// All behaviour is driven by this file; there are no CLI flags.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Run log file name, resolved relative to the working directory.
/// Append-only; never rotated or truncated by StaleSweep.
pub const RUN_LOG_FILE_NAME: &str = "deleted_files.log";

// =============================================================================
// Sweep
// =============================================================================

/// Seconds per day, used for the cutoff calculation
/// (`cutoff = now - days * SECONDS_PER_DAY`).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Run-log marker written after a successful config load, before the sweep.
pub const RUN_START_MARKER: &str = "=== Cleanup started ===";

// =============================================================================
// Email report
// =============================================================================

/// Fixed subject line of the report email.
pub const EMAIL_SUBJECT: &str = "File Cleanup Log Report";

/// Display name shown alongside the sender address.
pub const EMAIL_SENDER_NAME: &str = "File Cleanup";

/// Fixed plain-text body of the report email.
pub const EMAIL_BODY: &str = "Attached is the latest file cleanup log.";

// =============================================================================
// Logging
// =============================================================================

/// Default diagnostic log level when RUST_LOG is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Timestamp format for run-log lines (local time).
pub const RUN_LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// StaleSweep - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. All errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all fatal StaleSweep failures.
/// Errors are categorised by the subsystem that produced them.
///
/// Per-file deletion failures are deliberately NOT represented here: they are
/// non-fatal values (`core::model::DeletionFailure`) collected by the scanner.
/// Email failures (`EmailError`) are swallowed by the notifier and never
/// reach this level.
#[derive(Debug)]
pub enum StaleSweepError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The sweep could not run or complete.
    Scan(ScanError),

    /// The run log could not be written.
    Report(ReportError),
}

impl fmt::Display for StaleSweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Scan(e) => write!(f, "Scan error: {e}"),
            Self::Report(e) => write!(f, "Run log error: {e}"),
        }
    }
}

impl std::error::Error for StaleSweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Scan(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and validation.
///
/// All variants are fatal: the run aborts before any file is touched.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    Missing { path: PathBuf },

    /// I/O error reading the configuration file.
    Io { path: PathBuf, source: io::Error },

    /// TOML parsing failed. Wrong-typed fields surface here with the
    /// offending key named in the underlying toml error message.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A required field is absent.
    MissingField { field: &'static str },

    /// A field is present but its value is not acceptable.
    InvalidField {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The configured target path is not an existing directory.
    DirectoryNotFound { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => {
                write!(f, "Missing configuration file '{}'", path.display())
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "Cannot read configuration file '{}': {source}",
                    path.display()
                )
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::MissingField { field } => {
                write!(f, "Missing required field '{field}'")
            }
            Self::InvalidField {
                field,
                value,
                expected,
            } => write!(f, "Invalid '{field}' = '{value}'. Expected: {expected}"),
            Self::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for StaleSweepError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Fatal sweep errors.
///
/// Per-file problems (permission denied, file vanished, I/O error) are NOT
/// errors at this level; the scanner records them as `DeletionFailure` values
/// and continues with the next file.
#[derive(Debug)]
pub enum ScanError {
    /// The sweep root does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The sweep root is not a directory.
    NotADirectory { path: PathBuf },

    /// A run-log append failed mid-sweep. The run log is the authoritative
    /// record of deletions, so losing it aborts the sweep.
    Report(ReportError),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Sweep path '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Sweep path '{}' is not a directory", path.display())
            }
            Self::Report(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Report(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReportError> for ScanError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

impl From<ScanError> for StaleSweepError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// A run-log line could not be appended.
#[derive(Debug)]
pub struct ReportError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot append to run log '{}': {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<ReportError> for StaleSweepError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Email errors
// ---------------------------------------------------------------------------

/// Errors related to building or sending the report email.
///
/// Always non-fatal: the notifier logs the failure to the run log and
/// swallows it. Never converted into `StaleSweepError`.
#[derive(Debug)]
pub enum EmailError {
    /// A configured address could not be parsed.
    InvalidAddress {
        field: &'static str,
        address: String,
        source: lettre::address::AddressError,
    },

    /// The run log could not be read for attachment.
    Attachment { path: PathBuf, source: io::Error },

    /// The message could not be assembled.
    Message(lettre::error::Error),

    /// The SMTP exchange failed (DNS, connect, TLS upgrade, auth, or send).
    Transport(lettre::transport::smtp::Error),
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress {
                field,
                address,
                source,
            } => write!(f, "Invalid {field} address '{address}': {source}"),
            Self::Attachment { path, source } => {
                write!(f, "Cannot read '{}' for attachment: {source}", path.display())
            }
            Self::Message(e) => write!(f, "Cannot build message: {e}"),
            Self::Transport(e) => write!(f, "SMTP failure: {e}"),
        }
    }
}

impl std::error::Error for EmailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAddress { source, .. } => Some(source),
            Self::Attachment { source, .. } => Some(source),
            Self::Message(e) => Some(e),
            Self::Transport(e) => Some(e),
        }
    }
}

/// Convenience type alias for fatal StaleSweep results.
pub type Result<T> = std::result::Result<T, StaleSweepError>;

// StaleSweep - platform/config.rs
//
// config.toml loading with startup validation. The raw TOML shape is
// deserialised permissively (every field optional, unknown keys ignored for
// forward compatibility), then validated explicitly so every failure names
// the offending field. Configuration problems are fatal: nothing is swept on
// a bad config.

use crate::core::model::{CleanupConfig, EmailConfig};
use crate::util::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw deserialisable shape of config.toml.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawConfig {
    /// Root of the directory tree to sweep.
    target_path: Option<String>,

    /// Age threshold in days.
    days_threshold: Option<i64>,

    /// `[email]` section.
    email: Option<RawEmailSection>,
}

/// `[email]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawEmailSection {
    enabled: Option<bool>,
    sender_email: Option<String>,
    recipient_email: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    use_tls: Option<bool>,
    sender_password: Option<String>,
}

/// Load and validate the configuration file at `path`.
///
/// Field requirements:
/// - `target_path` (string) and `days_threshold` (non-negative integer) are
///   always required. Wrong-typed values fail TOML deserialisation with the
///   key named in the parse error.
/// - When `[email] enabled = true`, the transport fields (`sender_email`,
///   `recipient_email`, `smtp_host`, `smtp_port`, `sender_password`) are
///   required at load time rather than failing inside the send path.
///
/// Path separators in `target_path` are normalised to the host's native
/// separator, and the result must be an existing directory.
///
/// No side effects beyond reading the file.
pub fn load_config(path: &Path) -> Result<CleanupConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let target = raw.target_path.ok_or(ConfigError::MissingField {
        field: "target_path",
    })?;

    let days = raw.days_threshold.ok_or(ConfigError::MissingField {
        field: "days_threshold",
    })?;
    if days < 0 || days > i64::from(u32::MAX) {
        return Err(ConfigError::InvalidField {
            field: "days_threshold",
            value: days.to_string(),
            expected: "a non-negative integer",
        });
    }

    let email = raw.email.map(validate_email_section).transpose()?;

    let target_path = normalize_separators(&target);
    match fs::metadata(&target_path) {
        Ok(meta) if meta.is_dir() => {}
        _ => {
            return Err(ConfigError::DirectoryNotFound { path: target_path });
        }
    }

    tracing::debug!(
        target = %target_path.display(),
        days = days,
        email_enabled = email.as_ref().is_some_and(|e| e.enabled),
        "Configuration loaded"
    );

    Ok(CleanupConfig {
        target_path,
        days_threshold: days as u32,
        email,
    })
}

/// Validate the `[email]` section.
///
/// A disabled section is accepted as-is (missing transport fields collapse to
/// empty strings that are never read); an enabled one must be complete.
fn validate_email_section(raw: RawEmailSection) -> Result<EmailConfig, ConfigError> {
    let enabled = raw.enabled.unwrap_or(false);

    if enabled {
        Ok(EmailConfig {
            enabled,
            sender_email: raw.sender_email.ok_or(ConfigError::MissingField {
                field: "email.sender_email",
            })?,
            recipient_email: raw.recipient_email.ok_or(ConfigError::MissingField {
                field: "email.recipient_email",
            })?,
            smtp_host: raw.smtp_host.ok_or(ConfigError::MissingField {
                field: "email.smtp_host",
            })?,
            smtp_port: raw.smtp_port.ok_or(ConfigError::MissingField {
                field: "email.smtp_port",
            })?,
            use_tls: raw.use_tls.unwrap_or(false),
            sender_password: raw.sender_password.ok_or(ConfigError::MissingField {
                field: "email.sender_password",
            })?,
        })
    } else {
        Ok(EmailConfig {
            enabled,
            sender_email: raw.sender_email.unwrap_or_default(),
            recipient_email: raw.recipient_email.unwrap_or_default(),
            smtp_host: raw.smtp_host.unwrap_or_default(),
            smtp_port: raw.smtp_port.unwrap_or_default(),
            use_tls: raw.use_tls.unwrap_or(false),
            sender_password: raw.sender_password.unwrap_or_default(),
        })
    }
}

/// Normalise path separators to the host's native separator.
///
/// On Windows forward slashes become backslashes; elsewhere the string is
/// taken verbatim (a backslash is a legal filename character on Unix).
fn normalize_separators(raw: &str) -> PathBuf {
    #[cfg(windows)]
    {
        PathBuf::from(raw.replace('/', "\\"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from(raw)
    }
}

// =============================================================================
// Tests
// =============================================================================

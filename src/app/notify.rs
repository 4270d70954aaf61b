// StaleSweep - app/notify.rs
//
// Email delivery of the run log. One message per run: fixed subject and
// body, the run log attached as text/plain, sent over SMTP with optional
// STARTTLS upgrade before authentication.
//
// Failure policy: nothing in here is ever allowed to propagate. Every
// failure (address parse, attachment read, message build, DNS, connect,
// auth, send) is appended to the run log and swallowed, so a broken mail
// setup can never turn a completed cleanup into a failed run.

use crate::core::model::{CleanupConfig, EmailConfig};
use crate::core::report::RunLog;
use crate::util::constants;
use crate::util::error::EmailError;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fs;
use std::path::Path;

/// Send the run-log report if email is configured and enabled.
///
/// A missing `[email]` section or `enabled = false` is a complete no-op:
/// no run-log line, no connection attempt. Never returns an error.
pub fn notify(config: &CleanupConfig, run_log: &RunLog) {
    let Some(email) = config.email.as_ref().filter(|e| e.enabled) else {
        tracing::debug!("Email report disabled; skipping");
        return;
    };

    match send_report(email, run_log.path()) {
        Ok(()) => {
            tracing::info!(recipient = %email.recipient_email, "Report email sent");
            if let Err(e) = run_log.append("Email sent successfully.") {
                tracing::warn!(error = %e, "Could not record email success in run log");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Report email failed");
            if let Err(log_err) = run_log.append(&format!("Failed to send email: {e}")) {
                tracing::warn!(error = %log_err, "Could not record email failure in run log");
            }
        }
    }
}

/// Build and send the report message over SMTP.
fn send_report(email: &EmailConfig, log_path: &Path) -> Result<(), EmailError> {
    let message = build_report_message(email, log_path)?;
    let mailer = build_transport(email)?;
    mailer.send(&message).map_err(EmailError::Transport)?;
    Ok(())
}

/// Assemble the report message with the run log attached.
///
/// The log is read here, at send time: if it has grown since the sweep the
/// latest content is what gets sent, and a missing log file fails the step.
pub fn build_report_message(
    email: &EmailConfig,
    log_path: &Path,
) -> Result<Message, EmailError> {
    let log_bytes = fs::read(log_path).map_err(|source| EmailError::Attachment {
        path: log_path.to_path_buf(),
        source,
    })?;

    let sender_address =
        email
            .sender_email
            .parse()
            .map_err(|source| EmailError::InvalidAddress {
                field: "sender",
                address: email.sender_email.clone(),
                source,
            })?;
    let from = Mailbox::new(Some(constants::EMAIL_SENDER_NAME.to_string()), sender_address);

    let to: Mailbox =
        email
            .recipient_email
            .parse()
            .map_err(|source| EmailError::InvalidAddress {
                field: "recipient",
                address: email.recipient_email.clone(),
                source,
            })?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(constants::EMAIL_SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(constants::EMAIL_BODY.to_string()))
                .singlepart(
                    Attachment::new(constants::RUN_LOG_FILE_NAME.to_string())
                        .body(log_bytes, ContentType::TEXT_PLAIN),
                ),
        )
        .map_err(EmailError::Message)
}

/// Build the SMTP transport: STARTTLS relay when `use_tls`, plain connection
/// otherwise, authenticating with the sender credentials either way.
fn build_transport(email: &EmailConfig) -> Result<SmtpTransport, EmailError> {
    let builder = if email.use_tls {
        SmtpTransport::starttls_relay(&email.smtp_host).map_err(EmailError::Transport)?
    } else {
        SmtpTransport::builder_dangerous(email.smtp_host.as_str())
    };

    Ok(builder
        .port(email.smtp_port)
        .credentials(Credentials::new(
            email.sender_email.clone(),
            email.sender_password.clone(),
        ))
        .build())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn email_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            sender_email: "ops@example.com".to_string(),
            recipient_email: "admin@example.com".to_string(),
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: 1, // nothing listens here
            use_tls: false,
            sender_password: "hunter2".to_string(),
        }
    }

    fn config_with_email(email: Option<EmailConfig>) -> CleanupConfig {
        CleanupConfig {
            target_path: std::env::temp_dir(),
            days_threshold: 7,
            email,
        }
    }

    #[test]
    fn test_absent_email_section_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("run.log"));

        notify(&config_with_email(None), &log);

        assert!(
            !log.path().exists(),
            "a disabled notifier must not touch the run log"
        );
    }

    #[test]
    fn test_disabled_email_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("run.log"));

        let email = EmailConfig {
            enabled: false,
            ..email_config()
        };
        notify(&config_with_email(Some(email)), &log);

        assert!(!log.path().exists());
    }

    #[test]
    fn test_message_carries_subject_body_and_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        fs::write(&log_path, "[2024-01-15 02:00:00.000] Deleted: /data/old.dat\n").unwrap();

        let message = build_report_message(&email_config(), &log_path).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(formatted.contains(constants::EMAIL_SUBJECT));
        assert!(formatted.contains(constants::EMAIL_BODY));
        assert!(
            formatted.contains(constants::RUN_LOG_FILE_NAME),
            "attachment should be named after the run log"
        );
        assert!(formatted.contains("File Cleanup"));
        assert!(formatted.contains("admin@example.com"));
    }

    #[test]
    fn test_missing_log_file_fails_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_report_message(&email_config(), &dir.path().join("absent.log"));
        assert!(matches!(result, Err(EmailError::Attachment { .. })));
    }

    #[test]
    fn test_invalid_sender_address() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        fs::write(&log_path, "content\n").unwrap();

        let email = EmailConfig {
            sender_email: "not-an-address".to_string(),
            ..email_config()
        };
        match build_report_message(&email, &log_path) {
            Err(EmailError::InvalidAddress { field, .. }) => assert_eq!(field, "sender"),
            Err(other) => panic!("expected InvalidAddress, got {other:?}"),
            Ok(_) => panic!("expected InvalidAddress, got a message"),
        }
    }

    /// A transport failure is swallowed and logged, never propagated.
    /// Port 1 on localhost refuses the connection immediately.
    #[test]
    fn test_send_failure_is_logged_and_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("run.log"));
        log.append("Deleted: /data/old.dat").unwrap();

        notify(&config_with_email(Some(email_config())), &log);

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(
            content.contains("Failed to send email:"),
            "transport failure must land in the run log: {content}"
        );
        assert!(!content.contains("Email sent successfully."));
    }
}

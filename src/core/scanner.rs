// StaleSweep - core/scanner.rs
//
// Recursive directory traversal and age-based file deletion.
//
// Architecture note: this module uses `walkdir` for directory traversal as an
// OS abstraction. It reads only file *metadata* (mtime), deletes eligible
// files, and records every outcome in the run log as it goes -- the log must
// reflect deletions even if a later step fails.
//
// Failure policy:
//   - Per-file errors (metadata, mtime, removal) are non-fatal: logged as
//     `Error deleting <path>: <error>` and the walk continues.
//   - Walker traversal errors (unreadable subtree, entry vanished) are
//     recorded as failures and diagnostic-logged, with no run-log line.
//   - A run-log append failure aborts the sweep: the log is the authoritative
//     deletion record.

use crate::core::model::{DeletionFailure, FailureKind, SweepOutcome};
use crate::core::report::RunLog;
use crate::util::constants;
use crate::util::error::ScanError;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::Path;

/// Sweep `root`, deleting every regular file whose last-modified time is
/// strictly older than `days` days before now.
///
/// `days = 0` makes the cutoff the scan instant: files modified at or after
/// it are kept, strictly older ones are deleted.
pub fn sweep(root: &Path, days: u32, run_log: &RunLog) -> Result<SweepOutcome, ScanError> {
    let cutoff = Utc::now() - Duration::seconds(i64::from(days) * constants::SECONDS_PER_DAY);
    sweep_with_cutoff(root, cutoff, run_log)
}

/// Sweep `root` against an explicit cutoff instant.
///
/// Files with `mtime < cutoff` (strict) are deleted; a file modified exactly
/// at the cutoff is retained. Directories are traversed, symlinks follow the
/// walker's default (not followed), and non-regular entries are skipped.
///
/// Returns `Err` only if `root` is invalid or the run log cannot be written;
/// completing the walk is success regardless of per-file failures.
pub fn sweep_with_cutoff(
    root: &Path,
    cutoff: DateTime<Utc>,
    run_log: &RunLog,
) -> Result<SweepOutcome, ScanError> {
    // Pre-flight: fs::metadata rather than Path::is_dir so an access error is
    // not silently conflated with "does not exist".
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    tracing::debug!(root = %root.display(), cutoff = %cutoff, "Sweep starting");

    let mut deleted = Vec::new();
    let mut failures: Vec<DeletionFailure> = Vec::new();
    let mut files_examined = 0usize;

    for entry_result in walkdir::WalkDir::new(root) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // Inaccessible entry: skip the subtree, keep sweeping.
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                tracing::warn!(path = %path.display(), error = %e, "Cannot access entry");
                failures.push(DeletionFailure {
                    path,
                    message: e.to_string(),
                    kind: FailureKind::Traversal,
                });
                continue;
            }
        };

        // Only regular files are candidates; directories and special entries
        // are skipped, symlinks are not followed.
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        files_examined += 1;

        let modified = entry
            .metadata()
            .map_err(|e| e.to_string())
            .and_then(|m| m.modified().map_err(|e| e.to_string()));

        let mtime = match modified {
            Ok(t) => DateTime::<Utc>::from(t),
            Err(message) => {
                run_log.append(&format!("Error deleting {}: {message}", path.display()))?;
                failures.push(DeletionFailure {
                    path: path.to_path_buf(),
                    message,
                    kind: FailureKind::File,
                });
                continue;
            }
        };

        if mtime >= cutoff {
            continue;
        }

        match fs::remove_file(path) {
            Ok(()) => {
                run_log.append(&format!("Deleted: {}", path.display()))?;
                tracing::debug!(file = %path.display(), mtime = %mtime, "Deleted");
                deleted.push(path.to_path_buf());
            }
            Err(e) => {
                run_log.append(&format!("Error deleting {}: {e}", path.display()))?;
                tracing::warn!(file = %path.display(), error = %e, "Deletion failed");
                failures.push(DeletionFailure {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                    kind: FailureKind::File,
                });
            }
        }
    }

    tracing::debug!(
        files_examined,
        deleted = deleted.len(),
        failures = failures.len(),
        "Sweep complete"
    );

    Ok(SweepOutcome {
        deleted,
        failures,
        files_examined,
        cutoff,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration as StdDuration, SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    /// Whole-second timestamp well in the past, immune to filesystem
    /// mtime-granularity truncation.
    const OLD_EPOCH_SECS: u64 = 1_600_000_000; // 2020-09-13

    fn set_mtime(path: &Path, when: SystemTime) {
        let file = fs::File::options().write(true).open(path).expect("open");
        file.set_modified(when).expect("set_modified");
    }

    fn write_aged(dir: &Path, name: &str, age_days: u64) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name).expect("write");
        set_mtime(
            &path,
            SystemTime::now() - StdDuration::from_secs(age_days * 86_400),
        );
        path
    }

    fn run_log_in(dir: &TempDir) -> RunLog {
        RunLog::new(dir.path().join("run.log"))
    }

    fn log_content(log: &RunLog) -> String {
        fs::read_to_string(log.path()).unwrap_or_default()
    }

    #[test]
    fn test_old_files_deleted_fresh_files_kept() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        let old = write_aged(tree.path(), "old.dat", 10);
        let fresh = write_aged(tree.path(), "fresh.dat", 1);

        let outcome = sweep(tree.path(), 7, &log).unwrap();

        assert!(!old.exists(), "10-day-old file should be deleted");
        assert!(fresh.exists(), "1-day-old file should survive");
        assert_eq!(outcome.deleted, vec![old.clone()]);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.files_examined, 2);
        assert_eq!(outcome.files_kept(), 1);

        let content = log_content(&log);
        assert!(
            content.contains(&format!("Deleted: {}", old.display())),
            "run log should record the deletion: {content}"
        );
        assert!(
            !content.contains("fresh.dat"),
            "kept files should produce no log line: {content}"
        );
    }

    #[test]
    fn test_exact_cutoff_mtime_is_retained() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        let boundary = UNIX_EPOCH + StdDuration::from_secs(OLD_EPOCH_SECS);
        let path = tree.path().join("boundary.dat");
        fs::write(&path, "x").unwrap();
        set_mtime(&path, boundary);

        // mtime == cutoff: strict less-than keeps the file.
        let cutoff = DateTime::<Utc>::from(boundary);
        let outcome = sweep_with_cutoff(tree.path(), cutoff, &log).unwrap();
        assert!(path.exists(), "file at the exact cutoff must be retained");
        assert!(outcome.deleted.is_empty());

        // One second past the boundary: now strictly older, deleted.
        let cutoff = DateTime::<Utc>::from(boundary + StdDuration::from_secs(1));
        let outcome = sweep_with_cutoff(tree.path(), cutoff, &log).unwrap();
        assert!(!path.exists(), "file strictly older than cutoff is deleted");
        assert_eq!(outcome.deleted.len(), 1);
    }

    #[test]
    fn test_recurses_into_subdirectories_and_keeps_directories() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        let sub = tree.path().join("a").join("b");
        fs::create_dir_all(&sub).unwrap();
        let nested = write_aged(&sub, "nested.dat", 30);

        let outcome = sweep(tree.path(), 7, &log).unwrap();

        assert!(!nested.exists(), "nested old file should be deleted");
        assert!(sub.is_dir(), "directories are never deleted");
        assert_eq!(outcome.deleted, vec![nested]);
    }

    #[test]
    fn test_empty_directory_is_a_noop_with_no_log_lines() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        let outcome = sweep(tree.path(), 0, &log).unwrap();

        assert_eq!(outcome.files_examined, 0);
        assert!(outcome.deleted.is_empty());
        assert!(outcome.failures.is_empty());
        assert!(
            !log.path().exists(),
            "an empty sweep must not create or touch the run log"
        );
    }

    #[test]
    fn test_days_zero_deletes_files_created_before_the_scan() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        // Any pre-existing mtime is strictly older than a cutoff of "now".
        let path = write_aged(tree.path(), "momentary.dat", 1);

        let outcome = sweep(tree.path(), 0, &log).unwrap();
        assert!(!path.exists());
        assert_eq!(outcome.deleted.len(), 1);
    }

    #[test]
    fn test_root_not_found() {
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);
        let result = sweep(Path::new("/nonexistent/stalesweep-test-path"), 7, &log);
        assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn test_root_not_a_directory() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        let file = tree.path().join("not_a_dir.dat");
        fs::write(&file, "content").unwrap();

        let result = sweep(&file, 7, &log);
        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_per_file_failure_does_not_stop_the_sweep() {
        use std::os::unix::fs::PermissionsExt;

        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        // An old file inside a read-only directory cannot be unlinked.
        let locked_dir = tree.path().join("locked");
        fs::create_dir(&locked_dir).unwrap();
        let locked = write_aged(&locked_dir, "locked.dat", 30);
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555)).unwrap();

        // A sibling that sorts after the failure must still be processed.
        let removable = write_aged(tree.path(), "zz_removable.dat", 30);

        let outcome = sweep(tree.path(), 7, &log).unwrap();

        // Restore permissions so TempDir cleanup succeeds.
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(locked.exists(), "locked file could not be removed");
        assert!(!removable.exists(), "later files must still be deleted");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, locked);
        assert_eq!(outcome.failures[0].kind, FailureKind::File);

        let content = log_content(&log);
        assert!(
            content.contains(&format!("Error deleting {}:", locked.display())),
            "failure must be logged: {content}"
        );
        assert!(content.contains(&format!("Deleted: {}", removable.display())));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        let target = write_aged(tree.path(), "target.dat", 30);

        // Sweep a tree containing only the symlink, so the target itself is
        // out of the walker's reach.
        let linkdir = tree.path().join("links");
        fs::create_dir(&linkdir).unwrap();
        let inner_link = linkdir.join("link.dat");
        std::os::unix::fs::symlink(&target, &inner_link).unwrap();

        let outcome = sweep(&linkdir, 0, &log).unwrap();

        assert!(target.exists(), "symlink target must not be deleted");
        assert!(inner_link.exists(), "the symlink itself is not a regular file");
        assert_eq!(outcome.files_examined, 0);
    }

    #[test]
    fn test_sweep_twice_is_idempotent() {
        let tree = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        let log = run_log_in(&logs);

        write_aged(tree.path(), "old_a.dat", 20);
        write_aged(tree.path(), "old_b.dat", 20);
        let fresh = write_aged(tree.path(), "fresh.dat", 1);

        let first = sweep(tree.path(), 7, &log).unwrap();
        assert_eq!(first.deleted.len(), 2);

        let second = sweep(tree.path(), 7, &log).unwrap();
        assert!(
            second.deleted.is_empty(),
            "a second run must find nothing further to delete"
        );
        assert!(fresh.exists());
    }
}

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::models::balance::{parse_balance, Balance};
use crate::models::rebase::RebaseEvent;
use crate::traits::state_store::StateStore;

/// State store over two flat files: the last-known-balance scalar file and
/// the append-only rebase ledger.
pub struct FileStateStore {
    balance_file: PathBuf,
    ledger_file: PathBuf,
}

impl FileStateStore {
    pub fn new(balance_file: impl Into<PathBuf>, ledger_file: impl Into<PathBuf>) -> Self {
        Self { balance_file: balance_file.into(), ledger_file: ledger_file.into() }
    }

    /// Take the run lock next to the ledger file. Fails with
    /// [`TrackerError::LockHeld`] when another run is in flight; the caller
    /// must not touch the store without holding the returned guard.
    ///
    /// The external scheduler is expected to keep runs from overlapping;
    /// this lock catches the case where it does not. After a hard crash the
    /// lock file stays behind and has to be removed by hand.
    pub fn acquire_run_lock(&self) -> Result<RunLockGuard, TrackerError> {
        let path = self.ledger_file.with_extension("lock");
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                debug!("Acquired run lock at {}", path.display());
                Ok(RunLockGuard { path })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(TrackerError::LockHeld { path })
            }
            Err(e) => Err(TrackerError::persistence(
                format!("creating run lock {}", path.display()),
                e,
            )),
        }
    }
}

impl StateStore for FileStateStore {
    fn read_balance(&self) -> Result<Option<Balance>, TrackerError> {
        let content = match fs::read_to_string(&self.balance_file) {
            Ok(content) => content,
            // First run: the baseline has not been recorded yet.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TrackerError::persistence(
                    format!("reading balance file {}", self.balance_file.display()),
                    e,
                ))
            }
        };
        parse_balance(&content).map(Some)
    }

    fn write_balance(&self, balance: Balance) -> Result<(), TrackerError> {
        // Write-then-rename so a crash mid-write never leaves a truncated
        // balance file behind.
        let dir = parent_dir(&self.balance_file);
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            TrackerError::persistence(format!("creating temp file in {}", dir.display()), e)
        })?;
        writeln!(tmp, "{balance}").map_err(|e| {
            TrackerError::persistence("writing new balance".to_string(), e)
        })?;
        tmp.persist(&self.balance_file).map_err(|e| {
            TrackerError::persistence(
                format!("replacing balance file {}", self.balance_file.display()),
                e.error,
            )
        })?;
        debug!("Recorded balance {} to {}", balance, self.balance_file.display());
        Ok(())
    }

    fn append_rebase(&self, event: &RebaseEvent) -> Result<(), TrackerError> {
        // Serialization of our own record type cannot fail; treat it as a
        // persistence problem if it somehow does.
        let line = serde_json::to_string(event).map_err(|e| {
            TrackerError::persistence(
                "serializing rebase record".to_string(),
                std::io::Error::new(ErrorKind::InvalidData, e),
            )
        })?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.ledger_file)
            .map_err(|e| {
                TrackerError::persistence(
                    format!("opening ledger file {}", self.ledger_file.display()),
                    e,
                )
            })?;
        writeln!(file, "{line}").map_err(|e| {
            TrackerError::persistence(
                format!("appending to ledger file {}", self.ledger_file.display()),
                e,
            )
        })?;
        debug!("Appended rebase {} to {}", event.rebase_amount, self.ledger_file.display());
        Ok(())
    }

    fn initialize_ledger(&self) -> Result<(), TrackerError> {
        match OpenOptions::new().write(true).create_new(true).open(&self.ledger_file) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(TrackerError::persistence(
                format!("initializing ledger file {}", self.ledger_file.display()),
                e,
            )),
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => Path::new("."),
    }
}

/// Holds the run lock; removes the lock file on drop.
pub struct RunLockGuard {
    path: PathBuf,
}

impl Drop for RunLockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove run lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> FileStateStore {
        FileStateStore::new(dir.join("balance"), dir.join("rebases"))
    }

    #[test]
    fn absent_balance_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        assert_eq!(store.read_balance().unwrap(), None);
    }

    #[test]
    fn written_balance_reads_back_and_is_newline_terminated() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write_balance(1_000_000_000_000_000_000).unwrap();
        assert_eq!(store.read_balance().unwrap(), Some(1_000_000_000_000_000_000));
        let raw = fs::read_to_string(dir.path().join("balance")).unwrap();
        assert_eq!(raw, "1000000000000000000\n");
    }

    #[test]
    fn write_overwrites_rather_than_appends() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write_balance(100).unwrap();
        store.write_balance(250).unwrap();
        let raw = fs::read_to_string(dir.path().join("balance")).unwrap();
        assert_eq!(raw, "250\n");
    }

    #[test]
    fn corrupt_balance_file_is_reported_as_corrupt_state() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("balance"), "abc\n").unwrap();
        assert!(matches!(
            store.read_balance(),
            Err(TrackerError::CorruptState { content }) if content == "abc"
        ));
    }

    #[test]
    fn initialize_ledger_creates_empty_file_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.initialize_ledger().unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("rebases")).unwrap(), "");

        // Existing content survives a second initialization.
        store.append_rebase(&RebaseEvent::new(5)).unwrap();
        store.initialize_ledger().unwrap();
        let content = fs::read_to_string(dir.path().join("rebases")).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn appended_records_are_line_delimited_json() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.append_rebase(&RebaseEvent::new(150)).unwrap();
        store.append_rebase(&RebaseEvent::new(-100_000_000_000_000_000)).unwrap();

        let content = fs::read_to_string(dir.path().join("rebases")).unwrap();
        assert!(content.ends_with('\n'));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: RebaseEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.rebase_amount, "0.000000000000000150");
        let second: RebaseEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.rebase_amount, "-0.100000000000000000");
    }

    #[test]
    fn run_lock_excludes_a_second_run_until_released() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let guard = store.acquire_run_lock().unwrap();
        assert!(matches!(store.acquire_run_lock(), Err(TrackerError::LockHeld { .. })));

        drop(guard);
        assert!(store.acquire_run_lock().is_ok());
    }
}

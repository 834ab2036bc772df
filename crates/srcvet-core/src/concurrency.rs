use crate::ReviewError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Advisory lock guarding exclusive ownership of the working directory for
/// the lifetime of a review run.
pub struct WorkdirLock {
    lock_file: File,
}

impl WorkdirLock {
    pub fn acquire(lock_path: &Path) -> Result<Self, ReviewError> {
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(lock_path)?;

        file.try_lock_exclusive()
            .map_err(|_| ReviewError::WorkdirLocked(lock_path.display().to_string()))?;

        Ok(Self { lock_file: file })
    }

    pub fn try_acquire(lock_path: &Path) -> Result<Option<Self>, ReviewError> {
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { lock_file: file })),
            Err(_) => Ok(None),
        }
    }
}

impl Drop for WorkdirLock {
    fn drop(&mut self) {
        let _ = self.lock_file.unlock();
    }
}

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// First interrupt requests a stop (checked between build targets), a second
/// one exits immediately. Prompts and running builds are never interrupted.
pub fn install_signal_handler() {
    let _ = ctrlc::set_handler(move || {
        if SHUTDOWN_REQUESTED.load(Ordering::SeqCst) {
            std::process::exit(1);
        }
        SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
        eprintln!("\nshutdown requested, finishing current build...");
    });
}

pub fn shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_acquire_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("test.lock");

        {
            let _lock = WorkdirLock::acquire(&lock_path).unwrap();
            assert!(lock_path.exists());
        }
    }

    #[test]
    fn try_acquire_returns_none_when_held() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("test.lock");

        let _lock = WorkdirLock::acquire(&lock_path).unwrap();
        let result = WorkdirLock::try_acquire(&lock_path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("test.lock");

        {
            let _lock = WorkdirLock::acquire(&lock_path).unwrap();
        }

        let lock2 = WorkdirLock::try_acquire(&lock_path).unwrap();
        assert!(lock2.is_some());
    }

    #[test]
    fn acquire_reports_held_lock_as_locked() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("test.lock");

        let _held = WorkdirLock::acquire(&lock_path).unwrap();
        match WorkdirLock::acquire(&lock_path) {
            Err(ReviewError::WorkdirLocked(path)) => {
                assert!(path.contains("test.lock"));
            }
            Err(other) => panic!("expected WorkdirLocked, got {other}"),
            Ok(_) => panic!("lock unexpectedly acquired twice"),
        }
    }
}

//! Removal of a half-built project when a run fails or is interrupted.
//!
//! A [`CleanupGuard`] is armed before the template is fetched and disarmed
//! once every step has succeeded. Dropping it while armed (an error, an early
//! return, a panic) removes the target directory. The Ctrl-C handler reads the
//! same [`ArmedTarget`] slot so an interrupt during the clone cleans up too.
//!
//! The current working directory is never removed.

use std::{
    fs, io,
    path::Path,
    sync::{Arc, Mutex, PoisonError},
    thread,
    time::Duration,
};

use create_kyrix_core::Target;
use log::{debug, warn};

use crate::error::EXIT_CANCELLED;

/// Remove a partially created project. Errors are logged, not returned.
pub fn cleanup(target: &Target) {
    match target {
        Target::CurrentDir(path) => {
            debug!("leaving current directory {} in place", path.display());
        }
        Target::NewDir(path) => {
            debug!("removing {}", path.display());
            if let Err(err) = remove_with_retry(path, |p| fs::remove_dir_all(p)) {
                warn!("failed to clean up {}: {err}", path.display());
            }
        }
    }
}

/// Pause before the second removal attempt.
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Remove `path`, trying once more if the first attempt fails.
///
/// The interrupt handler can race a write still in flight on the main
/// thread, which makes the first `remove_dir_all` fail on a fresh entry.
fn remove_with_retry(
    path: &Path,
    mut remove: impl FnMut(&Path) -> io::Result<()>,
) -> io::Result<()> {
    match remove(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            debug!("retrying removal of {} after: {err}", path.display());
            thread::sleep(RETRY_DELAY);
            match remove(path) {
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                result => result,
            }
        }
    }
}

/// The target the interrupt handler should clean, shared with the main thread.
#[derive(Debug, Clone, Default)]
pub struct ArmedTarget(Arc<Mutex<Option<Target>>>);

impl ArmedTarget {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, target: Option<Target>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = target;
    }

    /// Take the armed target, leaving the slot empty.
    pub fn take(&self) -> Option<Target> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Install the Ctrl-C handler: clean the armed target, then exit with 130.
pub fn install_interrupt_handler(armed: ArmedTarget) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if let Some(target) = armed.take() {
            cleanup(&target);
        }
        std::process::exit(EXIT_CANCELLED);
    })
}

/// Removes the target on drop unless [`disarm`](CleanupGuard::disarm)ed.
#[must_use = "dropping the guard immediately removes the target"]
pub struct CleanupGuard {
    slot: ArmedTarget,
    target: Option<Target>,
}

impl CleanupGuard {
    pub fn arm(target: Target, slot: &ArmedTarget) -> Self {
        debug!("armed cleanup for {}", target.path().display());
        slot.set(Some(target.clone()));
        Self {
            slot: slot.clone(),
            target: Some(target),
        }
    }

    /// Keep the target: the run succeeded.
    pub fn disarm(mut self) {
        self.target = None;
        self.slot.set(None);
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Some(target) = self.target.take() {
            self.slot.set(None);
            cleanup(&target);
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn populated(dir: &Path) {
        fs::create_dir_all(dir.join("src/server")).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
    }

    #[test]
    fn test_cleanup_removes_new_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        populated(&dir);

        cleanup(&Target::NewDir(dir.clone()));

        assert!(!dir.exists());
    }

    #[test]
    fn test_cleanup_never_removes_current_dir() {
        let temp = TempDir::new().unwrap();
        populated(temp.path());

        cleanup(&Target::CurrentDir(temp.path().to_path_buf()));

        assert!(temp.path().join("package.json").exists());
    }

    #[test]
    fn test_cleanup_of_missing_dir_is_silent() {
        let temp = TempDir::new().unwrap();
        cleanup(&Target::NewDir(temp.path().join("never-created")));
    }

    #[test]
    fn test_removal_is_retried_once() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        populated(&dir);
        let mut attempts = 0;

        let result = remove_with_retry(&dir, |path| {
            attempts += 1;
            if attempts == 1 {
                // A file created while the tree was being walked.
                fs::write(path.join("late.ts"), "").unwrap();
                return Err(io::Error::other("directory not empty"));
            }
            fs::remove_dir_all(path)
        });

        assert!(result.is_ok());
        assert_eq!(attempts, 2);
        assert!(!dir.exists());
    }

    #[test]
    fn test_removal_gives_up_after_second_failure() {
        let mut attempts = 0;

        let result = remove_with_retry(Path::new("app"), |_| {
            attempts += 1;
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        });

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(attempts, 2);
    }

    #[test]
    fn test_guard_drop_removes_target() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        let slot = ArmedTarget::new();

        {
            let _guard = CleanupGuard::arm(Target::NewDir(dir.clone()), &slot);
            assert!(slot.is_armed());
            populated(&dir);
        }

        assert!(!dir.exists());
        assert!(!slot.is_armed());
    }

    #[test]
    fn test_disarmed_guard_keeps_target() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        let slot = ArmedTarget::new();

        let guard = CleanupGuard::arm(Target::NewDir(dir.clone()), &slot);
        populated(&dir);
        guard.disarm();

        assert!(dir.join("package.json").exists());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_slot_hands_target_to_interrupt_handler() {
        let slot = ArmedTarget::new();
        let target = Target::NewDir("app".into());

        let guard = CleanupGuard::arm(target.clone(), &slot);

        assert_eq!(slot.clone().take(), Some(target));
        guard.disarm();
    }
}

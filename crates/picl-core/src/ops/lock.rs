//! Exclusive lock on an output folder.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::OperationError;

/// Holds `<output_folder>/.picl.lock` for as long as it lives.
///
/// The file is created with create-new semantics, so a second process trying
/// to lock the same folder fails instead of waiting. Dropping the guard
/// deletes the file, including on early returns and panics.
#[derive(Debug)]
pub struct OutputLock {
    path: PathBuf,
}

impl OutputLock {
    /// Take the lock for `output_folder`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Locked`] if the lock file already exists, or
    /// [`OperationError::Io`] if it cannot be created.
    pub fn acquire(output_folder: &Path) -> Result<Self, OperationError> {
        let path = crate::paths::lock_path(output_folder);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(OperationError::Locked(path));
            }
            Err(e) => return Err(e.into()),
        };

        let lock = Self { path };
        writeln!(file, "{}", std::process::id())?;
        tracing::debug!("Locked {}", lock.path.display());
        Ok(lock)
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove lock {}: {}", self.path.display(), e);
        } else {
            tracing::debug!("Unlocked {}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_exclusive_and_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();

        let lock = OutputLock::acquire(dir.path()).unwrap();
        assert!(lock.path().exists());

        let err = OutputLock::acquire(dir.path()).unwrap_err();
        assert!(matches!(err, OperationError::Locked(_)));

        drop(lock);
        assert!(!dir.path().join(crate::LOCK_FILE_NAME).exists());
        assert!(OutputLock::acquire(dir.path()).is_ok());
    }

    #[test]
    fn test_lock_missing_folder_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OutputLock::acquire(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, OperationError::Io(_)));
    }
}

//! Filesystem remover: delete a stored artifact from the output folder.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use picl_schema::PackageSpec;

use super::{OperationError, OutputLock, Remover};

/// [`Remover`] that deletes `<output_folder>/<name>-<version>.zip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

#[async_trait]
impl Remover for FsRemover {
    async fn remove(
        &self,
        pkg: &PackageSpec,
        output_folder: &Path,
    ) -> Result<PathBuf, OperationError> {
        let path = crate::paths::artifact_path(output_folder, pkg)?;
        let not_installed = || OperationError::NotInstalled {
            pkg: pkg.clone(),
            folder: output_folder.to_path_buf(),
        };

        if !output_folder.is_dir() {
            return Err(not_installed());
        }
        let _lock = OutputLock::acquire(output_folder)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed {}", path.display());
                Ok(path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_installed()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> PackageSpec {
        PackageSpec::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_remove_deletes_artifact_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jq-1.7.zip"), b"zip").unwrap();
        std::fs::write(dir.path().join("jq-1.6.zip"), b"zip").unwrap();

        let removed = FsRemover.remove(&spec("jq@1.7"), dir.path()).await.unwrap();

        assert_eq!(removed, dir.path().join("jq-1.7.zip"));
        assert!(!removed.exists());
        assert!(dir.path().join("jq-1.6.zip").exists());
        assert!(!dir.path().join(crate::LOCK_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_remove_missing_package() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsRemover
            .remove(&spec("jq@1.7"), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::NotInstalled { .. }));
        assert!(err.to_string().starts_with("jq@1.7 is not installed"));
    }

    #[tokio::test]
    async fn test_remove_never_leaves_output_folder() {
        let dir = tempfile::tempdir().unwrap();
        let libs = dir.path().join("libs");
        std::fs::create_dir(&libs).unwrap();
        let victim = dir.path().join("victim-1.zip");
        std::fs::write(&victim, b"keep me").unwrap();

        let pkg = PackageSpec {
            name: "../victim".into(),
            version: "1".into(),
        };
        let err = FsRemover.remove(&pkg, &libs).await.unwrap_err();

        assert!(matches!(err, OperationError::Specifier(_)));
        assert!(victim.exists());
        assert!(!libs.join(crate::LOCK_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_remove_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsRemover
            .remove(&spec("jq@1.7"), &dir.path().join("absent"))
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::NotInstalled { .. }));
        assert!(!dir.path().join("absent").exists());
    }
}

//! Package operations.
//!
//! The dispatcher only depends on the [`Installer`] and [`Remover`] traits.
//! [`HttpInstaller`] and [`FsRemover`] are the implementations the `picl`
//! binary wires in; tests substitute their own.

mod error;
mod install;
mod lock;
mod remove;

pub use error::OperationError;
pub use install::{HttpInstaller, artifact_url};
pub use lock::OutputLock;
pub use remove::FsRemover;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use picl_schema::PackageSpec;
use reqwest::Url;

/// What an install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The artifact was downloaded and stored.
    Installed {
        /// Stored artifact.
        path: PathBuf,
        /// Size in bytes.
        bytes: u64,
        /// Hex-encoded SHA-256 of the stored file.
        sha256: String,
    },
    /// The artifact was already in the output folder; nothing was fetched.
    AlreadyPresent {
        /// Existing artifact.
        path: PathBuf,
    },
}

/// Fetches a package from the remote and places it in the output folder.
#[async_trait]
pub trait Installer: Send + Sync {
    /// Install `pkg` from `remote_url` into `output_folder`.
    async fn install(
        &self,
        pkg: &PackageSpec,
        output_folder: &Path,
        remote_url: &Url,
    ) -> Result<InstallOutcome, OperationError>;
}

/// Deletes a package from the output folder.
#[async_trait]
pub trait Remover: Send + Sync {
    /// Remove `pkg` from `output_folder`, returning the path that was deleted.
    async fn remove(&self, pkg: &PackageSpec, output_folder: &Path)
    -> Result<PathBuf, OperationError>;
}

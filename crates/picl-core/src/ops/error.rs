//! Domain-specific errors for package operations

use std::path::PathBuf;

use picl_schema::{PackageSpec, SpecError};
use thiserror::Error;

/// Failure reported by an [`Installer`](super::Installer) or [`Remover`](super::Remover).
#[derive(Error, Debug)]
pub enum OperationError {
    /// Request failed or the server answered with a non-success status.
    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The package cannot be stored under the output folder.
    #[error(transparent)]
    Specifier(#[from] SpecError),

    /// The artifact URL could not be built from the remote base.
    #[error("Invalid remote url: {0}")]
    InvalidUrl(String),

    /// Nothing to remove.
    #[error("{pkg} is not installed in {}", folder.display())]
    NotInstalled {
        /// Package that was asked for.
        pkg: PackageSpec,
        /// Output folder that was searched.
        folder: PathBuf,
    },

    /// Another picl process holds the output folder.
    #[error(
        "Output folder is in use by another picl process (remove {} if it is stale)",
        .0.display()
    )]
    Locked(PathBuf),

    /// Error with context for better debugging.
    #[error("{context}: {message}")]
    Context {
        /// What was being attempted.
        context: &'static str,
        /// Underlying error message.
        message: String,
    },
}

impl OperationError {
    /// Create an error with context for better debugging.
    pub fn context(ctx: &'static str, msg: impl std::fmt::Display) -> Self {
        Self::Context {
            context: ctx,
            message: msg.to_string(),
        }
    }
}
